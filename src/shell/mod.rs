// SPDX-License-Identifier: PMPL-1.0-or-later

//! Running shell commands and writing scripts

pub mod executor;
pub mod script;

use crate::types::ExecutionOutcome;

pub use executor::ShellExecutor;
pub use script::create_script;

/// Execute a command with the default `sh` executor
pub fn execute_command(command: &str) -> ExecutionOutcome {
    ShellExecutor::new().execute_command(command)
}
