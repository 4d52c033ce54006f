// SPDX-License-Identifier: PMPL-1.0-or-later

//! Shell command execution

use crate::analyzer::CommandAnalyzer;
use crate::memory::SessionMemory;
use crate::types::*;
use anyhow::Result;
use std::process::{Command, ExitStatus, Output, Stdio};
use std::time::Instant;
use tracing::{debug, warn};

/// Exit code reported when the shell itself could not be started.
pub const SPAWN_FAILURE_CODE: i32 = 1;

pub struct ShellExecutor {
    shell: String,
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self::with_shell("sh")
    }

    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// Run `command` through the shell and wait for it to exit.
    ///
    /// A shell that fails to start is reported the same way as a failing
    /// command: the error text lands in stderr with exit code 1.
    pub fn execute_command(&self, command: &str) -> ExecutionOutcome {
        let start = Instant::now();
        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        match output {
            Ok(output) => {
                let outcome = Self::outcome_from(output);
                debug!(
                    command,
                    return_code = outcome.return_code,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "command finished"
                );
                outcome
            }
            Err(err) => {
                warn!(command, shell = %self.shell, error = %err, "failed to spawn shell");
                ExecutionOutcome {
                    stdout: String::new(),
                    stderr: err.to_string(),
                    return_code: SPAWN_FAILURE_CODE,
                }
            }
        }
    }

    /// Execute, classify and append the result to the session.
    pub fn run_and_record(
        &self,
        command: &str,
        analyzer: &CommandAnalyzer,
        memory: &mut SessionMemory,
    ) -> Result<CommandRecord> {
        let outcome = self.execute_command(command);
        let analysis = analyzer.analyze_outcome(command, &outcome);
        let record = CommandRecord::new(command, outcome).with_analysis(analysis);
        let stored = memory.add_command(record)?;
        Ok(stored.clone())
    }

    fn outcome_from(output: Output) -> ExecutionOutcome {
        ExecutionOutcome {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            return_code: Self::return_code(&output.status),
        }
    }

    /// Exit code, or the negated signal number for a killed child.
    #[cfg(unix)]
    fn return_code(status: &ExitStatus) -> i32 {
        use std::os::unix::process::ExitStatusExt;
        status
            .code()
            .or_else(|| status.signal().map(|signal| -signal))
            .unwrap_or(-1)
    }

    #[cfg(not(unix))]
    fn return_code(status: &ExitStatus) -> i32 {
        status.code().unwrap_or(-1)
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}
