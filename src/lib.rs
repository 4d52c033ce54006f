// SPDX-License-Identifier: PMPL-1.0-or-later

//! termax: a shell assistant with per-session memory.
//!
//! Commands are run through the shell, their results classified by a fixed
//! stderr pattern table, and every execution appended to a JSON session file
//! together with a free-form key/value context.
//!
//! COMPONENTS:
//! 1. **Analyzer**: success/failure classification with canned suggestions.
//! 2. **Memory**: append-only command history plus context, rewritten to
//!    `.termax_memory_<session>.json` on every change.
//! 3. **Shell**: command execution and script generation.

pub mod analyzer;
pub mod config;
pub mod diagnostics;
pub mod memory;
pub mod repl;
pub mod report;
pub mod shell;
pub mod storage;
pub mod suggest;
pub mod types;
