// SPDX-License-Identifier: PMPL-1.0-or-later

//! Rule-based classification of command results
//!
//! Matches stderr against a fixed, ordered regex table and attaches a canned
//! suggestion to recognised failures. Nothing here can fail: an unknown
//! error is simply left without a category.

pub mod engine;
pub mod patterns;

use crate::types::*;

pub use engine::CommandAnalyzer;
pub use patterns::{ErrorPattern, PatternTable};

/// Classify a single command result
pub fn analyze(command: &str, stdout: &str, stderr: &str, return_code: i32) -> CommandAnalysis {
    CommandAnalyzer::new().analyze(command, stdout, stderr, return_code)
}

/// Classify a batch of command results, preserving order
pub fn analyze_multiple_commands(commands: &[CommandInput]) -> Vec<CommandAnalysis> {
    CommandAnalyzer::new().analyze_multiple_commands(commands)
}

pub fn extract_keywords(text: &str) -> Vec<String> {
    CommandAnalyzer::new().extract_keywords(text)
}
