// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for termax
//!
//! These types mirror the on-disk session layout, so field names and
//! optionality follow the JSON written to `.termax_memory_<id>.json`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Failure categories recognised from command stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    PermissionDenied,
    NotFound,
    SyntaxError,
    ConnectionError,
    DiskSpace,
}

impl ErrorCategory {
    /// Categories in classification order. Earlier entries win when several match.
    pub fn all() -> [ErrorCategory; 5] {
        [
            ErrorCategory::PermissionDenied,
            ErrorCategory::NotFound,
            ErrorCategory::SyntaxError,
            ErrorCategory::ConnectionError,
            ErrorCategory::DiskSpace,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::PermissionDenied => "permission_denied",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::SyntaxError => "syntax_error",
            ErrorCategory::ConnectionError => "connection_error",
            ErrorCategory::DiskSpace => "disk_space",
        }
    }

    /// Canned advice shown next to a failed command.
    pub fn suggestion(&self) -> &'static str {
        match self {
            ErrorCategory::PermissionDenied => "Try running the command with 'sudo'",
            ErrorCategory::NotFound => {
                "Check that the command is installed and the path is correct"
            }
            ErrorCategory::SyntaxError => "Check the command syntax",
            ErrorCategory::ConnectionError => "Check the network connection and host availability",
            ErrorCategory::DiskSpace => "Free up some disk space",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output captured for an analysis.
///
/// Successful commands only carry `stdout`; failures also keep `stderr` and
/// the exit code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisDetails {
    #[serde(default)]
    pub stdout: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_code: Option<i32>,
}

/// Classification of a single executed command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandAnalysis {
    pub success: bool,
    #[serde(default)]
    pub error_type: Option<ErrorCategory>,
    #[serde(default)]
    pub suggestion: Option<String>,
    #[serde(default)]
    pub details: AnalysisDetails,
}

/// Raw result of running a shell command
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub stdout: String,
    pub stderr: String,
    pub return_code: i32,
}

impl ExecutionOutcome {
    pub fn succeeded(&self) -> bool {
        self.return_code == 0
    }
}

/// Command result handed to batch analysis.
///
/// Missing output defaults to empty and a missing exit code counts as failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInput {
    pub command: String,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default = "default_return_code")]
    pub return_code: i32,
}

fn default_return_code() -> i32 {
    1
}

/// One entry of a session's command history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub command: String,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub return_code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<CommandAnalysis>,
    /// Set by the session memory when the record is appended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Keys written by other tools that we carry through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommandRecord {
    pub fn new(command: impl Into<String>, outcome: ExecutionOutcome) -> Self {
        Self {
            command: command.into(),
            stdout: outcome.stdout,
            stderr: outcome.stderr,
            return_code: outcome.return_code,
            analysis: None,
            timestamp: None,
            extra: Map::new(),
        }
    }

    pub fn with_analysis(mut self, analysis: CommandAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn succeeded(&self) -> bool {
        match &self.analysis {
            Some(analysis) => analysis.success,
            None => self.return_code == 0 && self.stderr.is_empty(),
        }
    }
}

/// Input handed to a suggester: what happened recently in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionContext {
    pub recent_commands: Vec<CommandRecord>,
    pub context: Map<String, Value>,
}
