// SPDX-License-Identifier: PMPL-1.0-or-later

//! Per-session command history and context, persisted as JSON
//!
//! Every mutating call rewrites the whole session file. The file keeps the
//! layout `{session_id, command_history, context}` pretty-printed, which is
//! what existing session files on disk already look like.
//!
//! There is no locking: two processes sharing a session id will overwrite
//! each other's writes.

use crate::storage;
use crate::types::{CommandRecord, SuggestionContext};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Number of records handed to the suggester.
pub const SUGGESTION_HISTORY: usize = 5;

#[derive(Serialize)]
struct SessionFileRef<'a> {
    session_id: &'a str,
    command_history: &'a [CommandRecord],
    context: &'a Map<String, Value>,
}

#[derive(Deserialize)]
struct SessionFile {
    #[serde(default)]
    command_history: Vec<CommandRecord>,
    #[serde(default)]
    context: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct SessionMemory {
    session_id: String,
    command_history: Vec<CommandRecord>,
    context: Map<String, Value>,
    memory_file: PathBuf,
}

impl SessionMemory {
    /// Empty memory for `session_id`, stored under `dir`. Nothing is read or
    /// written until the first mutation or an explicit `load_memory`.
    pub fn new(session_id: impl Into<String>, dir: &Path) -> Self {
        let session_id = session_id.into();
        let memory_file = storage::session_path(dir, &session_id);
        Self {
            session_id,
            command_history: Vec::new(),
            context: Map::new(),
            memory_file,
        }
    }

    /// Open a session and pull in whatever is already stored for it.
    pub fn open(session_id: impl Into<String>, dir: &Path) -> Result<Self> {
        let mut memory = Self::new(session_id, dir);
        memory.load_memory()?;
        Ok(memory)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn memory_file(&self) -> &Path {
        &self.memory_file
    }

    pub fn command_history(&self) -> &[CommandRecord] {
        &self.command_history
    }

    /// Stamp, append and persist a record.
    pub fn add_command(&mut self, mut record: CommandRecord) -> Result<&CommandRecord> {
        record.timestamp = Some(current_timestamp());
        debug!(session = %self.session_id, command = %record.command, "recording command");
        self.command_history.push(record);
        self.save_memory()?;
        let last = self.command_history.len() - 1;
        Ok(&self.command_history[last])
    }

    /// The last `limit` records in insertion order.
    ///
    /// `limit == 0` yields an empty slice. Older session tooling returned the
    /// full history for zero; callers wanting everything use `command_history`.
    pub fn get_recent_commands(&self, limit: usize) -> &[CommandRecord] {
        let start = self.command_history.len().saturating_sub(limit);
        &self.command_history[start..]
    }

    pub fn update_context(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        self.context.insert(key.into(), value);
        self.save_memory()
    }

    /// One context value (`null` when absent), or the whole mapping when no
    /// key is given. An empty key counts as no key.
    pub fn get_context(&self, key: Option<&str>) -> Value {
        match key.filter(|k| !k.is_empty()) {
            Some(key) => self.context.get(key).cloned().unwrap_or(Value::Null),
            None => Value::Object(self.context.clone()),
        }
    }

    pub fn clear_context(&mut self) -> Result<()> {
        self.context = Map::new();
        self.save_memory()
    }

    /// Replace history and context with the stored session, if one exists.
    ///
    /// Returns whether a file was found.
    pub fn load_memory(&mut self) -> Result<bool> {
        if !self.memory_file.exists() {
            debug!(path = %self.memory_file.display(), "no stored session");
            return Ok(false);
        }

        let content = fs::read_to_string(&self.memory_file)
            .with_context(|| format!("reading session file {}", self.memory_file.display()))?;
        let stored: SessionFile = serde_json::from_str(&content)
            .with_context(|| format!("parsing session file {}", self.memory_file.display()))?;

        self.command_history = stored.command_history;
        self.context = stored.context;
        debug!(
            session = %self.session_id,
            commands = self.command_history.len(),
            "loaded stored session"
        );
        Ok(true)
    }

    pub fn get_command_suggestion_context(&self) -> SuggestionContext {
        SuggestionContext {
            recent_commands: self.get_recent_commands(SUGGESTION_HISTORY).to_vec(),
            context: self.context.clone(),
        }
    }

    fn save_memory(&self) -> Result<()> {
        let payload = SessionFileRef {
            session_id: &self.session_id,
            command_history: &self.command_history,
            context: &self.context,
        };
        let json = serde_json::to_string_pretty(&payload)?;
        fs::write(&self.memory_file, json)
            .with_context(|| format!("writing session file {}", self.memory_file.display()))?;
        debug!(
            path = %self.memory_file.display(),
            commands = self.command_history.len(),
            "session saved"
        );
        Ok(())
    }
}

fn current_timestamp() -> String {
    format_timestamp(&Local::now().naive_local())
}

/// ISO-8601 without offset; the fraction is dropped when it is all zeros.
fn format_timestamp(at: &NaiveDateTime) -> String {
    if at.and_utc().timestamp_subsec_micros() == 0 {
        at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExecutionOutcome;
    use tempfile::TempDir;

    fn record(command: &str) -> CommandRecord {
        CommandRecord::new(
            command,
            ExecutionOutcome {
                stdout: format!("{command} out"),
                stderr: String::new(),
                return_code: 0,
            },
        )
    }

    #[test]
    fn recent_commands_are_a_suffix() {
        let dir = TempDir::new().expect("tempdir should create");
        let mut memory = SessionMemory::new("recent", dir.path());
        for cmd in ["one", "two", "three", "four", "five"] {
            memory.add_command(record(cmd)).expect("add should persist");
        }

        let recent: Vec<_> = memory
            .get_recent_commands(3)
            .iter()
            .map(|r| r.command.as_str())
            .collect();
        assert_eq!(recent, vec!["three", "four", "five"]);
        assert!(memory.get_recent_commands(0).is_empty());
        assert_eq!(memory.get_recent_commands(50).len(), 5);
    }

    #[test]
    fn timestamp_has_no_offset() {
        let ts = current_timestamp();
        assert!(NaiveDateTime::parse_from_str(&ts, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }

    #[test]
    fn timestamp_fraction_only_when_nonzero() {
        let whole = NaiveDateTime::parse_from_str("2024-03-01T10:00:00", "%Y-%m-%dT%H:%M:%S")
            .expect("valid datetime");
        assert_eq!(format_timestamp(&whole), "2024-03-01T10:00:00");

        let micros = NaiveDateTime::parse_from_str(
            "2024-03-01T10:00:00.000120",
            "%Y-%m-%dT%H:%M:%S%.f",
        )
        .expect("valid datetime");
        assert_eq!(format_timestamp(&micros), "2024-03-01T10:00:00.000120");
    }

    #[test]
    fn empty_key_returns_whole_context() {
        let dir = TempDir::new().expect("tempdir should create");
        let mut memory = SessionMemory::new("ctx", dir.path());
        memory
            .update_context("host", Value::from("db1"))
            .expect("update should persist");
        assert_eq!(memory.get_context(Some("")), serde_json::json!({"host": "db1"}));
        assert_eq!(memory.get_context(Some("missing")), Value::Null);
    }
}
