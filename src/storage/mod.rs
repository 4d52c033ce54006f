// SPDX-License-Identifier: PMPL-1.0-or-later

//! Session file naming and discovery

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = ".termax_memory_";
const FILE_SUFFIX: &str = ".json";

/// Default session identifier derived from the local clock.
pub fn timestamp_session_id() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

pub fn session_file_name(session_id: &str) -> String {
    format!("{}{}{}", FILE_PREFIX, session_id, FILE_SUFFIX)
}

pub fn session_path(dir: &Path, session_id: &str) -> PathBuf {
    dir.join(session_file_name(session_id))
}

/// Session id encoded in a file name, if it is a session file at all.
pub fn session_id_from_file_name(name: &str) -> Option<&str> {
    name.strip_prefix(FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
        .filter(|id| !id.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub path: PathBuf,
    /// Number of recorded commands, or `None` when the file could not be read.
    pub commands: Option<usize>,
}

pub fn list_sessions(dir: &Path) -> Result<Vec<SessionSummary>> {
    if !dir.is_dir() {
        return Err(anyhow!("memory directory not found: {}", dir.display()));
    }

    let mut sessions: Vec<SessionSummary> = fs::read_dir(dir)
        .with_context(|| format!("reading memory directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let session_id = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(session_id_from_file_name)?
                .to_string();
            let commands = count_commands(&path);
            Some(SessionSummary {
                session_id,
                path,
                commands,
            })
        })
        .collect();

    sessions.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(sessions)
}

fn count_commands(path: &Path) -> Option<usize> {
    let content = fs::read_to_string(path).ok()?;
    let value: Value = serde_json::from_str(&content).ok()?;
    match value.get("command_history") {
        Some(Value::Array(history)) => Some(history.len()),
        Some(_) => None,
        None => Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_name_round_trips_session_id() {
        let name = session_file_name("20240101_120000");
        assert_eq!(name, ".termax_memory_20240101_120000.json");
        assert_eq!(session_id_from_file_name(&name), Some("20240101_120000"));
    }

    #[test]
    fn rejects_foreign_file_names() {
        assert_eq!(session_id_from_file_name("notes.json"), None);
        assert_eq!(session_id_from_file_name(".termax_memory_.json"), None);
        assert_eq!(session_id_from_file_name(".termax_memory_abc.yaml"), None);
    }

    #[test]
    fn default_session_id_shape() {
        let id = timestamp_session_id();
        assert_eq!(id.len(), 15);
        assert_eq!(id.as_bytes()[8], b'_');
        assert!(id.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn list_sessions_sorted_and_filtered() {
        let dir = TempDir::new().expect("tempdir should create");
        fs::write(
            dir.path().join(session_file_name("b")),
            r#"{"session_id":"b","command_history":[{"command":"ls"}],"context":{}}"#,
        )
        .expect("write session b");
        fs::write(dir.path().join(session_file_name("a")), "not json").expect("write session a");
        fs::write(dir.path().join("other.json"), "{}").expect("write unrelated file");

        let sessions = list_sessions(dir.path()).expect("listing should succeed");
        let ids: Vec<_> = sessions.iter().map(|s| s.session_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(sessions[0].commands, None);
        assert_eq!(sessions[1].commands, Some(1));
    }

    #[test]
    fn list_sessions_missing_dir() {
        let dir = TempDir::new().expect("tempdir should create");
        assert!(list_sessions(&dir.path().join("missing")).is_err());
    }
}
