// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration loading: file, then environment, then CLI flags.

use crate::storage;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json;
use serde_yaml;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const MODEL_ENV: &str = "TERMAX_MODEL";
pub const SESSION_ENV: &str = "TERMAX_SESSION";
pub const MEMORY_DIR_ENV: &str = "TERMAX_MEMORY_DIR";

pub const DEFAULT_MODEL: &str = "ollama/mistral";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Session to resume. A fresh timestamp id is used when unset.
    pub session_id: Option<String>,
    pub memory_dir: PathBuf,
    pub model: String,
    /// Records shown by `history` when no limit is given.
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_id: None,
            memory_dir: PathBuf::from("."),
            model: DEFAULT_MODEL.to_string(),
            recent_limit: 5,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("parsing json config {}", path.display())),
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("parsing yaml config {}", path.display())),
            _ => Err(anyhow!("unsupported config extension for {}", path.display())),
        }
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Override fields from `lookup`; blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(model) = get(MODEL_ENV) {
            self.model = model;
        }
        if let Some(session) = get(SESSION_ENV) {
            self.session_id = Some(session);
        }
        if let Some(dir) = get(MEMORY_DIR_ENV) {
            self.memory_dir = PathBuf::from(dir);
        }
    }

    pub fn resolve_session_id(&self) -> String {
        match &self.session_id {
            Some(id) if !id.trim().is_empty() => id.clone(),
            _ => {
                let id = storage::timestamp_session_id();
                debug!(session = %id, "starting new session");
                id
            }
        }
    }

    pub fn session_path(&self, session_id: &str) -> PathBuf {
        storage::session_path(&self.memory_dir, session_id)
    }
}
