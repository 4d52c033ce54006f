// SPDX-License-Identifier: PMPL-1.0-or-later

use crate::config::{Config, DEFAULT_MODEL, MODEL_ENV};
use crate::shell::ShellExecutor;
use crate::storage;
use anyhow::{anyhow, Result};
use std::fmt;
use std::fs;
use std::path::Path;

pub fn run_self_diagnostics(config: &Config) -> Result<()> {
    println!("termax self-diagnostics");

    let checks = collect_checks(config);

    println!();
    for entry in &checks {
        entry.print();
    }

    if checks.iter().any(|entry| entry.level == Level::Error) {
        Err(anyhow!("self-diagnostics reported issues"))
    } else {
        Ok(())
    }
}

pub(crate) fn collect_checks(config: &Config) -> Vec<Diagnostic> {
    vec![
        Diagnostic::ok("version", format!("termax {}", env!("CARGO_PKG_VERSION"))),
        check_memory_dir(&config.memory_dir),
        check_shell(&ShellExecutor::new()),
        check_model(&config.model),
        check_sessions(&config.memory_dir),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    Ok,
    Warn,
    Error,
}

pub(crate) struct Diagnostic {
    label: &'static str,
    level: Level,
    detail: String,
}

impl Diagnostic {
    fn ok(label: &'static str, detail: impl Into<String>) -> Self {
        Self { label, level: Level::Ok, detail: detail.into() }
    }

    fn warning(label: &'static str, detail: impl Into<String>) -> Self {
        Self { label, level: Level::Warn, detail: detail.into() }
    }

    fn error(label: &'static str, detail: impl Into<String>) -> Self {
        Self { label, level: Level::Error, detail: detail.into() }
    }

    fn print(&self) {
        println!("  [{}] {:18} {}", self.level, self.label, self.detail);
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Ok => "OK",
            Level::Warn => "WARN",
            Level::Error => "ERR",
        })
    }
}

fn check_memory_dir(path: &Path) -> Diagnostic {
    const LABEL: &str = "memory directory";
    if !path.exists() {
        return Diagnostic::error(LABEL, format!("{} missing", path.display()));
    }
    if !path.is_dir() {
        return Diagnostic::error(LABEL, format!("{} is not a directory", path.display()));
    }

    // Session files are written in place, so check with a real write.
    let scratch = path.join(".termax_write_check");
    match fs::write(&scratch, b"") {
        Ok(()) => {
            let _ = fs::remove_file(&scratch);
            Diagnostic::ok(LABEL, format!("{} writable", path.display()))
        }
        Err(err) => Diagnostic::error(
            LABEL,
            format!("{} not writable: {}", path.display(), err),
        ),
    }
}

fn check_shell(executor: &ShellExecutor) -> Diagnostic {
    let outcome = executor.execute_command("true");
    if outcome.succeeded() {
        Diagnostic::ok("shell", format!("{} available", executor.shell()))
    } else {
        Diagnostic::error(
            "shell",
            format!("{} unusable: {}", executor.shell(), outcome.stderr.trim()),
        )
    }
}

/// The model name is only reported; a non-default one means the user
/// set it in the config file or the environment.
fn check_model(model: &str) -> Diagnostic {
    if model.trim().is_empty() {
        Diagnostic::error("model", "no model configured")
    } else if model == DEFAULT_MODEL {
        Diagnostic::warning(
            "model",
            format!("{} (default; set {} or `model` in config to change)", model, MODEL_ENV),
        )
    } else {
        Diagnostic::ok("model", format!("{} (configured)", model))
    }
}

fn check_sessions(dir: &Path) -> Diagnostic {
    match storage::list_sessions(dir) {
        Ok(sessions) if sessions.is_empty() => {
            Diagnostic::warning("sessions", "no stored sessions yet".to_string())
        }
        Ok(sessions) => {
            let unreadable = sessions.iter().filter(|s| s.commands.is_none()).count();
            if unreadable > 0 {
                Diagnostic::warning(
                    "sessions",
                    format!("{} stored, {} unreadable", sessions.len(), unreadable),
                )
            } else {
                Diagnostic::ok("sessions", format!("{} stored", sessions.len()))
            }
        }
        Err(err) => Diagnostic::warning("sessions", format!("unable to list: {}", err)),
    }
}
