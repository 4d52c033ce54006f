// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console rendering of analyses, history and context

use crate::storage::SessionSummary;
use crate::types::*;
use colored::*;
use serde_json::Value;

pub struct ReportFormatter {
    show_output: bool,
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self { show_output: true }
    }

    pub fn quiet() -> Self {
        Self { show_output: false }
    }

    pub fn print_record(&self, record: &CommandRecord) {
        match &record.analysis {
            Some(analysis) => self.print_analysis(&record.command, analysis),
            None => {
                let status = if record.succeeded() {
                    "OK".green()
                } else {
                    "FAILED".red()
                };
                println!("[{}] {}", status, record.command.bold());
            }
        }
    }

    pub fn print_analysis(&self, command: &str, analysis: &CommandAnalysis) {
        if analysis.success {
            println!("{}", "Command completed successfully:".green());
            println!("  {}", command.bold());
            if self.show_output && !analysis.details.stdout.is_empty() {
                print!("{}", ensure_newline(&analysis.details.stdout));
            }
            return;
        }

        println!("{}", "Command failed:".red());
        println!("  {}", command.bold());
        if let Some(code) = analysis.details.return_code {
            println!("  Exit code: {}", code);
        }
        if self.show_output {
            if let Some(stderr) = analysis.details.stderr.as_deref().filter(|s| !s.is_empty()) {
                print!("{}", ensure_newline(stderr));
            }
        }
        match analysis.error_type {
            Some(category) => println!("  Category: {}", category.as_str().cyan()),
            None => println!("  Category: {}", "unclassified".dimmed()),
        }
        if let Some(suggestion) = &analysis.suggestion {
            println!("{} {}", "Suggestion:".yellow().bold(), suggestion.yellow());
        }
    }

    pub fn print_history(&self, session_id: &str, records: &[CommandRecord]) {
        println!("{} {}", "SESSION".bold().yellow(), session_id);
        if records.is_empty() {
            println!("  {}", "no commands recorded".dimmed());
            return;
        }

        for (i, record) in records.iter().enumerate() {
            let status = if record.succeeded() {
                "ok".green()
            } else {
                "failed".red()
            };
            let category = record
                .analysis
                .as_ref()
                .and_then(|a| a.error_type)
                .map(|c| format!(" ({})", c))
                .unwrap_or_default();
            println!(
                "  {}. [{}{}] {} {}",
                i + 1,
                status,
                category,
                record.command.bold(),
                record.timestamp.as_deref().unwrap_or("").dimmed()
            );
        }
    }

    pub fn print_context(&self, value: &Value) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{}", text),
            Err(_) => println!("{}", value),
        }
    }

    pub fn print_sessions(&self, sessions: &[SessionSummary]) {
        if sessions.is_empty() {
            println!("{}", "No stored sessions".dimmed());
            return;
        }
        println!("{}", "STORED SESSIONS".bold().yellow());
        for session in sessions {
            let commands = match session.commands {
                Some(count) => format!("{} commands", count),
                None => "unreadable".red().to_string(),
            };
            println!("  {:20} {}", session.session_id.bold(), commands);
        }
    }

    pub fn print_keywords(&self, keywords: &[String]) {
        if keywords.is_empty() {
            println!("{}", "(no keywords)".dimmed());
        } else {
            println!("{}", keywords.join(" "));
        }
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_newline(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{}\n", text)
    }
}
