// SPDX-License-Identifier: PMPL-1.0-or-later

//! Interactive session loop

use crate::analyzer::CommandAnalyzer;
use crate::memory::SessionMemory;
use crate::report::ReportFormatter;
use crate::shell::ShellExecutor;
use crate::suggest::Suggester;
use anyhow::Result;
use colored::*;
use std::io::{self, BufRead, Write};
use tracing::warn;

pub const PROMPT: &str = "termax> ";
pub const EXIT_COMMANDS: &[&str] = &["exit", "quit"];

/// Everything one interactive session needs.
pub struct Repl<'a, S: Suggester + ?Sized> {
    pub suggester: &'a S,
    pub executor: &'a ShellExecutor,
    pub analyzer: &'a CommandAnalyzer,
    pub memory: &'a mut SessionMemory,
    pub formatter: &'a ReportFormatter,
}

enum ReadLineResult {
    Input(String),
    Skip,
    Exit,
}

/// Next line decoded lossily, or `None` at EOF.
fn read_line<R: BufRead>(input: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if input.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

fn classify_line(line: Option<String>) -> ReadLineResult {
    match line {
        Some(input) => {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                ReadLineResult::Skip
            } else if EXIT_COMMANDS.contains(&trimmed.to_lowercase().as_str()) {
                ReadLineResult::Exit
            } else {
                ReadLineResult::Input(trimmed.to_string())
            }
        }
        None => ReadLineResult::Exit,
    }
}

impl<S: Suggester + ?Sized> Repl<'_, S> {
    /// Read lines from `input` until EOF or an exit command.
    ///
    /// Returns the number of commands executed. Errors from a single line are
    /// printed and the loop carries on; only reading input can abort it.
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<usize> {
        println!("{}", "termax - shell assistant".bold().blue());
        println!(
            "Session {} (suggester: {}). Type 'exit' to quit.",
            self.memory.session_id(),
            self.suggester.name()
        );

        let mut buf = Vec::new();
        let mut executed = 0;
        loop {
            print!("{}", PROMPT.bold().blue());
            io::stdout().flush()?;

            let line = read_line(&mut input, &mut buf)?;
            match classify_line(line) {
                ReadLineResult::Skip => continue,
                ReadLineResult::Exit => break,
                ReadLineResult::Input(text) => match self.handle_line(&text) {
                    Ok(true) => executed += 1,
                    Ok(false) => {}
                    Err(err) => {
                        warn!(error = %err, "repl line failed");
                        println!("{} {:#}", "Error:".red().bold(), err);
                    }
                },
            }
        }
        Ok(executed)
    }

    fn handle_line(&mut self, text: &str) -> Result<bool> {
        let context = self.memory.get_command_suggestion_context();
        let Some(command) = self.suggester.suggest(text, &context)? else {
            println!("{}", "Could not produce a command".red());
            return Ok(false);
        };

        let record = self
            .executor
            .run_and_record(&command, self.analyzer, self.memory)?;
        self.formatter.print_record(&record);
        Ok(true)
    }
}
