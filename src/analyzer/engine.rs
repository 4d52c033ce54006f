// SPDX-License-Identifier: PMPL-1.0-or-later

//! Command outcome classification

use crate::analyzer::patterns::PatternTable;
use crate::types::*;
use regex::Regex;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
];

pub struct CommandAnalyzer {
    patterns: PatternTable,
    word_re: Regex,
}

impl CommandAnalyzer {
    pub fn new() -> Self {
        Self {
            patterns: PatternTable::new(),
            word_re: Regex::new(r"\w+").expect("static word pattern must compile"),
        }
    }

    /// Classify one executed command.
    ///
    /// A zero exit code with empty stderr is a success. Anything else is a
    /// failure whose category comes from the first matching stderr pattern.
    pub fn analyze(
        &self,
        _command: &str,
        stdout: &str,
        stderr: &str,
        return_code: i32,
    ) -> CommandAnalysis {
        if return_code == 0 && stderr.is_empty() {
            return CommandAnalysis {
                success: true,
                error_type: None,
                suggestion: None,
                details: AnalysisDetails {
                    stdout: stdout.to_string(),
                    stderr: None,
                    return_code: None,
                },
            };
        }

        let error_type = self.patterns.classify(stderr);
        let suggestion = error_type.map(|category| category.suggestion().to_string());

        CommandAnalysis {
            success: false,
            error_type,
            suggestion,
            details: AnalysisDetails {
                stdout: stdout.to_string(),
                stderr: Some(stderr.to_string()),
                return_code: Some(return_code),
            },
        }
    }

    pub fn analyze_outcome(&self, command: &str, outcome: &ExecutionOutcome) -> CommandAnalysis {
        self.analyze(command, &outcome.stdout, &outcome.stderr, outcome.return_code)
    }

    pub fn analyze_multiple_commands(&self, commands: &[CommandInput]) -> Vec<CommandAnalysis> {
        commands
            .iter()
            .map(|cmd| self.analyze(&cmd.command, &cmd.stdout, &cmd.stderr, cmd.return_code))
            .collect()
    }

    /// Lower-cased word tokens with common stop words removed.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.word_re
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|word| !STOP_WORDS.contains(word))
            .map(str::to_string)
            .collect()
    }
}

impl Default for CommandAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
