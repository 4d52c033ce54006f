// SPDX-License-Identifier: PMPL-1.0-or-later

//! Ordered stderr pattern table used for error classification

use crate::types::ErrorCategory;
use regex::{Regex, RegexBuilder};

pub struct ErrorPattern {
    pub category: ErrorCategory,
    regex: Regex,
}

impl ErrorPattern {
    fn new(category: ErrorCategory, source: &'static str) -> Self {
        let regex = RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .expect("static error pattern must compile");
        Self { category, regex }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

pub struct PatternTable {
    patterns: Vec<ErrorPattern>,
}

impl PatternTable {
    pub fn new() -> Self {
        Self {
            patterns: ErrorCategory::all()
                .into_iter()
                .map(|category| ErrorPattern::new(category, Self::source_for(category)))
                .collect(),
        }
    }

    fn source_for(category: ErrorCategory) -> &'static str {
        match category {
            ErrorCategory::PermissionDenied => r"Permission denied|Access denied",
            ErrorCategory::NotFound => r"No such file or directory|command not found",
            ErrorCategory::SyntaxError => r"syntax error|invalid syntax",
            ErrorCategory::ConnectionError => r"Connection refused|Connection timed out",
            ErrorCategory::DiskSpace => r"No space left on device|disk full",
        }
    }

    /// First category whose pattern matches, in table order.
    pub fn classify(&self, stderr: &str) -> Option<ErrorCategory> {
        self.patterns
            .iter()
            .find(|pattern| pattern.is_match(stderr))
            .map(|pattern| pattern.category)
    }

    pub fn patterns(&self) -> &[ErrorPattern] {
        &self.patterns
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_categories() {
        let table = PatternTable::new();
        let order: Vec<_> = table.patterns().iter().map(|p| p.category).collect();
        assert_eq!(order, ErrorCategory::all().to_vec());
    }

    #[test]
    fn test_each_pattern_matches_both_alternatives() {
        let table = PatternTable::new();
        let samples = [
            ("access denied for user", ErrorCategory::PermissionDenied),
            ("bash: foo: command not found", ErrorCategory::NotFound),
            ("SyntaxError: invalid syntax", ErrorCategory::SyntaxError),
            ("ssh: connect: Connection timed out", ErrorCategory::ConnectionError),
            ("write failed: disk full", ErrorCategory::DiskSpace),
        ];
        for (text, expected) in samples {
            assert_eq!(table.classify(text), Some(expected), "{text}");
        }
    }

    #[test]
    fn test_unmatched_text() {
        let table = PatternTable::new();
        assert_eq!(table.classify("segmentation fault"), None);
        assert_eq!(table.classify(""), None);
    }
}
