// SPDX-License-Identifier: PMPL-1.0-or-later

//! Turning user input into a shell command
//!
//! A model-backed implementation would sit behind [`Suggester`]. The only one
//! shipped treats the input as the command itself.

use crate::types::SuggestionContext;
use anyhow::Result;

pub trait Suggester {
    /// Command to run for `input`, or `None` when nothing sensible comes out.
    fn suggest(&self, input: &str, context: &SuggestionContext) -> Result<Option<String>>;

    fn name(&self) -> &str;
}

pub struct LiteralSuggester;

impl Suggester for LiteralSuggester {
    fn suggest(&self, input: &str, _context: &SuggestionContext) -> Result<Option<String>> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    fn name(&self) -> &str {
        "literal"
    }
}
