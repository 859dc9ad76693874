//! Fill-in-the-blank checking
//!
//! Blanks compare case-insensitively after trimming surrounding whitespace.

use serde::{Deserialize, Serialize};

/// One blank in a code exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blank {
    pub expected: String,
    pub given: String,
}

impl Blank {
    pub fn new(expected: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            given: given.into(),
        }
    }

    pub fn is_correct(&self) -> bool {
        normalize(&self.given) == normalize(&self.expected)
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Result of checking an exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillBlankOutcome {
    /// Correctness per blank, in input order
    pub results: Vec<bool>,
    pub all_correct: bool,
}

impl FillBlankOutcome {
    pub fn feedback(&self) -> &'static str {
        if self.all_correct {
            "✅ All blanks filled correctly!"
        } else {
            "❌ Some answers are incorrect. Check the highlighted fields."
        }
    }
}

/// Check every blank. An exercise without blanks counts as all correct.
pub fn check_blanks(blanks: &[Blank]) -> FillBlankOutcome {
    let results: Vec<bool> = blanks.iter().map(Blank::is_correct).collect();
    let all_correct = results.iter().all(|&ok| ok);
    FillBlankOutcome { results, all_correct }
}
