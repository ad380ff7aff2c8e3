//! Personal inputs and candidate policy for a generation session.

use serde::{Deserialize, Serialize};

/// Default minimum candidate length for new sessions.
pub const DEFAULT_MIN_LENGTH: usize = 8;

/// Personal data a session expands rules against.
///
/// Provided once when the session is created and never changed afterwards;
/// resumption relies on the profile being identical across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputProfile {
    /// Names, nicknames, pet names and similar free text.
    pub strings: Vec<String>,
    /// Raw `D/M/YYYY` date strings. Not validated.
    pub dates: Vec<String>,
    /// Favourite numbers, house numbers, phone fragments.
    pub numbers: Vec<String>,
}

impl InputProfile {
    pub fn new(strings: Vec<String>, dates: Vec<String>, numbers: Vec<String>) -> Self {
        Self {
            strings,
            dates,
            numbers,
        }
    }

    /// Input strings with empty entries removed, in their original order.
    pub fn usable_strings(&self) -> Vec<&str> {
        self.strings
            .iter()
            .map(String::as_str)
            .filter(|value| !value.is_empty())
            .collect()
    }
}

/// Length and character-class policy applied to expanded candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub must_include_uppercase: bool,
    /// Require at least one character that is neither a letter nor a digit.
    pub must_include_symbol: bool,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_length: Some(DEFAULT_MIN_LENGTH),
            max_length: None,
            must_include_uppercase: false,
            must_include_symbol: false,
        }
    }
}

impl Constraints {
    /// Constraints that accept every non-empty candidate.
    pub fn unrestricted() -> Self {
        Self {
            min_length: None,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_min_length(mut self, min_length: Option<usize>) -> Self {
        self.min_length = min_length;
        self
    }

    #[must_use]
    pub fn with_max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    #[must_use]
    pub fn with_uppercase(mut self, required: bool) -> Self {
        self.must_include_uppercase = required;
        self
    }

    #[must_use]
    pub fn with_symbol(mut self, required: bool) -> Self {
        self.must_include_symbol = required;
        self
    }
}
