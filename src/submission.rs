//! Submitted answers, keyed by field name.
//!
//! ```json
//! { "program_language": "B", "other": "Rust, Python, C++" }
//! ```
//!
//! For select fields the value is the *name* of the chosen label, not its
//! display text.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Flat mapping from field name to answer. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentSubmission {
    answers: HashMap<String, String>,
}

impl ContentSubmission {
    /// Parse a JSON object of string values.
    pub fn from_json(json: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(json)
    }

    /// Raw answer for a field, empty strings included.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.answers.get(field).map(|s| s.as_str())
    }

    /// Non-empty answer for a field.
    pub fn answer(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ContentSubmission {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            answers: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Non-empty answer for `field`, treating a missing store like a missing key.
pub fn lookup<'a>(submission: Option<&'a ContentSubmission>, field: &str) -> Option<&'a str> {
    submission.and_then(|s| s.answer(field))
}
