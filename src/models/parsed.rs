//! Structured address rows produced by the decomposer.

use serde::{Deserialize, Serialize};

/// One structured row decomposed from a raw address line.
///
/// Fields are empty strings when the labeller could not assign them. A raw
/// line with a hyphenated integer unit range expands into several rows that
/// differ only in `unit`; `original` always carries the untouched input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedAddress {
    pub house_number: String,
    pub street: String,
    pub unit: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub original: String,
}

impl ParsedAddress {
    /// Fallback row for a line the labeller could not decompose: every
    /// structured field empty, original text preserved.
    pub fn unparsed(original: &str) -> Self {
        Self {
            original: original.to_string(),
            ..Self::default()
        }
    }

    /// House number and street rejoined, for the expanded export shape.
    pub fn street_address(&self) -> String {
        if self.house_number.is_empty() {
            self.street.clone()
        } else if self.street.is_empty() {
            self.house_number.clone()
        } else {
            format!("{} {}", self.house_number, self.street)
        }
    }
}
