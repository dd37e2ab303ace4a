//! JSON report generator.
//!
//! Serializes a [`ComparisonResult`] to the wire shape consumed by the
//! hosting surface: camelCase field names, upper-snake enum values,
//! RFC 3339 timestamps.

use crate::diff::ComparisonResult;
use crate::error::Result;

/// JSON report generator.
pub struct JsonReporter {
    pretty: bool,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing.
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Render one comparison result.
    pub fn generate(&self, result: &ComparisonResult) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };
        Ok(rendered)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}
