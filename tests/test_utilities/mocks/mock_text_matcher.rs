use license_lookup::prelude::*;
use std::collections::HashMap;

/// Mock TextMatcher mapping content substrings to license expressions.
pub struct MockTextMatcher {
    table: HashMap<String, Vec<LicenseMatch>>,
}

impl MockTextMatcher {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Any text containing `needle` matches `expression` at `score`.
    pub fn with_match(mut self, needle: &str, expression: &str, score: f64) -> Self {
        self.table
            .entry(needle.to_string())
            .or_default()
            .push(LicenseMatch {
                expression: expression.to_string(),
                score,
            });
        self
    }
}

impl Default for MockTextMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMatcher for MockTextMatcher {
    fn match_text(&self, text: &str) -> Result<Vec<LicenseMatch>> {
        let mut matches = Vec::new();
        for (needle, found) in &self.table {
            if text.contains(needle) {
                matches.extend(found.iter().cloned());
            }
        }
        Ok(matches)
    }
}
