use crate::shared::Result;
use serde::{Deserialize, Serialize};

/// One candidate license identified in a body of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseMatch {
    /// License identifier or expression, e.g. `MIT` or `MIT OR Apache-2.0`.
    pub expression: String,
    /// Confidence in the range 0.0..=1.0.
    pub score: f64,
}

/// TextMatcher port: maps arbitrary license text to candidate license
/// identifiers with confidence scores.
///
/// The matcher is an external collaborator; this crate never contains
/// real matching logic. Implementations must be deterministic for
/// identical input and return an empty list, not an error, when nothing
/// matches.
pub trait TextMatcher {
    fn match_text(&self, text: &str) -> Result<Vec<LicenseMatch>>;
}
