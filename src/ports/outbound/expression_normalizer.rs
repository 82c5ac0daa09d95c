use crate::shared::Result;

/// ExpressionNormalizer port: canonicalizes license names and boolean
/// license expressions.
///
/// An external collaborator like the text matcher. All three operations
/// may fail on malformed expressions; that failure is distinct from "no
/// license found" and callers degrade to the raw string instead of
/// dropping the signal.
pub trait ExpressionNormalizer {
    /// Canonicalizes a single license name or alias, e.g.
    /// `"Apache Software License"` to `"Apache-2.0"`.
    fn normalize(&self, raw: &str) -> Result<String>;

    /// Simplifies the conjunction of several expressions into one, e.g.
    /// `["MIT", "MIT", "Apache-2.0"]` to `"Apache-2.0 AND MIT"`.
    fn simplify(&self, expressions: &[String]) -> Result<String>;

    /// Validates an expression against the normalizer's ruleset.
    fn validate(&self, expression: &str) -> Result<bool>;
}
