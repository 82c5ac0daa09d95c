use crate::ports::outbound::ExpressionNormalizer;
use crate::shared::Result;
use anyhow::bail;
use std::collections::BTreeSet;

/// Common aliases registries use for well-known licenses, lowercase.
const ALIASES: &[(&str, &str)] = &[
    ("mit", "MIT"),
    ("mit license", "MIT"),
    ("expat", "MIT"),
    ("apache", "Apache-2.0"),
    ("apache 2", "Apache-2.0"),
    ("apache 2.0", "Apache-2.0"),
    ("apache-2", "Apache-2.0"),
    ("apache license", "Apache-2.0"),
    ("apache license 2.0", "Apache-2.0"),
    ("apache license, version 2.0", "Apache-2.0"),
    ("apache software license", "Apache-2.0"),
    ("bsd", "BSD-3-Clause"),
    ("bsd license", "BSD-3-Clause"),
    ("new bsd license", "BSD-3-Clause"),
    ("simplified bsd license", "BSD-2-Clause"),
    ("gpl", "GPL-3.0-only"),
    ("gplv2", "GPL-2.0-only"),
    ("gplv3", "GPL-3.0-only"),
    ("gnu general public license v3", "GPL-3.0-only"),
    ("gnu general public license v3 (gplv3)", "GPL-3.0-only"),
    ("gnu general public license v2 (gplv2)", "GPL-2.0-only"),
    ("lgpl", "LGPL-2.1-only"),
    ("lgplv2.1", "LGPL-2.1-only"),
    ("gnu lesser general public license v2.1 (lgplv2.1)", "LGPL-2.1-only"),
    ("mozilla public license 2.0 (mpl 2.0)", "MPL-2.0"),
    ("mpl 2.0", "MPL-2.0"),
    ("isc license (iscl)", "ISC"),
    ("isc", "ISC"),
    ("the unlicense (unlicense)", "Unlicense"),
    ("python software foundation license", "PSF-2.0"),
    ("zlib/libpng license", "Zlib"),
];

/// AliasNormalizer adapter: canonicalizes license names via an alias
/// table and handles boolean expressions token-wise.
///
/// Implements the ExpressionNormalizer port as a reference
/// implementation; a production deployment would delegate to a full
/// license database. Unknown single names pass through as themselves
/// when they already look like identifiers (no whitespace); anything
/// else is a normalization failure, which callers treat as "keep the
/// raw string".
pub struct AliasNormalizer;

impl AliasNormalizer {
    pub fn new() -> Self {
        Self
    }

    fn normalize_single(&self, raw: &str) -> Result<String> {
        let trimmed = raw.trim().trim_matches(|c| c == '(' || c == ')').trim();
        if trimmed.is_empty() {
            bail!("empty license name");
        }
        // Classifier-style tags keep only their trailing segment.
        let name = trimmed.rsplit("::").next().unwrap_or(trimmed).trim();
        if let Some((_, canonical)) = ALIASES
            .iter()
            .find(|(alias, _)| *alias == name.to_lowercase())
        {
            return Ok(canonical.to_string());
        }
        if name.contains(char::is_whitespace) {
            bail!("unrecognized license name: {name}");
        }
        Ok(name.to_string())
    }
}

impl Default for AliasNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionNormalizer for AliasNormalizer {
    fn normalize(&self, raw: &str) -> Result<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            bail!("empty license expression");
        }
        let upper = trimmed.to_uppercase();
        if upper.contains(" AND ") || upper.contains(" OR ") {
            // Token-wise normalization of a boolean expression, keeping
            // the operators in place.
            let mut out = Vec::new();
            for token in trimmed.split_whitespace() {
                match token.to_uppercase().as_str() {
                    "AND" | "OR" | "WITH" => out.push(token.to_uppercase()),
                    _ => out.push(self.normalize_single(token)?),
                }
            }
            return Ok(out.join(" "));
        }
        self.normalize_single(trimmed)
    }

    fn simplify(&self, expressions: &[String]) -> Result<String> {
        if expressions.is_empty() {
            bail!("nothing to simplify");
        }
        let mut conjuncts = BTreeSet::new();
        for expression in expressions {
            let normalized = self.normalize(expression)?;
            if normalized.to_uppercase().contains(" OR ") {
                // Disjunctions stay grouped inside the conjunction.
                conjuncts.insert(format!("({})", normalized));
            } else {
                for part in normalized.split(" AND ") {
                    conjuncts.insert(part.trim().to_string());
                }
            }
        }
        Ok(conjuncts.into_iter().collect::<Vec<_>>().join(" AND "))
    }

    fn validate(&self, expression: &str) -> Result<bool> {
        Ok(self.normalize(expression).is_ok())
    }
}
