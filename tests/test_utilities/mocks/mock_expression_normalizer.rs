use license_lookup::prelude::*;
use std::collections::HashMap;

/// Mock ExpressionNormalizer with a configurable alias table and an
/// optional always-fail switch for degradation tests.
pub struct MockExpressionNormalizer {
    aliases: HashMap<String, String>,
    fail_everything: bool,
}

impl MockExpressionNormalizer {
    pub fn new() -> Self {
        Self {
            aliases: HashMap::new(),
            fail_everything: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            aliases: HashMap::new(),
            fail_everything: true,
        }
    }

    pub fn with_alias(mut self, raw: &str, canonical: &str) -> Self {
        self.aliases.insert(raw.to_string(), canonical.to_string());
        self
    }
}

impl Default for MockExpressionNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionNormalizer for MockExpressionNormalizer {
    fn normalize(&self, raw: &str) -> Result<String> {
        if self.fail_everything {
            anyhow::bail!("normalizer offline");
        }
        Ok(self
            .aliases
            .get(raw)
            .cloned()
            .unwrap_or_else(|| raw.to_string()))
    }

    fn simplify(&self, expressions: &[String]) -> Result<String> {
        if self.fail_everything {
            anyhow::bail!("normalizer offline");
        }
        let mut unique: Vec<String> = expressions.to_vec();
        unique.sort();
        unique.dedup();
        Ok(unique.join(" AND "))
    }

    fn validate(&self, _expression: &str) -> Result<bool> {
        Ok(!self.fail_everything)
    }
}
