use serde::{Deserialize, Serialize};

/// Which of the three independent source families produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalOrigin {
    PackageMetadata,
    RepositoryFile,
    Provider,
}

/// One raw, unreconciled license claim from a single origin.
///
/// Different signals may name the same license via different raw strings
/// ("MIT License", "MIT", "Expat"); reconciliation happens only in the
/// aggregator, never at collection time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseSignal {
    pub origin: SignalOrigin,
    pub raw_license: String,
    pub source_url: String,
    /// Matcher confidence where applicable (repository-file signals).
    pub score: Option<f64>,
}

impl LicenseSignal {
    pub fn new(
        origin: SignalOrigin,
        raw_license: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            origin,
            raw_license: raw_license.into(),
            source_url: source_url.into(),
            score: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

/// One external license database's answer for a package coordinate.
///
/// "No answer" (license `None`) is an expected outcome and distinct from
/// an error; both are retained for the provenance trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAnswer {
    pub provider: String,
    pub license: Option<String>,
    /// The provider endpoint that was queried, when one could be built.
    pub data_url: Option<String>,
    /// The path within the provider response the license was read from.
    pub data_path: Option<String>,
    pub error: Option<String>,
}

impl ProviderAnswer {
    pub fn no_answer(provider: impl Into<String>, error: Option<String>) -> Self {
        Self {
            provider: provider.into(),
            license: None,
            data_url: None,
            data_path: None,
            error,
        }
    }

    pub fn answered(&self) -> bool {
        self.license.is_some()
    }
}

/// Provider answers keyed by provider name, in stable order.
pub type ProviderAnswers = std::collections::BTreeMap<String, ProviderAnswer>;
