use crate::resolution::domain::LicenseSignal;
use serde::{Deserialize, Serialize};

/// A repository URL suggested by registry metadata, with the metadata
/// location that suggested it for the provenance trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSuggestion {
    pub repository: String,
    pub metadata_url: String,
    pub metadata_path: String,
}

impl RepoSuggestion {
    pub fn new(
        repository: impl Into<String>,
        metadata_url: impl Into<String>,
        metadata_path: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            metadata_url: metadata_url.into(),
            metadata_path: metadata_path.into(),
        }
    }
}

/// Ecosystem-specific package metadata scraped from a registry endpoint.
///
/// Declared license signals are ordered by field priority (the declared
/// license field outranks classifier-derived entries); repository
/// suggestions are ordered by the fixed key-path walk of the adapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: Option<String>,
    pub version: Option<String>,
    pub homepage: Option<String>,
    /// The registry endpoint the metadata was read from.
    pub metadata_url: String,
    pub declared: Vec<LicenseSignal>,
    pub repo_suggestions: Vec<RepoSuggestion>,
}

impl PackageMetadata {
    /// Deduplicated repository URLs in suggestion order.
    pub fn unique_repositories(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.repo_suggestions
            .iter()
            .map(|s| s.repository.as_str())
            .filter(|r| seen.insert(*r))
            .collect()
    }
}
