use crate::resolution::domain::{CandidateUrl, ContentKind, ProviderAnswers};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The shape of the identifier the caller handed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierKind {
    /// Raw license text.
    Text,
    /// A local file containing license text.
    File,
    /// A direct URL (registry page, repository or license file).
    Url,
    /// A purl-style package coordinate.
    PackageUrl,
    /// A bare `name@version` / `name==version` token.
    PackageSpec,
}

/// Why a candidate URL was recorded as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    /// Network error or non-2xx status.
    Download,
    /// Payload retrieved but not plain text.
    Classification,
    /// Plain text retrieved but the matcher found nothing above threshold.
    NoMatch,
}

/// A candidate that did not yield a license, kept for provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedUrl {
    pub url: String,
    pub original_url: String,
    pub reason: FailureReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_kind: Option<ContentKind>,
}

/// A candidate whose text matched one or more licenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SucceededUrl {
    pub url: String,
    pub original_url: String,
    pub licenses: Vec<String>,
}

/// Result of scanning one repository reference for license files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoLookupResult {
    pub provided: String,
    /// Raw license expressions reported by the matcher, in match order.
    pub identified: Vec<String>,
    /// Every candidate tier that was generated, for provenance.
    pub suggestions: Vec<Vec<CandidateUrl>>,
    pub failed_urls: Vec<FailedUrl>,
    pub succeeded_urls: Vec<SucceededUrl>,
    pub success: bool,
}

impl RepoLookupResult {
    /// An empty scan result for a reference that produced no candidates.
    pub fn empty(provided: impl Into<String>) -> Self {
        Self {
            provided: provided.into(),
            ..Default::default()
        }
    }
}

/// The full provenance trail of one resolution request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionDetail {
    /// Candidate tiers generated during repository scanning.
    pub suggestions: Vec<Vec<CandidateUrl>>,
    pub failed_urls: Vec<FailedUrl>,
    pub succeeded_urls: Vec<SucceededUrl>,
    /// Raw declared-license strings found in registry metadata.
    pub config_licenses: Vec<String>,
    /// Answers from every consulted external license database.
    pub providers: ProviderAnswers,
}

/// The final, deduplicated and normalized license determination.
///
/// Invariant: `success` is true exactly when `identified_licenses` is
/// non-empty. The detail block retains every attempted URL and provider
/// answer; the trail is part of the contract, not incidental logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedLicenseResult {
    pub provided: String,
    pub kind: IdentifierKind,
    pub identified_licenses: BTreeSet<String>,
    /// Simplified conjunction of all identified licenses, or a
    /// comma-joined fallback when bulk simplification failed.
    pub identified_license_string: Option<String>,
    pub success: bool,
    pub detail: ResolutionDetail,
}

impl AggregatedLicenseResult {
    /// A well-formed "nothing found" result.
    pub fn not_found(provided: impl Into<String>, kind: IdentifierKind) -> Self {
        Self {
            provided: provided.into(),
            kind,
            identified_licenses: BTreeSet::new(),
            identified_license_string: None,
            success: false,
            detail: ResolutionDetail::default(),
        }
    }
}
