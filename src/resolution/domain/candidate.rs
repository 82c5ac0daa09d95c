use serde::{Deserialize, Serialize};

/// Where a candidate URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateSource {
    /// The caller handed us this URL directly.
    UserUrl,
    /// Guessed from a conventional branch name and license filename.
    BranchGuess,
    /// Retry variant with a `v` inserted in front of a release tag.
    TagRetry,
    /// Suggested by registry package metadata.
    PackageMetadata,
}

/// A ranked, generated guess at a location containing license text.
///
/// `raw_url` is what gets downloaded; `original_url` preserves the
/// human-facing reference for the provenance trail even after raw-content
/// rewriting. `rank` is the trial tier (branch priority): all candidates
/// of one tier are exhausted before any candidate of the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateUrl {
    pub raw_url: String,
    pub original_url: String,
    pub rank: usize,
    pub source: CandidateSource,
}

impl CandidateUrl {
    pub fn new(
        raw_url: impl Into<String>,
        original_url: impl Into<String>,
        rank: usize,
        source: CandidateSource,
    ) -> Self {
        Self {
            raw_url: raw_url.into(),
            original_url: original_url.into(),
            rank,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_url_preserves_original() {
        let candidate = CandidateUrl::new(
            "https://raw.githubusercontent.com/x/y/refs/heads/main/LICENSE",
            "https://github.com/x/y",
            0,
            CandidateSource::BranchGuess,
        );
        assert_eq!(candidate.original_url, "https://github.com/x/y");
        assert_eq!(candidate.rank, 0);
    }
}
