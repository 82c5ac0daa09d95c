use crate::ports::outbound::{ContentFetcher, TextMatcher};
use crate::resolution::domain::{
    CandidateSource, CandidateUrl, FailedUrl, FailureReason, RepoLookupResult, SucceededUrl,
};
use crate::resolution::services::CandidateGenerator;
use crate::shared::Result;
use tracing::{debug, warn};

/// Scans a repository reference for license files.
///
/// Combines the candidate generator with the content fetcher and the
/// text matcher. Candidates are tried strictly in rank order; the first
/// filename with a text match wins, but the whole branch tier is
/// exhausted before falling back to the next branch, and a matching
/// filename's tag-retry variant is still evaluated. Every attempt,
/// failed or succeeded, is retained for the provenance trail.
pub struct RepoScanner<'a> {
    fetcher: &'a dyn ContentFetcher,
    matcher: &'a dyn TextMatcher,
    min_score: f64,
    generator: CandidateGenerator,
}

impl<'a> RepoScanner<'a> {
    pub fn new(fetcher: &'a dyn ContentFetcher, matcher: &'a dyn TextMatcher, min_score: f64) -> Self {
        Self {
            fetcher,
            matcher,
            min_score,
            generator: CandidateGenerator::new(),
        }
    }

    /// Generates candidates for `repo_ref` and scans them.
    ///
    /// Fails only for an unsupported code host; everything that goes
    /// wrong per-candidate is recorded in the result instead.
    pub fn lookup_url(&self, repo_ref: &str) -> Result<RepoLookupResult> {
        let suggestions = self.generator.suggest_license_files(repo_ref, None)?;
        Ok(self.scan(repo_ref, suggestions))
    }

    /// Scans a single caller-supplied license-file URL.
    pub fn lookup_file_url(&self, url: &str) -> Result<RepoLookupResult> {
        let suggestions = self.generator.suggest_for_file_url(url)?;
        Ok(self.scan(url, suggestions))
    }

    /// Scans pre-generated candidate tiers in rank order.
    pub fn scan(&self, provided: &str, suggestions: Vec<Vec<CandidateUrl>>) -> RepoLookupResult {
        let mut result = RepoLookupResult::empty(provided);

        for tier in &suggestions {
            let mut matched_in_tier = false;
            let mut index = 0;
            while index < tier.len() {
                let matched = self.try_candidate(&tier[index], &mut result);
                if matched {
                    matched_in_tier = true;
                    // The matching filename may still have tag-retry
                    // variants queued directly behind it; evaluate those
                    // before stopping the tier.
                    let mut next = index + 1;
                    while next < tier.len() && tier[next].source == CandidateSource::TagRetry {
                        self.try_candidate(&tier[next], &mut result);
                        next += 1;
                    }
                    break;
                }
                index += 1;
            }
            // First branch tier with a signal wins; lower-ranked tiers
            // are never tried once a signal is found.
            if matched_in_tier {
                break;
            }
        }

        result.suggestions = suggestions;
        result.success = !result.identified.is_empty();
        result
    }

    /// Downloads and evaluates one candidate. Returns true when the
    /// candidate yielded at least one license match.
    fn try_candidate(&self, candidate: &CandidateUrl, result: &mut RepoLookupResult) -> bool {
        debug!(url = %candidate.raw_url, rank = candidate.rank, "trying candidate");
        let outcome = self.fetcher.fetch(&candidate.raw_url);

        if !outcome.succeeded {
            result.failed_urls.push(FailedUrl {
                url: candidate.raw_url.clone(),
                original_url: candidate.original_url.clone(),
                reason: FailureReason::Download,
                status: outcome.status,
                content_kind: None,
            });
            return false;
        }
        if !outcome.is_text() {
            result.failed_urls.push(FailedUrl {
                url: candidate.raw_url.clone(),
                original_url: candidate.original_url.clone(),
                reason: FailureReason::Classification,
                status: outcome.status,
                content_kind: Some(outcome.content_kind),
            });
            return false;
        }

        let content = outcome.content.as_deref().unwrap_or_default();
        let matches = match self.matcher.match_text(content) {
            Ok(matches) => matches,
            Err(e) => {
                warn!(url = %candidate.raw_url, error = %e, "text matcher failed");
                Vec::new()
            }
        };
        let licenses: Vec<String> = matches
            .into_iter()
            .filter(|m| m.score >= self.min_score)
            .map(|m| m.expression)
            .collect();

        if licenses.is_empty() {
            result.failed_urls.push(FailedUrl {
                url: candidate.raw_url.clone(),
                original_url: candidate.original_url.clone(),
                reason: FailureReason::NoMatch,
                status: outcome.status,
                content_kind: Some(outcome.content_kind),
            });
            return false;
        }

        debug!(url = %candidate.raw_url, licenses = ?licenses, "candidate matched");
        result.identified.extend(licenses.iter().cloned());
        result.succeeded_urls.push(SucceededUrl {
            url: candidate.raw_url.clone(),
            original_url: candidate.original_url.clone(),
            licenses,
        });
        true
    }
}
