use crate::ports::outbound::ExpressionNormalizer;
use crate::resolution::domain::{
    AggregatedLicenseResult, IdentifierKind, PackageMetadata, ProviderAnswers, RepoLookupResult,
    ResolutionDetail,
};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Merges license signals from package metadata, repository scanning and
/// external providers into one deduplicated, normalized result.
///
/// Raw strings are unioned first; each is normalized individually and
/// kept verbatim when normalization fails. The final expression is the
/// simplified conjunction of everything identified, degrading to a
/// comma-joined literal when bulk simplification fails. Success depends
/// only on the raw set being non-empty.
pub struct LicenseAggregator<'a> {
    normalizer: &'a dyn ExpressionNormalizer,
}

impl<'a> LicenseAggregator<'a> {
    pub fn new(normalizer: &'a dyn ExpressionNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn aggregate(
        &self,
        provided: &str,
        kind: IdentifierKind,
        package: Option<&PackageMetadata>,
        repo: Option<&RepoLookupResult>,
        providers: &ProviderAnswers,
    ) -> AggregatedLicenseResult {
        // Union of raw strings across all three origins, deduplicated by
        // exact string. Input order does not matter.
        let mut raw_set: BTreeSet<String> = BTreeSet::new();
        let mut config_licenses = Vec::new();

        if let Some(package) = package {
            for signal in &package.declared {
                raw_set.insert(signal.raw_license.clone());
                config_licenses.push(signal.raw_license.clone());
            }
        }
        if let Some(repo) = repo {
            for license in &repo.identified {
                raw_set.insert(license.clone());
            }
        }
        for answer in providers.values() {
            if let Some(license) = &answer.license {
                raw_set.insert(license.clone());
            }
        }

        // Normalize each raw string individually; a malformed expression
        // keeps its verbatim form rather than being dropped.
        let mut identified_licenses = BTreeSet::new();
        for raw in &raw_set {
            match self.normalizer.normalize(raw) {
                Ok(canonical) => {
                    identified_licenses.insert(canonical);
                }
                Err(e) => {
                    warn!(raw = %raw, error = %e, "normalization failed, keeping verbatim");
                    identified_licenses.insert(raw.clone());
                }
            }
        }

        let identified_license_string = if raw_set.is_empty() {
            None
        } else {
            let expressions: Vec<String> = identified_licenses.iter().cloned().collect();
            match self.normalizer.simplify(&expressions) {
                Ok(simplified) => Some(simplified),
                Err(e) => {
                    warn!(error = %e, "bulk simplification failed, falling back to literal join");
                    Some(raw_set.iter().cloned().collect::<Vec<_>>().join(", "))
                }
            }
        };

        let success = !raw_set.is_empty();
        debug!(provided = %provided, success, licenses = ?identified_licenses, "aggregated");

        let mut detail = ResolutionDetail {
            config_licenses,
            providers: providers.clone(),
            ..Default::default()
        };
        if let Some(repo) = repo {
            detail.suggestions = repo.suggestions.clone();
            detail.failed_urls = repo.failed_urls.clone();
            detail.succeeded_urls = repo.succeeded_urls.clone();
        }

        AggregatedLicenseResult {
            provided: provided.to_string(),
            kind,
            identified_licenses,
            identified_license_string,
            success,
            detail,
        }
    }
}
