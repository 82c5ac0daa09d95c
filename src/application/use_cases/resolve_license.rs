use crate::application::cache::ResultCache;
use crate::application::dto::ResolveRequest;
use crate::ecosystems::{AdapterRegistry, LookupContext};
use crate::ports::outbound::{
    ContentFetcher, ExpressionNormalizer, ProgressReporter, ResultStore, TextMatcher,
};
use crate::providers::ProviderRegistry;
use crate::resolution::domain::{
    AggregatedLicenseResult, Ecosystem, IdentifierKind, PackageCoordinate, RepoLookupResult,
};
use crate::resolution::services::LicenseAggregator;
use crate::shared::{LookupError, Result};
use anyhow::Context;
use tracing::{debug, info};

/// ResolveLicenseUseCase - the resolution orchestrator.
///
/// Drives one request end to end:
/// cache check, package metadata lookup, provider queries, repository
/// scan, aggregation, cache write. Every stage may produce "no data"
/// without aborting; the pipeline only fails on caller errors
/// (malformed coordinate, unsupported ecosystem or host).
///
/// # Type Parameters
/// * `F` - ContentFetcher implementation
/// * `M` - TextMatcher implementation
/// * `N` - ExpressionNormalizer implementation
/// * `P` - ProgressReporter implementation
/// * `S` - ResultStore implementation backing the cache
pub struct ResolveLicenseUseCase<'a, F, M, N, P, S>
where
    F: ContentFetcher,
    M: TextMatcher,
    N: ExpressionNormalizer,
    P: ProgressReporter,
    S: ResultStore,
{
    fetcher: F,
    matcher: M,
    normalizer: N,
    progress: P,
    cache: &'a ResultCache<S>,
    adapters: AdapterRegistry,
    providers: ProviderRegistry,
    min_score: f64,
}

impl<'a, F, M, N, P, S> ResolveLicenseUseCase<'a, F, M, N, P, S>
where
    F: ContentFetcher,
    M: TextMatcher,
    N: ExpressionNormalizer,
    P: ProgressReporter,
    S: ResultStore,
{
    /// Creates a use case with injected dependencies. The cache is
    /// owned by the process entry point and borrowed here; its mode was
    /// fixed at construction.
    pub fn new(
        fetcher: F,
        matcher: M,
        normalizer: N,
        progress: P,
        cache: &'a ResultCache<S>,
        providers: ProviderRegistry,
        min_score: f64,
    ) -> Self {
        Self {
            fetcher,
            matcher,
            normalizer,
            progress,
            cache,
            adapters: AdapterRegistry::new(),
            providers,
            min_score,
        }
    }

    /// Resolves one identifier to an aggregated license result.
    pub fn execute(&self, request: ResolveRequest) -> Result<AggregatedLicenseResult> {
        let identifier = request.identifier.trim().to_string();
        let kind = Self::classify(&identifier, request.kind_hint);
        debug!(%identifier, ?kind, "resolving");

        if let Some(cached) = self.cache.get(&identifier) {
            if let Ok(result) = serde_json::from_value::<AggregatedLicenseResult>(cached) {
                self.progress.report("💾 Answered from cache");
                return Ok(result);
            }
        }

        let result = match kind {
            IdentifierKind::Text => self.resolve_text(&identifier, &identifier, kind),
            IdentifierKind::File => {
                let content = std::fs::read_to_string(&identifier)
                    .with_context(|| format!("Failed to read license file: {}", identifier))?;
                self.resolve_text(&identifier, &content, kind)
            }
            IdentifierKind::Url | IdentifierKind::PackageUrl | IdentifierKind::PackageSpec => {
                self.resolve_package(&identifier, kind, request.ecosystem)?
            }
        };

        self.cache.put(&identifier, &serde_json::to_value(&result)?)?;
        if result.success {
            self.progress.report_completion(&format!(
                "✅ Identified: {}",
                result.identified_license_string.as_deref().unwrap_or("-")
            ));
        } else {
            self.progress
                .report_completion("❌ No license could be identified");
        }
        Ok(result)
    }

    /// Decides what shape the identifier has, honoring an explicit hint.
    fn classify(identifier: &str, hint: Option<IdentifierKind>) -> IdentifierKind {
        if let Some(hint) = hint {
            return hint;
        }
        if identifier.starts_with("pkg:") {
            return IdentifierKind::PackageUrl;
        }
        if identifier.contains("://") {
            return IdentifierKind::Url;
        }
        // A single whitespace-free token is a name@version-style package
        // spec; anything longer reads as license text.
        if !identifier.contains(char::is_whitespace) {
            return IdentifierKind::PackageSpec;
        }
        IdentifierKind::Text
    }

    /// License text goes straight to the text matcher; no cache
    /// bypass, no network.
    fn resolve_text(
        &self,
        identifier: &str,
        text: &str,
        kind: IdentifierKind,
    ) -> AggregatedLicenseResult {
        self.progress.report("🔍 Matching license text");
        let matches = self.matcher.match_text(text).unwrap_or_default();
        let identified: Vec<String> = matches
            .into_iter()
            .filter(|m| m.score >= self.min_score)
            .map(|m| m.expression)
            .collect();

        let repo = RepoLookupResult {
            provided: identifier.to_string(),
            success: !identified.is_empty(),
            identified,
            ..Default::default()
        };
        LicenseAggregator::new(&self.normalizer).aggregate(
            identifier,
            kind,
            None,
            Some(&repo),
            &Default::default(),
        )
    }

    fn resolve_package(
        &self,
        identifier: &str,
        kind: IdentifierKind,
        ecosystem_override: Option<Ecosystem>,
    ) -> Result<AggregatedLicenseResult> {
        let ecosystem = match ecosystem_override {
            Some(ecosystem) => ecosystem,
            None => Self::detect_ecosystem(identifier, kind)?,
        };
        info!(%identifier, %ecosystem, "dispatching to ecosystem adapter");
        let adapter = self.adapters.adapter(ecosystem);
        let ctx = LookupContext {
            fetcher: &self.fetcher,
            matcher: &self.matcher,
            providers: &self.providers,
            min_score: self.min_score,
        };

        self.progress.report("📦 Looking up package metadata");
        let package = adapter.lookup_package(&ctx, identifier)?;
        if package.is_none() {
            debug!(%identifier, "no package metadata");
        }
        let version = package.as_ref().and_then(|p| p.version.clone());

        self.progress.report("🗃️  Querying license providers");
        let providers = adapter.lookup_providers(&ctx, identifier, version.as_deref());

        self.progress.report("🔎 Scanning repository license files");
        let repo = adapter.lookup_url_impl(&ctx, identifier, package.as_ref())?;

        Ok(LicenseAggregator::new(&self.normalizer).aggregate(
            identifier,
            kind,
            package.as_ref(),
            repo.as_ref(),
            &providers,
        ))
    }

    /// Shape-based ecosystem detection for requests without an explicit
    /// selector.
    fn detect_ecosystem(identifier: &str, kind: IdentifierKind) -> Result<Ecosystem> {
        match kind {
            IdentifierKind::PackageUrl => {
                let coordinate = PackageCoordinate::parse(identifier)?;
                coordinate.ecosystem()
            }
            IdentifierKind::Url => Ecosystem::detect_from_url(identifier),
            _ => Err(LookupError::InvalidCoordinate {
                coordinate: identifier.to_string(),
                reason: "bare name@version tokens need an explicit ecosystem selector"
                    .to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::filesystem::JsonFileStore;
    use crate::application::cache::CacheMode;
    use crate::ports::outbound::LicenseMatch;
    use crate::resolution::domain::RetrievalOutcome;
    use serde_json::json;
    use std::collections::HashMap;
    use tempfile::TempDir;

    struct CannedFetcher {
        responses: HashMap<String, String>,
    }

    impl CannedFetcher {
        fn new(entries: &[(&str, String)]) -> Self {
            Self {
                responses: entries
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.clone()))
                    .collect(),
            }
        }
    }

    impl ContentFetcher for CannedFetcher {
        fn fetch(&self, url: &str) -> RetrievalOutcome {
            match self.responses.get(url) {
                Some(body) => RetrievalOutcome::success(url, 200, body.clone()),
                None => RetrievalOutcome::failure(url, Some(404)),
            }
        }
    }

    struct KeywordMatcher;

    impl TextMatcher for KeywordMatcher {
        fn match_text(&self, text: &str) -> Result<Vec<LicenseMatch>> {
            if text.contains("apache text") {
                Ok(vec![LicenseMatch {
                    expression: "Apache-2.0".to_string(),
                    score: 0.95,
                }])
            } else {
                Ok(Vec::new())
            }
        }
    }

    struct IdentityNormalizer;

    impl ExpressionNormalizer for IdentityNormalizer {
        fn normalize(&self, raw: &str) -> Result<String> {
            Ok(raw.to_string())
        }

        fn simplify(&self, expressions: &[String]) -> Result<String> {
            let mut unique: Vec<String> = expressions.to_vec();
            unique.sort();
            unique.dedup();
            Ok(unique.join(" AND "))
        }

        fn validate(&self, _expression: &str) -> Result<bool> {
            Ok(true)
        }
    }

    struct Silent;

    impl ProgressReporter for Silent {
        fn report(&self, _message: &str) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    fn cache_in(dir: &TempDir, mode: CacheMode) -> ResultCache<JsonFileStore> {
        let store = JsonFileStore::open(dir.path().join("cache.json")).unwrap();
        ResultCache::new(store, mode).unwrap()
    }

    fn use_case<'a>(
        fetcher: CannedFetcher,
        cache: &'a ResultCache<JsonFileStore>,
    ) -> ResolveLicenseUseCase<'a, CannedFetcher, KeywordMatcher, IdentityNormalizer, Silent, JsonFileStore>
    {
        ResolveLicenseUseCase::new(
            fetcher,
            KeywordMatcher,
            IdentityNormalizer,
            Silent,
            cache,
            ProviderRegistry::empty(),
            0.5,
        )
    }

    fn pypi_body(license: &str) -> String {
        json!({
            "info": {
                "name": "requests",
                "version": "2.31.0",
                "license": license,
                "classifiers": []
            }
        })
        .to_string()
    }

    /// Metadata-only resolution: declared license, no repository signal.
    #[test]
    fn test_resolve_purl_from_metadata_only() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CacheMode::Enabled);
        let fetcher = CannedFetcher::new(&[(
            "https://pypi.org/pypi/requests/2.31.0/json",
            pypi_body("Apache-2.0"),
        )]);
        let use_case = use_case(fetcher, &cache);

        let result = use_case
            .execute(ResolveRequest::new("pkg:pypi/pypi/requests@2.31.0"))
            .unwrap();

        assert!(result.success);
        assert!(result.identified_licenses.contains("Apache-2.0"));
        assert_eq!(result.identified_licenses.len(), 1);
        assert!(result.detail.succeeded_urls.is_empty());
        assert_eq!(result.kind, IdentifierKind::PackageUrl);
    }

    #[test]
    fn test_resolution_cached_and_served_on_second_call() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CacheMode::Enabled);
        let fetcher = CannedFetcher::new(&[(
            "https://pypi.org/pypi/requests/2.31.0/json",
            pypi_body("Apache-2.0"),
        )]);
        let use_case = use_case(fetcher, &cache);

        let first = use_case
            .execute(ResolveRequest::new("pkg:pypi/pypi/requests@2.31.0"))
            .unwrap();
        assert!(first.success);

        // Second run with an empty fetcher: must be answered from cache.
        let offline = use_case_offline(&cache);
        let second = offline
            .execute(ResolveRequest::new("pkg:pypi/pypi/requests@2.31.0"))
            .unwrap();
        assert!(second.success);
        assert_eq!(second.identified_licenses, first.identified_licenses);
    }

    fn use_case_offline<'a>(
        cache: &'a ResultCache<JsonFileStore>,
    ) -> ResolveLicenseUseCase<'a, CannedFetcher, KeywordMatcher, IdentityNormalizer, Silent, JsonFileStore>
    {
        use_case(CannedFetcher::new(&[]), cache)
    }

    #[test]
    fn test_resolve_repository_url_with_repo_scan() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CacheMode::Disabled);
        let fetcher = CannedFetcher::new(&[(
            "https://raw.githubusercontent.com/x/y/master/LICENSE",
            "apache text".to_string(),
        )]);
        let use_case = use_case(fetcher, &cache);

        let result = use_case
            .execute(ResolveRequest::new("https://github.com/x/y"))
            .unwrap();

        assert!(result.success);
        assert!(result.identified_licenses.contains("Apache-2.0"));
        // all of main's candidates failed before master matched
        assert!(!result.detail.failed_urls.is_empty());
        assert_eq!(result.detail.succeeded_urls.len(), 1);
    }

    #[test]
    fn test_resolve_license_text() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CacheMode::Disabled);
        let use_case = use_case(CannedFetcher::new(&[]), &cache);

        let result = use_case
            .execute(ResolveRequest::new("long apache text body here").as_text())
            .unwrap();

        assert!(result.success);
        assert_eq!(result.kind, IdentifierKind::Text);
        assert!(result.identified_licenses.contains("Apache-2.0"));
    }

    #[test]
    fn test_resolve_license_file() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CacheMode::Disabled);
        let license_path = dir.path().join("LICENSE");
        std::fs::write(&license_path, "apache text").unwrap();
        let use_case = use_case(CannedFetcher::new(&[]), &cache);

        let result = use_case
            .execute(ResolveRequest::new(license_path.display().to_string()).as_file())
            .unwrap();

        assert!(result.success);
        assert_eq!(result.kind, IdentifierKind::File);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CacheMode::Disabled);
        let use_case = use_case(CannedFetcher::new(&[]), &cache);

        let result = use_case.execute(ResolveRequest::new("/nonexistent/LICENSE").as_file());
        assert!(result.is_err());
    }

    #[test]
    fn test_exhausted_pipeline_returns_well_formed_failure() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CacheMode::Disabled);
        let use_case = use_case(CannedFetcher::new(&[]), &cache);

        let result = use_case
            .execute(ResolveRequest::new("https://github.com/x/y"))
            .unwrap();

        assert!(!result.success);
        assert!(result.identified_licenses.is_empty());
        // every generated candidate is recorded as failed
        assert!(!result.detail.failed_urls.is_empty());
    }

    #[test]
    fn test_unsupported_purl_type_is_fatal() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CacheMode::Disabled);
        let use_case = use_case(CannedFetcher::new(&[]), &cache);

        let result = use_case.execute(ResolveRequest::new("pkg:cran/ggplot2@3.4.0"));
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("not supported"));
    }

    #[test]
    fn test_bare_token_without_ecosystem_is_fatal() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CacheMode::Disabled);
        let use_case = use_case(CannedFetcher::new(&[]), &cache);

        let result = use_case.execute(ResolveRequest::new("requests@2.31.0"));
        assert!(result.is_err());
    }

    #[test]
    fn test_bare_token_with_ecosystem_override() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CacheMode::Disabled);
        let fetcher = CannedFetcher::new(&[(
            "https://pypi.org/pypi/requests/2.31.0/json",
            pypi_body("MIT"),
        )]);
        let use_case = use_case(fetcher, &cache);

        let result = use_case
            .execute(ResolveRequest::new("requests==2.31.0").with_ecosystem(Ecosystem::Pypi))
            .unwrap();
        assert!(result.success);
        assert!(result.identified_licenses.contains("MIT"));
        assert_eq!(result.kind, IdentifierKind::PackageSpec);
    }

    #[test]
    fn test_classify_shapes() {
        assert_eq!(
            ResolveLicenseUseCase::<CannedFetcher, KeywordMatcher, IdentityNormalizer, Silent, JsonFileStore>::classify("pkg:pypi/x@1", None),
            IdentifierKind::PackageUrl
        );
        assert_eq!(
            ResolveLicenseUseCase::<CannedFetcher, KeywordMatcher, IdentityNormalizer, Silent, JsonFileStore>::classify("https://github.com/x/y", None),
            IdentifierKind::Url
        );
        assert_eq!(
            ResolveLicenseUseCase::<CannedFetcher, KeywordMatcher, IdentityNormalizer, Silent, JsonFileStore>::classify("requests==2.31.0", None),
            IdentifierKind::PackageSpec
        );
        assert_eq!(
            ResolveLicenseUseCase::<CannedFetcher, KeywordMatcher, IdentityNormalizer, Silent, JsonFileStore>::classify("Permission is hereby granted", None),
            IdentifierKind::Text
        );
    }
}
