//! One adapter per package ecosystem, plus the generic URL and git
//! repository adapters.
//!
//! Every adapter implements the same three-step contract: look up
//! registry package metadata, query the external license databases by
//! coordinate, and scan the suggested repositories for license files.
//! Any of the three may come back empty without aborting the pipeline.

mod fixes;
mod gem;
mod generic_url;
mod git_repo;
mod maven;
mod pypi;
mod swift;

pub use fixes::fix_repository_url;
pub use gem::GemAdapter;
pub use generic_url::UrlAdapter;
pub use git_repo::GitRepoAdapter;
pub use maven::MavenAdapter;
pub use pypi::PypiAdapter;
pub use swift::SwiftAdapter;

use crate::ports::outbound::{ContentFetcher, TextMatcher};
use crate::providers::ProviderRegistry;
use crate::resolution::domain::{
    Ecosystem, PackageCoordinate, PackageMetadata, ProviderAnswers, RepoLookupResult,
};
use crate::resolution::services::RepoScanner;
use crate::shared::Result;
use tracing::{debug, warn};

/// Shared handles every adapter call needs.
pub struct LookupContext<'a> {
    pub fetcher: &'a dyn ContentFetcher,
    pub matcher: &'a dyn TextMatcher,
    pub providers: &'a ProviderRegistry,
    /// Minimum matcher confidence, passed through to the text matcher
    /// filtering in the scanner.
    pub min_score: f64,
}

impl<'a> LookupContext<'a> {
    pub fn scanner(&self) -> RepoScanner<'a> {
        RepoScanner::new(self.fetcher, self.matcher, self.min_score)
    }
}

/// Uniform adapter contract, one implementation per ecosystem.
pub trait EcosystemAdapter {
    fn ecosystem(&self) -> Ecosystem;

    /// The package coordinate used to query providers, when one can be
    /// derived from the identifier (and optionally a version discovered
    /// in package metadata).
    fn coordinate_for(&self, identifier: &str, version: Option<&str>)
        -> Option<PackageCoordinate>;

    /// Fetches and parses registry metadata. `None` means the registry
    /// had no data; that degrades gracefully, it never aborts.
    fn lookup_package(
        &self,
        ctx: &LookupContext,
        identifier: &str,
    ) -> Result<Option<PackageMetadata>>;

    /// Queries every configured license database by coordinate.
    fn lookup_providers(
        &self,
        ctx: &LookupContext,
        identifier: &str,
        version: Option<&str>,
    ) -> ProviderAnswers {
        match self.coordinate_for(identifier, version) {
            Some(coordinate) => ctx.providers.lookup_all(ctx.fetcher, &coordinate),
            None => {
                debug!(identifier, "no coordinate for provider lookup");
                ProviderAnswers::new()
            }
        }
    }

    /// Resolves the repository URL(s) behind the identifier and scans
    /// them for license files. `None` means no repository could even be
    /// guessed.
    fn lookup_url_impl(
        &self,
        ctx: &LookupContext,
        identifier: &str,
        package: Option<&PackageMetadata>,
    ) -> Result<Option<RepoLookupResult>>;
}

/// Scans metadata-suggested repositories in order, returning as soon as
/// one yields a signal. Attempts from repositories that did not match
/// are merged in so the provenance trail keeps every URL tried; a
/// suggestion on an unsupported host is skipped with a warning, since
/// suggestions are external data and not the caller's fault.
pub fn scan_repo_suggestions(
    ctx: &LookupContext,
    provided: &str,
    repositories: &[&str],
) -> Option<RepoLookupResult> {
    if repositories.is_empty() {
        return None;
    }
    let scanner = ctx.scanner();
    let mut merged = RepoLookupResult::empty(provided);

    for repository in repositories {
        match scanner.lookup_url(repository) {
            Ok(result) => {
                let matched = result.success;
                merged.suggestions.extend(result.suggestions);
                merged.failed_urls.extend(result.failed_urls);
                merged.succeeded_urls.extend(result.succeeded_urls);
                merged.identified.extend(result.identified);
                if matched {
                    merged.success = true;
                    break;
                }
            }
            Err(e) => {
                warn!(%repository, error = %e, "skipping suggested repository");
            }
        }
    }
    Some(merged)
}

/// The closed set of ecosystem adapters, resolved once at startup.
///
/// Dispatch is an exhaustive match over `Ecosystem`, so a missing
/// adapter is a compile error, not a runtime lookup failure.
pub struct AdapterRegistry {
    pypi: PypiAdapter,
    gem: GemAdapter,
    maven: MavenAdapter,
    swift: SwiftAdapter,
    git_repo: GitRepoAdapter,
    url: UrlAdapter,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self {
            pypi: PypiAdapter::new(),
            gem: GemAdapter::new(),
            maven: MavenAdapter::new(),
            swift: SwiftAdapter::new(),
            git_repo: GitRepoAdapter::new(),
            url: UrlAdapter::new(),
        }
    }

    pub fn adapter(&self, ecosystem: Ecosystem) -> &dyn EcosystemAdapter {
        match ecosystem {
            Ecosystem::Pypi => &self.pypi,
            Ecosystem::Gem => &self.gem,
            Ecosystem::Maven => &self.maven,
            Ecosystem::Swift => &self.swift,
            Ecosystem::GitRepo => &self.git_repo,
            Ecosystem::Url => &self.url,
        }
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
