//! External license-metadata databases, queried by package coordinate.
//!
//! Providers are consulted directly by coordinate, never by file URL. A
//! provider that cannot map an ecosystem into its own taxonomy answers
//! "no answer", which is ordinary data, not an error.

mod clearly_defined;
mod coordinates;
mod purldb;

pub use clearly_defined::ClearlyDefined;
pub use coordinates::clearly_defined_coordinate;
pub use purldb::PurlDb;

use crate::ports::outbound::ContentFetcher;
use crate::resolution::domain::{PackageCoordinate, ProviderAnswer, ProviderAnswers};
use tracing::debug;

/// One external license database.
pub trait LicenseProvider {
    fn name(&self) -> &'static str;

    /// Queries the provider for one package coordinate. Never fails:
    /// anything that goes wrong is carried in the answer's error field.
    fn lookup(&self, fetcher: &dyn ContentFetcher, coordinate: &PackageCoordinate)
        -> ProviderAnswer;
}

/// The fixed set of providers consulted for every package lookup.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn LicenseProvider>>,
}

impl ProviderRegistry {
    /// The default registry: ClearlyDefined and PurlDB.
    pub fn new() -> Self {
        Self {
            providers: vec![Box::new(ClearlyDefined), Box::new(PurlDb)],
        }
    }

    /// A registry with no providers, for offline or test use.
    pub fn empty() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Queries every provider for the coordinate. Failures and "no
    /// answer" results are kept alongside real answers so the caller can
    /// show the full picture.
    pub fn lookup_all(
        &self,
        fetcher: &dyn ContentFetcher,
        coordinate: &PackageCoordinate,
    ) -> ProviderAnswers {
        let mut answers = ProviderAnswers::new();
        for provider in &self.providers {
            debug!(provider = provider.name(), coordinate = %coordinate, "querying provider");
            let answer = provider.lookup(fetcher, coordinate);
            answers.insert(provider.name().to_string(), answer);
        }
        answers
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Fills in the default namespace a provider expects when the coordinate
/// has none (e.g. rubygems for gem packages).
pub(crate) fn default_namespace(purl_type: &str) -> Option<&'static str> {
    match purl_type {
        "pypi" => Some("pypi"),
        "gem" => Some("rubygems"),
        _ => None,
    }
}
