//! license-lookup - multi-source license resolution
//!
//! This library resolves "what license applies" for an identifier (raw
//! license text, a file, a URL, a source-repository reference or a
//! package coordinate) by combining registry metadata, repository
//! license-file scanning and external license-metadata providers into
//! one normalized result with a full provenance trail.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **Domain** (`resolution`): value objects, policies and the three
//!   core services (candidate generation, repository scanning,
//!   aggregation)
//! - **Ecosystems** (`ecosystems`): one adapter per package ecosystem
//! - **Providers** (`providers`): external license databases queried by
//!   package coordinate
//! - **Application** (`application`): the resolution orchestrator and
//!   the result cache
//! - **Ports** (`ports`): interfaces for infrastructure and for the two
//!   external license tools (text matcher, expression normalizer)
//! - **Adapters** (`adapters`): concrete implementations of the ports
//! - **Shared** (`shared`): Result alias, error taxonomy, helpers
//!
//! # Example
//!
//! ```no_run
//! use license_lookup::prelude::*;
//! use std::time::Duration;
//!
//! # fn main() -> Result<()> {
//! let fetcher = HttpContentFetcher::new(Duration::from_secs(10))?;
//! let store = JsonFileStore::open("/tmp/license-lookup/cache.json")?;
//! let cache = ResultCache::new(store, CacheMode::Enabled)?;
//!
//! let use_case = ResolveLicenseUseCase::new(
//!     fetcher,
//!     KeywordTextMatcher::new(),
//!     AliasNormalizer::new(),
//!     StderrProgressReporter::new(),
//!     &cache,
//!     ProviderRegistry::new(),
//!     0.8,
//! );
//!
//! let result = use_case.execute(ResolveRequest::new("pkg:pypi/requests@2.31.0"))?;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ecosystems;
pub mod ports;
pub mod providers;
pub mod resolution;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{SilentProgressReporter, StderrProgressReporter};
    pub use crate::adapters::outbound::filesystem::JsonFileStore;
    pub use crate::adapters::outbound::matching::{AliasNormalizer, KeywordTextMatcher};
    pub use crate::adapters::outbound::network::HttpContentFetcher;
    pub use crate::application::cache::{CacheMode, ResultCache};
    pub use crate::application::dto::ResolveRequest;
    pub use crate::application::use_cases::ResolveLicenseUseCase;
    pub use crate::ports::outbound::{
        ContentFetcher, ExpressionNormalizer, LicenseMatch, ProgressReporter, ResultStore,
        TextMatcher,
    };
    pub use crate::providers::ProviderRegistry;
    pub use crate::resolution::domain::{
        AggregatedLicenseResult, CandidateUrl, Ecosystem, IdentifierKind, LicenseSignal,
        PackageCoordinate, PackageMetadata, RepoLookupResult,
    };
    pub use crate::shared::{ExitCode, LookupError, Result};
}
