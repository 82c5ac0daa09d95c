pub mod candidate;
pub mod coordinate;
pub mod lookup_result;
pub mod package_meta;
pub mod retrieval;
pub mod signal;

pub use candidate::{CandidateSource, CandidateUrl};
pub use coordinate::{Ecosystem, PackageCoordinate};
pub use lookup_result::{
    AggregatedLicenseResult, FailedUrl, FailureReason, IdentifierKind, RepoLookupResult,
    ResolutionDetail, SucceededUrl,
};
pub use package_meta::{PackageMetadata, RepoSuggestion};
pub use retrieval::{ContentKind, RetrievalOutcome};
pub use signal::{LicenseSignal, ProviderAnswer, ProviderAnswers, SignalOrigin};
