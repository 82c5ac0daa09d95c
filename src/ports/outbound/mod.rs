//! Outbound ports (driven ports) - infrastructure interfaces.
//!
//! These ports define the interfaces the resolution core uses to reach
//! external systems: the network, the on-disk result store, the console,
//! and the two external license tools (text matcher and expression
//! normalizer).

pub mod content_fetcher;
pub mod expression_normalizer;
pub mod progress_reporter;
pub mod result_store;
pub mod text_matcher;

pub use content_fetcher::ContentFetcher;
pub use expression_normalizer::ExpressionNormalizer;
pub use progress_reporter::ProgressReporter;
pub use result_store::ResultStore;
pub use text_matcher::{LicenseMatch, TextMatcher};
