mod mock_content_fetcher;
mod mock_expression_normalizer;
mod mock_progress_reporter;
mod mock_text_matcher;

pub use mock_content_fetcher::MockContentFetcher;
pub use mock_expression_normalizer::MockExpressionNormalizer;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_text_matcher::MockTextMatcher;
