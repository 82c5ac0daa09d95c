use crate::resolution::domain::RetrievalOutcome;

/// ContentFetcher port for retrieving the payload behind a URL.
///
/// One blocking fetch per call, with a fixed timeout and no retry at the
/// same URL; a failed fetch is returned as a failed outcome rather than
/// an error, because candidate scanning recovers by advancing to the next
/// URL.
pub trait ContentFetcher {
    /// Fetches a URL and classifies the payload.
    fn fetch(&self, url: &str) -> RetrievalOutcome;

    /// Fetches a URL with extra request headers (e.g. an optional bearer
    /// token for rate-limit relief). Implementations that have no use for
    /// headers may ignore them.
    fn fetch_with_headers(&self, url: &str, _headers: &[(String, String)]) -> RetrievalOutcome {
        self.fetch(url)
    }
}
