use crate::ports::outbound::ContentFetcher;
use crate::resolution::domain::RetrievalOutcome;
use crate::shared::Result;
use std::time::Duration;
use tracing::debug;

/// HttpContentFetcher adapter for retrieving URL payloads.
///
/// Implements the ContentFetcher port with a blocking reqwest client:
/// one fetch per call, a fixed per-request timeout, no retries. Network
/// errors and non-2xx statuses come back as failed outcomes so the
/// scanner can advance to the next candidate.
pub struct HttpContentFetcher {
    client: reqwest::blocking::Client,
}

impl HttpContentFetcher {
    /// Creates a fetcher with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("license-lookup/{}", version);
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    fn fetch_inner(&self, url: &str, headers: &[(String, String)]) -> RetrievalOutcome {
        debug!(url, "download");
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = match request.send() {
            Ok(response) => response,
            Err(e) => {
                debug!(url, error = %e, "download failed");
                return RetrievalOutcome::failure(url, e.status().map(|s| s.as_u16()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!(url, status = status.as_u16(), "non-success status");
            return RetrievalOutcome::failure(url, Some(status.as_u16()));
        }

        match response.text() {
            Ok(body) => RetrievalOutcome::success(url, status.as_u16(), body),
            Err(e) => {
                debug!(url, error = %e, "reading body failed");
                RetrievalOutcome::failure(url, Some(status.as_u16()))
            }
        }
    }
}

impl ContentFetcher for HttpContentFetcher {
    fn fetch(&self, url: &str) -> RetrievalOutcome {
        self.fetch_inner(url, &[])
    }

    fn fetch_with_headers(&self, url: &str, headers: &[(String, String)]) -> RetrievalOutcome {
        self.fetch_inner(url, headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_creation() {
        let fetcher = HttpContentFetcher::new(Duration::from_secs(10));
        assert!(fetcher.is_ok());
    }

    #[test]
    fn test_invalid_url_is_soft_failure() {
        let fetcher = HttpContentFetcher::new(Duration::from_secs(1)).unwrap();
        let outcome = fetcher.fetch("http://[invalid-host/LICENSE");
        assert!(!outcome.succeeded);
        assert!(outcome.content.is_none());
    }
}
