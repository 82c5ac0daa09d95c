use license_lookup::prelude::*;
use license_lookup::resolution::domain::RetrievalOutcome;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock ContentFetcher serving canned responses and recording every
/// requested URL.
pub struct MockContentFetcher {
    responses: HashMap<String, RetrievalOutcome>,
    requested: Mutex<Vec<String>>,
}

impl MockContentFetcher {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Registers a 200 text/JSON response.
    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), RetrievalOutcome::success(url, 200, body.to_string()));
        self
    }

    /// Registers a failing status.
    #[allow(dead_code)]
    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses
            .insert(url.to_string(), RetrievalOutcome::failure(url, Some(status)));
        self
    }

    /// URLs fetched so far, in order.
    #[allow(dead_code)]
    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Default for MockContentFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentFetcher for MockContentFetcher {
    fn fetch(&self, url: &str) -> RetrievalOutcome {
        self.requested.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| RetrievalOutcome::failure(url, Some(404)))
    }
}
