use license_lookup::prelude::*;
use std::sync::Mutex;

/// Mock ProgressReporter collecting messages for assertions.
pub struct MockProgressReporter {
    messages: Mutex<Vec<String>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Messages collected so far.
    #[allow(dead_code)]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Default for MockProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
