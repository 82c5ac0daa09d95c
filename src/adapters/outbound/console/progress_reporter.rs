use crate::ports::outbound::ProgressReporter;

/// StderrProgressReporter adapter for reporting progress to stderr.
///
/// Progress goes to stderr so it never interferes with the JSON result
/// on stdout.
pub struct StderrProgressReporter;

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_error(&self, message: &str) {
        eprintln!("⚠️  {}", message);
    }

    fn report_completion(&self, message: &str) {
        eprintln!();
        eprintln!("{}", message);
    }
}

/// Reporter that swallows everything, for library use and tests.
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn report(&self, _message: &str) {}
    fn report_error(&self, _message: &str) {}
    fn report_completion(&self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporters_do_not_panic() {
        let reporter = StderrProgressReporter::new();
        reporter.report("message");
        reporter.report_error("error");
        reporter.report_completion("done");

        let silent = SilentProgressReporter;
        silent.report("message");
    }
}
