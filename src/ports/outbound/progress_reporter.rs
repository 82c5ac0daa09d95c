/// ProgressReporter port for user feedback during a resolution.
///
/// Network lookups can take a while; this port abstracts stderr feedback
/// so the core stays silent in library use and tests.
pub trait ProgressReporter {
    /// Reports a progress message.
    fn report(&self, message: &str);

    /// Reports an error or warning message.
    fn report_error(&self, message: &str);

    /// Reports completion of an operation.
    fn report_completion(&self, message: &str);
}
