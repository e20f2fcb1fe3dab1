use crate::reporter::RunReporter;

/// A reporter that produces no output.
///
/// Useful when the caller only cares about the returned report, for example
/// when testflow is embedded into a system that does its own reporting.
#[derive(Debug, Default, Clone)]
pub struct NoReporter;

impl RunReporter for NoReporter {
    type Error = ();
}
