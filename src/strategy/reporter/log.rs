use crate::{
    outcome::CaseStatus,
    reporter::{FmtCaseOutcome, FmtRunOutcomes, FmtRunStart, RunReporter},
};

/// A reporter emitting `tracing` events instead of writing output itself.
///
/// Run start and end are logged at `info`, passing cases at `debug` and bad
/// cases at `warn`.
#[derive(Debug, Default, Clone)]
pub struct LogReporter;

impl RunReporter for LogReporter {
    type Error = std::convert::Infallible;

    fn fmt_run_start(&mut self, data: FmtRunStart<'_>) -> Result<(), Self::Error> {
        tracing::info!(title = data.title, cases = data.cases, "run started");
        Ok(())
    }

    fn fmt_case_outcome(&mut self, data: FmtCaseOutcome<'_>) -> Result<(), Self::Error> {
        let status = data.outcome.status();
        let records = data.outcome.records.len();
        match status {
            CaseStatus::Empty | CaseStatus::Passed => {
                tracing::debug!(case = %data.case.id, ?status, records, "case finished")
            }
            CaseStatus::Failed | CaseStatus::Errored => {
                tracing::warn!(case = %data.case.id, ?status, records, "case finished")
            }
        }
        Ok(())
    }

    fn fmt_run_outcomes(&mut self, data: FmtRunOutcomes<'_>) -> Result<(), Self::Error> {
        tracing::info!(
            title = data.title,
            asserts = data.stats.asserts,
            passes = data.stats.passes.len(),
            fails = data.stats.fails.len(),
            exceptions = data.stats.exceptions.len(),
            duration = ?data.duration,
            "run finished"
        );
        Ok(())
    }
}
