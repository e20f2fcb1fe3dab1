use std::time::Duration;

use crate::{
    pipeline::FilterAnalyses,
    record::ResultRecord,
    reporter::FmtErrors,
    stats::{Stats, aggregate},
};

/// Everything a completed dispatch produced.
#[derive(Debug)]
#[non_exhaustive]
pub struct DispatchReport<FmtError> {
    /// The case identifier or the selected groups, possibly empty.
    pub title: String,

    /// Raw records of every executed case, in execution order.
    pub results: Vec<ResultRecord>,

    /// One analysis per configured filter, in pipeline order.
    pub filters: FilterAnalyses,

    pub duration: Duration,
    pub fmt_errors: FmtErrors<FmtError>,
}

impl<FmtError> DispatchReport<FmtError> {
    /// Aggregate the raw results.
    pub fn stats(&self) -> Stats {
        aggregate(&self.results)
    }

    /// Whether the run produced neither `fail` nor `exception` records.
    pub fn is_success(&self) -> bool {
        self.stats().is_success()
    }
}
