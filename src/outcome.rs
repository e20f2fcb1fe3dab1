use std::time::Duration;

use crate::record::{ResultKind, ResultRecord, classify};

/// What running one case produced.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct CaseOutcome {
    pub records: Vec<ResultRecord>,
    pub duration: Duration,
}

impl CaseOutcome {
    pub fn new(records: Vec<ResultRecord>, duration: Duration) -> Self {
        Self { records, duration }
    }

    pub fn status(&self) -> CaseStatus {
        CaseStatus::of(&self.records)
    }
}

/// A one word summary of a case, derived from its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseStatus {
    /// No countable record at all.
    Empty,
    Passed,
    /// At least one `fail` record and no `exception` record.
    Failed,
    /// At least one `exception` record.
    Errored,
}

impl CaseStatus {
    pub fn of(records: &[ResultRecord]) -> Self {
        records
            .iter()
            .filter_map(classify)
            .fold(CaseStatus::Empty, |status, kind| match (status, kind) {
                (CaseStatus::Errored, _) | (_, ResultKind::Exception) => CaseStatus::Errored,
                (CaseStatus::Failed, _) | (_, ResultKind::Fail) => CaseStatus::Failed,
                (_, ResultKind::Pass) => CaseStatus::Passed,
            })
    }

    pub fn is_good(self) -> bool {
        matches!(self, CaseStatus::Empty | CaseStatus::Passed)
    }

    pub fn is_bad(self) -> bool {
        !self.is_good()
    }
}
