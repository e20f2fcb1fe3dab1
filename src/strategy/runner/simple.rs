use std::time::Instant;

use crate::{outcome::CaseOutcome, record::ResultRecord, runner::CaseRunner, test::TestCase};

/// Runs cases one after another on the calling thread.
#[derive(Debug, Default, Clone)]
pub struct SimpleRunner;

impl SimpleRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CaseRunner for SimpleRunner {
    fn run<'t, I, F>(&self, cases: I) -> impl Iterator<Item = (&'t TestCase, CaseOutcome)>
    where
        I: ExactSizeIterator<Item = (F, &'t TestCase)>,
        F: FnOnce() -> Vec<ResultRecord>,
    {
        cases.map(|(f, case)| {
            tracing::trace!(case = %case.id, "running case");
            let now = Instant::now();
            let records = f();
            let duration = now.elapsed();
            (case, CaseOutcome::new(records, duration))
        })
    }
}
