//! Case execution for testflow.
//!
//! A runner drives the flattened case sequence and turns every case into a
//! [`CaseOutcome`]. Execution is strictly sequential: a case starts only after
//! the previous one finished, and every case runs, a failing case never stops
//! the run.
//!
//! The dispatcher passes the runner an iterator of case execution functions.
//! These functions already include panic handling (they return records), so the
//! runner can focus on ordering and timing.
//!
//! Implement [`CaseRunner`] to define how testflow schedules cases.

use crate::{outcome::CaseOutcome, record::ResultRecord, test::TestCase};

mod simple;
pub use simple::*;

/// A strategy for running cases and producing [`CaseOutcome`] values.
pub trait CaseRunner {
    /// Run the given cases and return their outcomes.
    ///
    /// The input iterator yields `(f, case)` pairs where `f` executes the case.
    /// The returned iterator must yield exactly one outcome per input, in input
    /// order, and must not run a case before the previous outcome was yielded.
    fn run<'t, I, F>(&self, cases: I) -> impl Iterator<Item = (&'t TestCase, CaseOutcome)>
    where
        I: ExactSizeIterator<Item = (F, &'t TestCase)>,
        F: FnOnce() -> Vec<ResultRecord>;
}
