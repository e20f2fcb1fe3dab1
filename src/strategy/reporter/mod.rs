//! Run progress reporting for testflow.
//!
//! A reporter observes a run: it is told when the run starts, when each case
//! starts and finishes, and when the run is over. Reporting happens on a
//! separate thread fed by a bounded channel, so a slow reporter never changes
//! the order or the results of execution.
//!
//! Reporter errors never abort a run. They are collected, named after the hook
//! that failed, into [`DispatchReport::fmt_errors`](crate::DispatchReport::fmt_errors).
//!
//! Implement [`RunReporter`] to define how testflow shows progress.

use std::time::Duration;

use crate::{outcome::CaseOutcome, pipeline::FilterAnalyses, stats::Stats, test::TestCase};

mod no;
pub use no::*;

mod terse;
pub use terse::*;

mod log;
pub use log::*;

/// Data for [`RunReporter::fmt_run_start`].
#[derive(Debug, Clone, Copy)]
pub struct FmtRunStart<'a> {
    pub title: &'a str,
    /// Number of cases left after all filters applied.
    pub cases: usize,
}

/// Data for [`RunReporter::fmt_case_start`].
#[derive(Debug, Clone, Copy)]
pub struct FmtCaseStart<'a> {
    pub case: &'a TestCase,
}

/// Data for [`RunReporter::fmt_case_outcome`].
#[derive(Debug, Clone, Copy)]
pub struct FmtCaseOutcome<'a> {
    pub case: &'a TestCase,
    pub outcome: &'a CaseOutcome,
}

/// Data for [`RunReporter::fmt_run_outcomes`].
#[derive(Debug, Clone, Copy)]
pub struct FmtRunOutcomes<'a> {
    pub title: &'a str,
    pub stats: &'a Stats,
    pub filters: &'a FilterAnalyses,
    pub duration: Duration,
}

/// A strategy for reporting run progress.
///
/// Every hook defaults to doing nothing.
pub trait RunReporter {
    type Error;

    fn fmt_run_start(&mut self, data: FmtRunStart<'_>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_case_start(&mut self, data: FmtCaseStart<'_>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_case_outcome(&mut self, data: FmtCaseOutcome<'_>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_run_outcomes(&mut self, data: FmtRunOutcomes<'_>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }
}

/// Reporter errors named by the hook that produced them.
pub type FmtErrors<E> = Vec<(&'static str, E)>;

pub(crate) trait FmtErrorsExt<E> {
    fn push_on_error(&mut self, named: (&'static str, Result<(), E>));
}

impl<E> FmtErrorsExt<E> for FmtErrors<E> {
    fn push_on_error(&mut self, (name, result): (&'static str, Result<(), E>)) {
        if let Err(err) = result {
            tracing::warn!(hook = name, "reporter failed");
            self.push((name, err));
        }
    }
}

macro_rules! named_fmt {
    ($reporter:ident.$method:ident($data:expr)) => {
        (stringify!($method), $reporter.$method($data))
    };
}

pub(crate) use named_fmt;
