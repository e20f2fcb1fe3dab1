//! Panic handling for testflow.
//!
//! Cases can panic. A panicking case must not abort the run, its failure is
//! captured as an `exception` record and execution continues with the next case.
//!
//! A panic handler is responsible for actually invoking the case function and
//! turning whatever happens into result records. The runner decides when cases
//! run, the panic handler is the piece that runs them.
//!
//! Implement [`CasePanicHandler`] to define how testflow invokes cases.

use std::panic::UnwindSafe;

use crate::{
    record::ResultRecord,
    test::{CaseRecords, TestCase},
};

mod no;
pub use no::*;

mod default;
pub use default::*;

/// A strategy for invoking a case function and translating panics into records.
pub trait CasePanicHandler {
    /// Invoke `f` and return the records of the case.
    fn handle<F: FnOnce() -> CaseRecords + UnwindSafe>(
        &self,
        f: F,
        case: &TestCase,
    ) -> Vec<ResultRecord>;
}
