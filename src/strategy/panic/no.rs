use std::panic::UnwindSafe;

use crate::{
    panic::CasePanicHandler,
    record::ResultRecord,
    test::{CaseRecords, TestCase},
};

/// A [`CasePanicHandler`] that does not catch panics.
///
/// A panicking case unwinds through the dispatcher. Useful in tests where a
/// panic should fail loudly.
#[derive(Debug, Default, Clone)]
pub struct NoPanicHandler;

impl CasePanicHandler for NoPanicHandler {
    fn handle<F: FnOnce() -> CaseRecords + UnwindSafe>(
        &self,
        f: F,
        _: &TestCase,
    ) -> Vec<ResultRecord> {
        f().0
    }
}
