use std::{
    any::Any,
    panic::{UnwindSafe, catch_unwind},
};

use crate::{
    panic::CasePanicHandler,
    record::ResultRecord,
    test::{CaseRecords, TestCase},
};

/// The default [`CasePanicHandler`].
///
/// Records emitted before a panic are lost with the unwinding stack, so a
/// panicking case contributes exactly one `exception` record carrying the panic
/// message and the case identifier (as the `case` field).
#[derive(Debug, Default, Clone)]
pub struct DefaultPanicHandler;

impl DefaultPanicHandler {
    /// Convert a panic payload into a string.
    ///
    /// This matches the common payload types produced by `panic!` (`&'static str` and `String`).
    /// Other payload types are formatted as a generic placeholder.
    pub fn payload_as_string(err: Box<dyn Any + Send + 'static>) -> String {
        err.downcast::<&'static str>()
            .map(|s| s.to_string())
            .or_else(|err| err.downcast::<String>().map(|s| *s))
            .unwrap_or_else(|_| String::from("Box<dyn Any>"))
    }
}

impl CasePanicHandler for DefaultPanicHandler {
    fn handle<F: FnOnce() -> CaseRecords + UnwindSafe>(
        &self,
        f: F,
        case: &TestCase,
    ) -> Vec<ResultRecord> {
        match catch_unwind(f) {
            Ok(records) => records.0,
            Err(err) => {
                let message = Self::payload_as_string(err);
                tracing::debug!(case = %case.id, %message, "case panicked");
                let record = ResultRecord::exception(message);
                vec![record.with_extra("case", case.id.to_string())]
            }
        }
    }
}
