use std::{
    io,
    sync::{Arc, Mutex},
};

use testflow::{ResultRecord, StaticCatalog, TestIdentifier, test::CaseFnHandle};

mod aggregation;
mod filters;
mod menu;
mod reporting;

#[derive(Debug, Default, Clone)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("poison error"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Buffer {
    pub fn contents(&self) -> String {
        let guard = self.0.lock().unwrap();
        String::from_utf8(guard.to_vec()).unwrap()
    }
}

pub fn id(s: &str) -> TestIdentifier {
    s.parse().unwrap()
}

/// A small library with a passing, a failing and a panicking case.
pub fn catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with_case(
            id("Lib.tests.cases.FooTest"),
            CaseFnHandle::from_shared(|| vec![ResultRecord::pass(), ResultRecord::fail("x")]),
        )
        .with_case(
            id("Lib.tests.cases.net.SocketTest"),
            CaseFnHandle::from_shared(|| vec![ResultRecord::pass(), ResultRecord::pass()]),
        )
        .with_case(
            id("Lib.tests.cases.net.HttpTest"),
            CaseFnHandle::from_shared(|| -> Vec<ResultRecord> {
                panic!("connection refused")
            }),
        )
        .with_case(
            id("Other.tests.cases.EmptyTest"),
            CaseFnHandle::from_shared(|| ()),
        )
}
