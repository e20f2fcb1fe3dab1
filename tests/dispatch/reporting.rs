use std::io;

use pretty_assertions::assert_eq;
use testflow::{
    Dispatcher, RunOptions,
    reporter::{FmtCaseOutcome, RunReporter, TerseReporter},
};

use crate::{Buffer, catalog, id};

#[test]
fn terse_output() {
    let buffer = Buffer::default();
    let reporter = TerseReporter::default().with_target(buffer.clone());
    let mut dispatcher = Dispatcher::new(catalog()).with_reporter(reporter);

    let report = dispatcher
        .run(None, RunOptions::new().with_group(id("Lib")))
        .unwrap()
        .unwrap();
    assert!(report.fmt_errors.is_empty());

    let output = buffer.contents();
    let expected_start = concat!(
        "\nrunning 3 cases of Lib\n",
        "F.E\n",
        "\n",
        "problems:\n",
        "    fails: x\n",
        "    exceptions: connection refused\n",
        "\n",
        "test result: FAILED. 4 asserts; 3 passes; 1 fails; 1 exceptions; finished in ",
    );
    assert!(
        output.starts_with(expected_start),
        "unexpected output:\n{output}"
    );
}

/// Fails on every case outcome.
struct Broken;

impl RunReporter for Broken {
    type Error = io::Error;

    fn fmt_case_outcome(&mut self, _: FmtCaseOutcome<'_>) -> Result<(), Self::Error> {
        Err(io::Error::other("broken pipe"))
    }
}

#[test]
fn reporter_errors_do_not_abort() {
    let mut dispatcher = Dispatcher::new(catalog()).with_reporter(Broken);
    let options = RunOptions::new().with_group(id("Lib.tests.cases.net"));
    let report = dispatcher.run(None, options).unwrap().unwrap();

    assert_eq!(report.results.len(), 3);
    let hooks: Vec<_> = report.fmt_errors.iter().map(|(hook, _)| *hook).collect();
    assert_eq!(hooks, ["fmt_case_outcome", "fmt_case_outcome"]);
}
