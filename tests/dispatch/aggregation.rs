use pretty_assertions::assert_eq;
use serde_json::json;
use testflow::{
    Dispatcher, ResultKind, ResultRecord, RunOptions, StaticCatalog, aggregate,
    options::GroupSelection, test::CaseFnHandle,
};

use crate::{catalog, id};

#[test]
fn single_case_stats() {
    let catalog = StaticCatalog::new().with_case(
        id("Lib.Tests.FooTest"),
        CaseFnHandle::from_shared(|| vec![ResultRecord::pass(), ResultRecord::fail("x")]),
    );
    let mut dispatcher = Dispatcher::new(catalog);

    let options = RunOptions::new().with_case(id("Lib.Tests.FooTest"));
    let report = dispatcher.run(None, options).unwrap().unwrap();
    let stats = report.stats();

    assert_eq!(report.title, "Lib.Tests.FooTest");
    assert!(report.filters.is_empty());
    assert_eq!(stats.asserts, 2);
    assert_eq!(stats.passes, vec![ResultRecord::default()]);
    assert_eq!(stats.fails, vec![ResultRecord::default().with_message("x")]);
    assert_eq!(stats.errors, vec![ResultRecord::fail("x")]);
    assert!(stats.exceptions.is_empty());
    assert!(!report.is_success());
}

#[test]
fn nothing_selected() {
    let mut dispatcher = Dispatcher::new(catalog());
    let report = dispatcher.run(None, RunOptions::defaults());
    assert!(report.unwrap().is_none());
}

#[test]
fn groups_run_in_declared_order() {
    let mut dispatcher = Dispatcher::new(catalog());
    let options = RunOptions::new().with_group(GroupSelection(vec![
        id("Other.tests"),
        id("Lib.tests.cases.net"),
    ]));

    let report = dispatcher.run(None, options).unwrap().unwrap();
    assert_eq!(report.title, "Other.tests, Lib.tests.cases.net");

    let kinds: Vec<_> = report.results.iter().map(|record| record.kind).collect();
    assert_eq!(
        kinds,
        [
            Some(ResultKind::Pass),
            Some(ResultKind::Pass),
            Some(ResultKind::Exception),
        ]
    );
    assert_eq!(
        report.results[2].extra.get("case"),
        Some(&json!("Lib.tests.cases.net.HttpTest"))
    );

    let stats = report.stats();
    assert_eq!(stats.asserts, 2);
    assert_eq!(stats.exceptions.len(), 1);
    assert_eq!(stats.errors.len(), 1);
}

#[test]
fn aggregation_ignores_grouping() {
    let mut dispatcher = Dispatcher::new(catalog());
    let options = RunOptions::from_toml_str(r#"group = "Lib""#).unwrap();
    let report = dispatcher.run(None, options).unwrap().unwrap();

    let halves = report
        .results
        .chunks(2)
        .map(<[ResultRecord]>::to_vec)
        .collect::<Vec<_>>();
    assert_eq!(aggregate(&halves), report.stats());
    assert_eq!(report.stats().asserts, 4);
}
