use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use testflow::{
    Dispatcher, FilterSpec, ResultRecord, RunOptions,
    error::{DispatchError, FilterFailure},
    filter::TestFilter,
    options::FilterOptions,
};

use crate::{catalog, id};

#[test]
fn analyses_keep_declaration_order() {
    let mut dispatcher = Dispatcher::new(catalog());
    let options = RunOptions::from_json_str(
        r#"{
            "group": "Lib",
            "filters": {"summary": {"analyze": {"errors_only": true}}, "no": null, "repeat": {}}
        }"#,
    )
    .unwrap();

    let report = dispatcher.run(None, options).unwrap().unwrap();
    assert_eq!(
        report.filters.keys().collect::<Vec<_>>(),
        ["summary", "no", "repeat"]
    );
    assert_eq!(
        report.filters["summary"].as_ref().unwrap()["asserts"],
        json!(4)
    );
    assert_eq!(report.filters["no"], Ok(Value::Null));
}

#[test]
fn apply_order_changes_what_runs() {
    let mut dispatcher = Dispatcher::new(catalog());
    let reverse_then_take = RunOptions::from_toml_str(
        r#"
        group = "Lib"
        filters = ["reverse", { take = { apply = { count = 1 } } }]
        "#,
    )
    .unwrap();
    let take_then_reverse = RunOptions::from_toml_str(
        r#"
        group = "Lib"
        filters = [{ take = { apply = { count = 1 } } }, "reverse"]
        "#,
    )
    .unwrap();

    let report = dispatcher.run(None, reverse_then_take).unwrap().unwrap();
    assert_eq!(report.results.len(), 1);
    assert_eq!(
        report.results[0].message.as_deref(),
        Some("connection refused")
    );

    let report = dispatcher.run(None, take_then_reverse).unwrap().unwrap();
    assert_eq!(
        report.results,
        vec![ResultRecord::pass(), ResultRecord::fail("x")]
    );
}

#[test]
fn repeated_runs_are_analyzed() {
    let mut dispatcher = Dispatcher::new(catalog());
    let repeat = FilterSpec::new()
        .with_apply("times", 3)
        .with_analyze("times", 3);
    let options = RunOptions::new()
        .with_case(id("Lib.tests.cases.FooTest"))
        .with_filter("repeat", repeat);

    let report = dispatcher.run(None, options).unwrap().unwrap();
    assert_eq!(report.results.len(), 6);
    assert_eq!(
        report.filters["repeat"],
        Ok(json!({"runs": 3, "records_per_run": 2}))
    );
    assert_eq!(report.stats().errors.len(), 3);
}

struct Strict;

impl TestFilter for Strict {
    fn analyze(&self, results: &[ResultRecord], _: &FilterOptions) -> Result<Value, FilterFailure> {
        match results.iter().all(|record| record.message.is_none()) {
            true => Ok(Value::Bool(true)),
            false => Err(FilterFailure::other("found messages")),
        }
    }
}

#[test]
fn failing_analysis_keeps_results() {
    let mut dispatcher = Dispatcher::new(catalog()).with_filter("strict", Strict);
    let options = RunOptions::new()
        .with_case(id("Lib.tests.cases.FooTest"))
        .with_filter("strict", FilterSpec::new())
        .with_filter("summary", FilterSpec::new());

    let report = dispatcher.run(None, options).unwrap().unwrap();
    assert_eq!(report.results.len(), 2);

    let err = report.filters["strict"].as_ref().unwrap_err();
    assert_eq!(err.filter, "strict");
    assert_eq!(err.source, FilterFailure::other("found messages"));
    assert!(report.filters["summary"].is_ok());
}

#[test]
fn failing_apply_aborts_the_run() {
    let mut dispatcher = Dispatcher::new(catalog());
    let options = RunOptions::new()
        .with_group(id("Lib"))
        .with_filter("repeat", FilterSpec::new().with_apply("times", 0));

    match dispatcher.run(None, options) {
        Err(DispatchError::FilterApply(err)) => assert_eq!(err.filter, "repeat"),
        other => panic!("expected an apply error, got {other:?}"),
    }
}

#[test]
fn unknown_filters_are_rejected_before_running() {
    let mut dispatcher = Dispatcher::new(catalog());
    let options = RunOptions::from_toml_str(
        r#"
        case = "Lib.tests.cases.FooTest"
        filters = ["summary", "coverage"]
        "#,
    )
    .unwrap();

    let err = dispatcher.run(None, options).unwrap_err();
    assert!(err.to_string().contains("summary"));
    let DispatchError::UnknownFilter { filter, .. } = err else {
        panic!("expected an unknown filter, got {err:?}");
    };
    assert_eq!(filter, "coverage");
}
