use testflow::{
    Dispatcher, FilterSpec, ResultRecord, RunOptions, StaticCatalog, TestIdentifier,
    filter::{Reverse, Summary},
    pipeline::FilterRegistry,
    reporter::TerseReporter,
    test::{CaseFnHandle, CaseRecords},
};

fn add() -> CaseRecords {
    match 1 + 1 {
        2 => ResultRecord::pass().into(),
        sum => ResultRecord::fail(format!("expected 2, got {sum}")).into(),
    }
}

fn greet() -> Result<(), String> {
    match "hello".len() {
        5 => Ok(()),
        len => Err(format!("unexpected length {len}")),
    }
}

const CASES: &[(&str, CaseFnHandle)] = &[
    ("AddTest", CaseFnHandle::from_const_fn(add)),
    ("GreetTest", CaseFnHandle::from_static_obj(&|| greet())),
    ("EmptyTest", CaseFnHandle::from_static_obj(&|| ())),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let root: TestIdentifier = "demo.tests.cases".parse()?;
    let mut catalog = StaticCatalog::new();
    for (name, function) in CASES {
        catalog.insert(root.join(*name)?, function.clone());
    }
    catalog.insert(
        root.join("net")?.join("PingTest")?,
        CaseFnHandle::from_shared(|| ResultRecord::exception("host unreachable")),
    );

    let filters = FilterRegistry::new()
        .with("reverse", Reverse)
        .with("summary", Summary);
    let reporter = TerseReporter::default().with_target(Vec::new());
    let mut dispatcher = Dispatcher::new(catalog)
        .with_filters(filters)
        .with_reporter(reporter);

    println!("{}", dispatcher.menu("text").unwrap_or_default());

    let options = RunOptions::new()
        .with_group(root)
        .with_filter("reverse", FilterSpec::new())
        .with_filter("summary", FilterSpec::new());
    let Some(report) = dispatcher.run(None, options)? else {
        return Ok(());
    };
    if let Ok(summary) = &report.filters["summary"] {
        println!("summary: {summary:#}");
    }

    let output = dispatcher.into_reporter().into_target();
    print!("{}", String::from_utf8_lossy(&output));
    Ok(())
}
