use std::{panic, thread, time::Instant};

use crate::{
    DispatchReport,
    catalog::TestCatalog,
    error::DispatchError,
    filter::TestFilter,
    menu::MenuBuilder,
    options::RunOptions,
    outcome::CaseOutcome,
    panic::{CasePanicHandler, DefaultPanicHandler},
    pipeline::{ExecutionEvent, FilterPipeline, FilterRegistry, execute},
    reporter::*,
    resolve::resolve,
    runner::{CaseRunner, SimpleRunner},
    stats::aggregate,
    test::{TestCase, TestGroup},
};

enum ReportEvent<'t> {
    CaseStart(&'t TestCase),
    CaseOutcome(&'t TestCase, CaseOutcome),
}

/// The entry point of testflow.
///
/// A dispatcher resolves what to run from [`RunOptions`], threads the tests
/// through the configured filters, executes them and lets every filter analyze
/// the results. Strategies are swapped with the `with_*` methods, each returning
/// a dispatcher with the new strategy type.
///
/// ```no_run
/// # use testflow::{Dispatcher, StaticCatalog, RunOptions, reporter::TerseReporter};
/// let catalog = StaticCatalog::new();
/// let mut dispatcher = Dispatcher::new(catalog).with_reporter(TerseReporter::default());
/// let options = RunOptions::from_toml_str(r#"group = "lib.tests""#)?;
/// if let Some(report) = dispatcher.run(None, options)? {
///     println!("{} asserts", report.stats().asserts);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Dispatcher<Catalog, PanicHandler, Runner, Reporter> {
    pub(crate) catalog: Catalog,
    pub(crate) filters: FilterRegistry,
    pub(crate) defaults: RunOptions,
    pub(crate) panic_handler: PanicHandler,
    pub(crate) runner: Runner,
    pub(crate) reporter: Reporter,
}

impl<Catalog> Dispatcher<Catalog, DefaultPanicHandler, SimpleRunner, NoReporter> {
    /// A dispatcher with the built in filters, catching panics, running cases in
    /// order and reporting nothing.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            filters: FilterRegistry::with_builtins(),
            defaults: RunOptions::defaults(),
            panic_handler: DefaultPanicHandler,
            runner: SimpleRunner,
            reporter: NoReporter,
        }
    }
}

impl<Catalog, PanicHandler, Runner, Reporter> Dispatcher<Catalog, PanicHandler, Runner, Reporter>
where
    Catalog: TestCatalog,
    PanicHandler: CasePanicHandler,
    Runner: CaseRunner,
    Reporter: RunReporter + Send,
    Reporter::Error: Send,
{
    /// Run the tests selected by `selector`, or by `options` if no selector is given.
    ///
    /// `options` are merged over the dispatcher defaults first. Returns `None`
    /// when nothing is selected. Apply failures and unresolvable selections abort
    /// the run before any case executes. Failing cases and failing analyses do
    /// not: they end up in the report.
    pub fn run(
        &mut self,
        selector: Option<TestGroup>,
        options: RunOptions,
    ) -> Result<Option<DispatchReport<Reporter::Error>>, DispatchError> {
        let now = Instant::now();
        let options = options.merged_over(&self.defaults);
        tracing::debug!(base = ?options.base, "dispatching");

        let selected = match selector {
            Some(group) => Some(group),
            None => resolve(&options, &self.catalog)?,
        };
        let Some(tests) = selected else {
            tracing::debug!("nothing selected");
            return Ok(None);
        };

        let title = options.title().or(tests.name.clone()).unwrap_or_default();
        let specs = options.filter_specs();
        let pipeline = FilterPipeline::from_specs(&self.filters, &specs)?;
        let tests = pipeline.apply(tests)?;
        tracing::info!(
            %title,
            cases = tests.len(),
            filters = ?pipeline.ids().collect::<Vec<_>>(),
            "running tests"
        );

        let reporter = &mut self.reporter;
        let mut fmt_errors = FmtErrors::new();
        let run_start = FmtRunStart {
            title: &title,
            cases: tests.len(),
        };
        fmt_errors.push_on_error(named_fmt!(reporter.fmt_run_start(run_start)));

        let panic_handler = &self.panic_handler;
        let runner = &self.runner;
        let (results, reporter, mut fmt_errors) = thread::scope(|scope| {
            let (rtx, rrx) = crossbeam_channel::bounded(4);
            let report_thread = scope.spawn(move || {
                while let Ok(event) = rrx.recv() {
                    fmt_errors.push_on_error(match event {
                        ReportEvent::CaseStart(case) => {
                            named_fmt!(reporter.fmt_case_start(FmtCaseStart { case }))
                        }
                        ReportEvent::CaseOutcome(case, outcome) => {
                            let data = FmtCaseOutcome {
                                case,
                                outcome: &outcome,
                            };
                            named_fmt!(reporter.fmt_case_outcome(data))
                        }
                    });
                }
                (reporter, fmt_errors)
            });

            let results = execute(&tests, panic_handler, runner, |event| {
                let _ = rtx.send(match event {
                    ExecutionEvent::CaseStart(case) => ReportEvent::CaseStart(case),
                    ExecutionEvent::CaseOutcome(case, outcome) => {
                        ReportEvent::CaseOutcome(case, outcome.clone())
                    }
                });
            });

            drop(rtx);
            let (reporter, fmt_errors) = report_thread
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload));
            (results, reporter, fmt_errors)
        });

        let filters = pipeline.analyze(&results);
        let stats = aggregate(&results);
        let duration = now.elapsed();
        let run_outcomes = FmtRunOutcomes {
            title: &title,
            stats: &stats,
            filters: &filters,
            duration,
        };
        fmt_errors.push_on_error(named_fmt!(reporter.fmt_run_outcomes(run_outcomes)));
        tracing::info!(
            asserts = stats.asserts,
            errors = stats.errors.len(),
            ?duration,
            "finished tests"
        );

        Ok(Some(DispatchReport {
            title,
            results,
            filters,
            duration,
            fmt_errors,
        }))
    }
}

impl<Catalog, PanicHandler, Runner, Reporter> Dispatcher<Catalog, PanicHandler, Runner, Reporter> {
    /// Register an additional filter, replacing a filter with the same identifier.
    pub fn with_filter(
        mut self,
        id: impl Into<String>,
        filter: impl TestFilter + Send + Sync + 'static,
    ) -> Self {
        self.filters.insert(id, filter);
        self
    }

    /// Replace the whole filter registry.
    pub fn with_filters(self, filters: FilterRegistry) -> Self {
        Self { filters, ..self }
    }

    /// Options every run is merged over.
    pub fn with_defaults(self, defaults: RunOptions) -> Self {
        Self { defaults, ..self }
    }

    pub fn with_panic_handler<WithPanicHandler: CasePanicHandler>(
        self,
        panic_handler: WithPanicHandler,
    ) -> Dispatcher<Catalog, WithPanicHandler, Runner, Reporter> {
        Dispatcher {
            catalog: self.catalog,
            filters: self.filters,
            defaults: self.defaults,
            panic_handler,
            runner: self.runner,
            reporter: self.reporter,
        }
    }

    pub fn with_runner<WithRunner: CaseRunner>(
        self,
        runner: WithRunner,
    ) -> Dispatcher<Catalog, PanicHandler, WithRunner, Reporter> {
        Dispatcher {
            catalog: self.catalog,
            filters: self.filters,
            defaults: self.defaults,
            panic_handler: self.panic_handler,
            runner,
            reporter: self.reporter,
        }
    }

    pub fn with_reporter<WithReporter: RunReporter>(
        self,
        reporter: WithReporter,
    ) -> Dispatcher<Catalog, PanicHandler, Runner, WithReporter> {
        Dispatcher {
            catalog: self.catalog,
            filters: self.filters,
            defaults: self.defaults,
            panic_handler: self.panic_handler,
            runner: self.runner,
            reporter,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    pub fn defaults(&self) -> &RunOptions {
        &self.defaults
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn into_reporter(self) -> Reporter {
        self.reporter
    }
}

impl<Catalog: TestCatalog, PanicHandler, Runner, Reporter>
    Dispatcher<Catalog, PanicHandler, Runner, Reporter>
{
    /// Render the navigation menu of the catalog, see [`MenuBuilder::menu`].
    pub fn menu(&self, format: &str) -> Option<String> {
        MenuBuilder::new().menu(&self.catalog, format)
    }
}
