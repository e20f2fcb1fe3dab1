//! The two phase filter pipeline.
//!
//! A [`FilterPipeline`] is an ordered list of filters, each with its own
//! [`FilterSpec`]. A run goes through three strictly sequential phases:
//!
//! 1. [`FilterPipeline::apply`] threads the test set through every filter in
//!    declaration order, each filter replacing the working set
//! 2. [`execute`] runs the final test set exactly once, case after case
//! 3. [`FilterPipeline::analyze`] hands the raw results to every filter, again in
//!    declaration order, collecting one analysis per filter
//!
//! Analysis does not chain: every filter sees the same, untransformed results.

use indexmap::IndexMap;
use serde_json::Value;

use crate::{
    error::{DispatchError, FilterAnalyzeError, FilterApplyError},
    filter::{NameFilter, NoFilter, Repeat, Reverse, Summary, Take, TestFilter},
    options::{FilterSpec, FilterSpecs},
    outcome::CaseOutcome,
    panic::CasePanicHandler,
    record::ResultRecord,
    runner::CaseRunner,
    test::{TestCase, TestGroup},
};

/// The outcome of one filter's analyze step.
pub type FilterAnalysis = Result<Value, FilterAnalyzeError>;

/// Analyses keyed by filter identifier, in pipeline order.
pub type FilterAnalyses = IndexMap<String, FilterAnalysis>;

type BoxedFilter = Box<dyn TestFilter + Send + Sync>;

/// Filters known by identifier.
///
/// The dispatcher looks up the identifiers named in the run options here to
/// build a [`FilterPipeline`].
#[derive(Default)]
pub struct FilterRegistry {
    filters: IndexMap<String, BoxedFilter>,
}

impl std::fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.filters.keys()).finish()
    }
}

impl FilterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built in filter:
    /// `no`, `name`, `repeat`, `reverse`, `take` and `summary`.
    pub fn with_builtins() -> Self {
        Self::new()
            .with("no", NoFilter)
            .with("name", NameFilter)
            .with("repeat", Repeat)
            .with("reverse", Reverse)
            .with("take", Take)
            .with("summary", Summary)
    }

    /// Register `filter` under `id`, replacing a filter already registered under it.
    pub fn with(
        mut self,
        id: impl Into<String>,
        filter: impl TestFilter + Send + Sync + 'static,
    ) -> Self {
        self.insert(id, filter);
        self
    }

    pub fn insert(
        &mut self,
        id: impl Into<String>,
        filter: impl TestFilter + Send + Sync + 'static,
    ) {
        self.filters.insert(id.into(), Box::new(filter));
    }

    pub fn get(&self, id: &str) -> Option<&(dyn TestFilter + Send + Sync)> {
        self.filters.get(id).map(|filter| filter.as_ref())
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }
}

#[derive(Clone, Copy)]
struct PipelineEntry<'f> {
    id: &'f str,
    filter: &'f dyn TestFilter,
    spec: &'f FilterSpec,
}

/// An ordered list of filters with their option bundles.
#[derive(Default, Clone)]
pub struct FilterPipeline<'f> {
    entries: Vec<PipelineEntry<'f>>,
}

impl std::fmt::Debug for FilterPipeline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| (entry.id, entry.spec)))
            .finish()
    }
}

impl<'f> FilterPipeline<'f> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up every configured filter in `registry`, keeping the order of `specs`.
    ///
    /// Fails on the first identifier the registry does not know.
    pub fn from_specs(
        registry: &'f FilterRegistry,
        specs: &'f FilterSpecs,
    ) -> Result<Self, DispatchError> {
        let mut pipeline = Self::new();
        for (id, spec) in specs {
            let filter = registry.get(id).ok_or_else(|| DispatchError::UnknownFilter {
                filter: id.clone(),
                known: registry.ids().map(str::to_string).collect(),
            })?;
            pipeline.push(id, filter, spec);
        }
        Ok(pipeline)
    }

    /// Append a filter. The same identifier may appear more than once, its
    /// analysis is then overwritten by the later entry.
    pub fn push(&mut self, id: &'f str, filter: &'f dyn TestFilter, spec: &'f FilterSpec) {
        self.entries.push(PipelineEntry { id, filter, spec });
    }

    pub fn with(mut self, id: &'f str, filter: &'f dyn TestFilter, spec: &'f FilterSpec) -> Self {
        self.push(id, filter, spec);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The filter identifiers in pipeline order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = &'f str> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    /// Thread `tests` through every filter's apply step.
    ///
    /// Stops at the first failing filter.
    pub fn apply(&self, tests: TestGroup) -> Result<TestGroup, FilterApplyError> {
        self.entries.iter().try_fold(tests, |tests, entry| {
            let before = tests.len();
            let tests = entry
                .filter
                .apply(tests, &entry.spec.apply)
                .map_err(|source| FilterApplyError {
                    filter: entry.id.to_string(),
                    source,
                })?;
            tracing::debug!(
                filter = entry.id,
                before,
                after = tests.len(),
                "applied filter"
            );
            Ok(tests)
        })
    }

    /// Run every filter's analyze step over the same `results`.
    ///
    /// A failing filter gets an error entry, the other filters are still analyzed.
    pub fn analyze(&self, results: &[ResultRecord]) -> FilterAnalyses {
        let mut analyses = FilterAnalyses::with_capacity(self.entries.len());
        for entry in &self.entries {
            let analysis = entry
                .filter
                .analyze(results, &entry.spec.analyze)
                .map_err(|source| FilterAnalyzeError {
                    filter: entry.id.to_string(),
                    source,
                });
            if let Err(err) = &analysis {
                tracing::warn!(filter = entry.id, error = %err.source, "filter analysis failed");
            }
            analyses.insert(entry.id.to_string(), analysis);
        }
        analyses
    }
}

/// Progress of [`execute`], observed by the dispatcher to feed reporters.
#[derive(Debug, Clone, Copy)]
pub enum ExecutionEvent<'t, 'o> {
    CaseStart(&'t TestCase),
    CaseOutcome(&'t TestCase, &'o CaseOutcome),
}

/// Run every case of `tests` once, in flattening order.
///
/// Returns the records of all cases concatenated in execution order.
pub fn execute<'t, P, R>(
    tests: &'t TestGroup,
    panic_handler: &P,
    runner: &R,
    observe: impl Fn(ExecutionEvent<'t, '_>),
) -> Vec<ResultRecord>
where
    P: CasePanicHandler,
    R: CaseRunner,
{
    let observe = &observe;
    let cases = tests.cases().collect::<Vec<_>>();
    let runs = cases.into_iter().map(move |case| {
        (
            move || {
                observe(ExecutionEvent::CaseStart(case));
                panic_handler.handle(|| case.call(), case)
            },
            case,
        )
    });

    let mut results = Vec::new();
    for (case, outcome) in runner.run(runs) {
        observe(ExecutionEvent::CaseOutcome(case, &outcome));
        results.extend(outcome.records);
    }
    tracing::debug!(
        cases = tests.len(),
        records = results.len(),
        "executed tests"
    );
    results
}
