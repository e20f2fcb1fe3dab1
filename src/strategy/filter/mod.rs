//! Test filters for testflow.
//!
//! A filter takes part in both phases of a run. Before execution, [`TestFilter::apply`]
//! receives the current test set and returns the set that replaces it, so filters
//! compose: a filter sees whatever the filters declared before it produced. After
//! execution, [`TestFilter::analyze`] receives the raw, untransformed results and
//! returns one analysis value for the filter.
//!
//! Each phase gets its own option bundle. A bundle is never absent, a filter
//! configured without options gets an empty one and should fall back to sensible
//! defaults.
//!
//! Implement [`TestFilter`] to define a filter, or use one of the built in ones
//! registered by [`FilterRegistry::with_builtins`](crate::pipeline::FilterRegistry::with_builtins).

use serde_json::Value;

use crate::{
    error::FilterFailure,
    options::FilterOptions,
    record::ResultRecord,
    test::{TestCase, TestGroup},
};

mod no;
pub use no::*;

mod name;
pub use name::*;

mod repeat;
pub use repeat::*;

mod reverse;
pub use reverse::*;

mod take;
pub use take::*;

mod summary;
pub use summary::*;

/// A pluggable transform over the test set and the result set.
///
/// Both methods default to doing nothing, so a filter only implements the phase
/// it cares about.
pub trait TestFilter {
    /// Transform the test set before execution.
    ///
    /// Returning an error aborts the whole run before anything executes.
    fn apply(&self, tests: TestGroup, options: &FilterOptions) -> Result<TestGroup, FilterFailure> {
        let _ = options;
        Ok(tests)
    }

    /// Analyze the results of the run.
    ///
    /// Returning an error is recorded for this filter only, the results and the
    /// analyses of other filters are kept.
    fn analyze(
        &self,
        results: &[ResultRecord],
        options: &FilterOptions,
    ) -> Result<Value, FilterFailure> {
        let _ = (results, options);
        Ok(Value::Null)
    }
}

/// Closures transforming the test set act as apply-only filters.
impl<F> TestFilter for F
where
    F: Fn(TestGroup, &FilterOptions) -> Result<TestGroup, FilterFailure>,
{
    fn apply(&self, tests: TestGroup, options: &FilterOptions) -> Result<TestGroup, FilterFailure> {
        self(tests, options)
    }
}

/// Typed access to option bundle values.
///
/// Missing keys and `null` values read as `None`, values of the wrong type are an
/// [`FilterFailure::InvalidOption`].
pub trait OptionsExt {
    fn get_bool(&self, key: &str) -> Result<Option<bool>, FilterFailure>;
    fn get_usize(&self, key: &str) -> Result<Option<usize>, FilterFailure>;
    fn get_u64(&self, key: &str) -> Result<Option<u64>, FilterFailure>;

    /// A string or a list of strings.
    fn get_strings(&self, key: &str) -> Result<Vec<String>, FilterFailure>;
}

impl OptionsExt for FilterOptions {
    fn get_bool(&self, key: &str) -> Result<Option<bool>, FilterFailure> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FilterFailure::invalid_option(
                key,
                format!("must be a boolean, got {other}"),
            )),
        }
    }

    fn get_usize(&self, key: &str) -> Result<Option<usize>, FilterFailure> {
        let Some(n) = self.get_u64(key)? else {
            return Ok(None);
        };
        let too_large = |_| FilterFailure::invalid_option(key, format!("{n} is too large"));
        usize::try_from(n).map(Some).map_err(too_large)
    }

    fn get_u64(&self, key: &str) -> Result<Option<u64>, FilterFailure> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) if n.as_u64().is_some() => Ok(n.as_u64()),
            Some(other) => Err(FilterFailure::invalid_option(
                key,
                format!("must be a non-negative integer, got {other}"),
            )),
        }
    }

    fn get_strings(&self, key: &str) -> Result<Vec<String>, FilterFailure> {
        let invalid = |other: &Value| {
            let problem = format!("must be a string or a list of strings, got {other}");
            FilterFailure::invalid_option(key, problem)
        };
        match self.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(vec![s.clone()]),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(invalid(other)),
                })
                .collect(),
            Some(other) => Err(invalid(other)),
        }
    }
}

/// Rebuild a flat group from transformed cases, keeping the group name.
pub(crate) fn regroup(
    name: Option<String>,
    cases: impl IntoIterator<Item = TestCase>,
) -> TestGroup {
    TestGroup {
        name,
        ..TestGroup::from_cases(cases)
    }
}
