use serde_json::Value;

use crate::{
    error::FilterFailure,
    filter::{OptionsExt, TestFilter, regroup},
    options::FilterOptions,
    record::ResultRecord,
    test::TestGroup,
};

/// Selects cases by identifier.
///
/// Apply options:
/// - `filter`: a string or list of strings, a case is kept if its identifier
///   contains any of them (all cases are kept when empty)
/// - `skip`: a string or list of strings, a case is dropped if its identifier
///   contains any of them
/// - `exact`: compare whole identifiers instead of substrings
///
/// The analysis is `null`.
#[derive(Debug, Default, Clone)]
pub struct NameFilter;

impl NameFilter {
    pub fn new() -> Self {
        Self
    }
}

impl TestFilter for NameFilter {
    fn apply(&self, tests: TestGroup, options: &FilterOptions) -> Result<TestGroup, FilterFailure> {
        let exact = options.get_bool("exact")?.unwrap_or(false);
        let filter = options.get_strings("filter")?;
        let skip = options.get_strings("skip")?;

        if filter.is_empty() && skip.is_empty() {
            return Ok(tests);
        }

        let matches = |name: &str, pattern: &String| match exact {
            true => name == pattern,
            false => name.contains(pattern.as_str()),
        };

        let name = tests.name.clone();
        let mut filtered = 0;
        let remaining: Vec<_> = tests
            .into_cases()
            .into_iter()
            .filter(|case| {
                let id = case.id.to_string();
                let in_filter = filter.is_empty() || filter.iter().any(|f| matches(&id, f));
                let skipped = skip.iter().any(|s| matches(&id, s));
                let keep = in_filter && !skipped;
                if !keep {
                    filtered += 1;
                }
                keep
            })
            .collect();

        tracing::debug!(kept = remaining.len(), filtered, "name filter applied");
        Ok(regroup(name, remaining))
    }

    fn analyze(&self, _: &[ResultRecord], _: &FilterOptions) -> Result<Value, FilterFailure> {
        Ok(Value::Null)
    }
}
