use crate::{
    error::FilterFailure,
    filter::{OptionsExt, TestFilter, regroup},
    options::FilterOptions,
    test::TestGroup,
};

/// Keeps the first `count` flattened cases.
///
/// `count` is a required apply option.
#[derive(Debug, Default, Clone)]
pub struct Take;

impl TestFilter for Take {
    fn apply(&self, tests: TestGroup, options: &FilterOptions) -> Result<TestGroup, FilterFailure> {
        let Some(count) = options.get_usize("count")? else {
            return Err(FilterFailure::invalid_option("count", "is required"));
        };

        let name = tests.name.clone();
        let cases = tests.into_cases().into_iter().take(count);
        Ok(regroup(name, cases))
    }
}
