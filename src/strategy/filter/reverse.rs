use crate::{
    error::FilterFailure,
    filter::{TestFilter, regroup},
    options::FilterOptions,
    test::TestGroup,
};

/// Reverses the flattened case order.
#[derive(Debug, Default, Clone)]
pub struct Reverse;

impl TestFilter for Reverse {
    fn apply(&self, tests: TestGroup, _: &FilterOptions) -> Result<TestGroup, FilterFailure> {
        let name = tests.name.clone();
        let mut cases = tests.into_cases();
        cases.reverse();
        Ok(regroup(name, cases))
    }
}
