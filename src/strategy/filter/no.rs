use crate::filter::TestFilter;

/// A [`TestFilter`] that changes nothing.
///
/// The test set passes through untouched and the analysis is `null`.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct NoFilter;

impl NoFilter {
    pub fn new() -> Self {
        Self
    }
}

impl TestFilter for NoFilter {}
