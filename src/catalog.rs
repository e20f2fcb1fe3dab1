//! Test discovery.
//!
//! A [`TestCatalog`] knows which cases exist and how to construct them. It feeds
//! both the group resolver (to build runnable trees) and the menu builder (as the
//! flat list of qualified case identifiers).

use indexmap::IndexMap;

use crate::{
    error::ResolutionError,
    ident::TestIdentifier,
    test::{CaseFnHandle, TestCase, TestGroup},
};

/// The discovery service consumed by the dispatcher and the menu builder.
pub trait TestCatalog {
    /// Every known case identifier, in discovery order.
    fn locate(&self) -> Vec<TestIdentifier>;

    /// Construct the case named by `id`.
    fn case(&self, id: &TestIdentifier) -> Result<TestCase, ResolutionError>;

    /// Construct the group named by `id`.
    ///
    /// The default implementation collects every located case below `id`, in
    /// discovery order. A group without any case is unknown.
    fn group(&self, id: &TestIdentifier) -> Result<TestGroup, ResolutionError> {
        let mut group = TestGroup::named(id.to_string());
        let located = self.locate();
        for case_id in located.iter().filter(|case_id| case_id.starts_with(id)) {
            group.push(self.case(case_id)?);
        }

        match group.children.is_empty() {
            true => Err(ResolutionError::UnknownGroup(id.clone())),
            false => Ok(group),
        }
    }
}

/// An in-memory catalog keeping cases in registration order.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    cases: IndexMap<TestIdentifier, CaseFnHandle>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a case, replacing the function of an already registered identifier.
    pub fn with_case(mut self, id: TestIdentifier, function: CaseFnHandle) -> Self {
        self.insert(id, function);
        self
    }

    pub fn insert(&mut self, id: TestIdentifier, function: CaseFnHandle) {
        self.cases.insert(id, function);
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl TestCatalog for StaticCatalog {
    fn locate(&self) -> Vec<TestIdentifier> {
        self.cases.keys().cloned().collect()
    }

    fn case(&self, id: &TestIdentifier) -> Result<TestCase, ResolutionError> {
        self.cases
            .get(id)
            .map(|function| TestCase::new(id.clone(), function.clone()))
            .ok_or_else(|| ResolutionError::UnknownCase(id.clone()))
    }
}

impl<C: TestCatalog + ?Sized> TestCatalog for &C {
    fn locate(&self) -> Vec<TestIdentifier> {
        (**self).locate()
    }

    fn case(&self, id: &TestIdentifier) -> Result<TestCase, ResolutionError> {
        (**self).case(id)
    }

    fn group(&self, id: &TestIdentifier) -> Result<TestGroup, ResolutionError> {
        (**self).group(id)
    }
}
