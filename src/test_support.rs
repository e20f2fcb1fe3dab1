use std::{borrow::Cow, panic::RefUnwindSafe};

use crate::{
    Dispatcher,
    catalog::StaticCatalog,
    panic::NoPanicHandler,
    record::ResultRecord,
    reporter::NoReporter,
    runner::SimpleRunner,
    test::{CaseFn, CaseFnHandle, TestCase, TestGroup},
};

pub struct BuildCase {
    pub id: Cow<'static, str>,
    pub func: CaseFnHandle,
}

impl Default for BuildCase {
    fn default() -> Self {
        Self {
            id: Default::default(),
            func: CaseFnHandle::Static(&|| ()),
        }
    }
}

impl From<BuildCase> for TestCase {
    fn from(value: BuildCase) -> Self {
        TestCase::new(
            value.id.parse().expect("test support ids are valid"),
            value.func,
        )
    }
}

impl<F> From<F> for CaseFnHandle
where
    F: CaseFn + Send + Sync + RefUnwindSafe + 'static,
{
    fn from(value: F) -> Self {
        CaseFnHandle::Shared(std::sync::Arc::new(value))
    }
}

macro_rules! case {
    {$($field:ident: $value:expr),* $(,)?} => {
        $crate::test::TestCase::from($crate::test_support::BuildCase {
            $($field: From::from($value),)*
            ..($crate::test_support::BuildCase {
                id: concat!("support.", line!(), "_", column!()).into(),
                ..Default::default()
            })
        })
    };
}

pub(crate) use case;

/// A flat group of cases each emitting the given records.
pub fn group_of(cases: &[(&'static str, Vec<ResultRecord>)]) -> TestGroup {
    TestGroup::from_cases(cases.iter().cloned().map(|(id, records)| {
        case! {id: id, func: move || records.clone()}
    }))
}

/// The identifiers of a group's flattened cases, rendered as strings.
pub fn ids(group: &TestGroup) -> Vec<String> {
    group.cases().map(|case| case.id.to_string()).collect()
}

pub fn dispatcher(
    catalog: StaticCatalog,
) -> Dispatcher<StaticCatalog, NoPanicHandler, SimpleRunner, NoReporter> {
    Dispatcher::new(catalog).with_panic_handler(NoPanicHandler)
}
