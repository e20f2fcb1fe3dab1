//! Turning run options into a runnable test tree.

use crate::{catalog::TestCatalog, error::ResolutionError, options::RunOptions, test::TestGroup};

/// Build the test group selected by `options`.
///
/// A `case` wins over `group` and resolves to a group holding just that case.
/// Each selected group identifier becomes one child group, in the order given.
/// Without any selection there is nothing to run and `None` is returned.
pub fn resolve<C>(options: &RunOptions, catalog: &C) -> Result<Option<TestGroup>, ResolutionError>
where
    C: TestCatalog + ?Sized,
{
    if let Some(id) = &options.case {
        let case = catalog.case(id)?;
        tracing::debug!(case = %id, "resolved case");
        return Ok(Some(TestGroup::named(id.to_string()).with_child(case)));
    }

    if let Some(selection) = &options.group {
        let mut root = TestGroup::named(selection.to_string());
        for id in &selection.0 {
            let group = catalog.group(id)?;
            tracing::debug!(group = %id, cases = group.len(), "resolved group");
            root.push(group);
        }
        return Ok(Some(root));
    }

    Ok(None)
}
