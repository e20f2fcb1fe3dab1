use serde_json::{Value, json};

use crate::{
    error::FilterFailure,
    filter::{OptionsExt, TestFilter},
    options::FilterOptions,
    record::ResultRecord,
    stats::aggregate,
};

/// Reports aggregated [`Stats`](crate::stats::Stats) as its analysis.
///
/// With the analyze option `errors_only = true` only `asserts` and `errors`
/// are reported. The test set is left untouched.
#[derive(Debug, Default, Clone)]
pub struct Summary;

impl TestFilter for Summary {
    fn analyze(
        &self,
        results: &[ResultRecord],
        options: &FilterOptions,
    ) -> Result<Value, FilterFailure> {
        let stats = aggregate(results);
        if options.get_bool("errors_only")?.unwrap_or(false) {
            return Ok(json!({
                "asserts": stats.asserts,
                "errors": stats.errors,
            }));
        }
        serde_json::to_value(&stats).map_err(|err| FilterFailure::other(err.to_string()))
    }
}
