use serde_json::{Value, json};

use crate::{
    error::FilterFailure,
    filter::{OptionsExt, TestFilter, regroup},
    options::FilterOptions,
    record::ResultRecord,
    test::TestGroup,
};

/// Runs the whole test set several times.
///
/// Apply option `times` (default `1`) repeats the flattened case sequence,
/// `times = 0` is rejected. The analysis reports how many records each run
/// produced on average, as `{"runs": times, "records_per_run": n}`, when the
/// analyze options carry `times` as well, and `null` otherwise.
#[derive(Debug, Default, Clone)]
pub struct Repeat;

impl TestFilter for Repeat {
    fn apply(&self, tests: TestGroup, options: &FilterOptions) -> Result<TestGroup, FilterFailure> {
        let times = options.get_usize("times")?.unwrap_or(1);
        if times == 0 {
            return Err(FilterFailure::invalid_option("times", "must be at least 1"));
        }
        if times == 1 {
            return Ok(tests);
        }

        let name = tests.name.clone();
        let cases = tests.into_cases();
        let repeated = (0..times).flat_map(|_| cases.iter().cloned()).collect::<Vec<_>>();
        Ok(regroup(name, repeated))
    }

    fn analyze(
        &self,
        results: &[ResultRecord],
        options: &FilterOptions,
    ) -> Result<Value, FilterFailure> {
        let Some(times) = options.get_usize("times")? else {
            return Ok(Value::Null);
        };
        if times == 0 {
            return Err(FilterFailure::invalid_option("times", "must be at least 1"));
        }
        Ok(json!({
            "runs": times,
            "records_per_run": results.len() / times,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn repeats_in_order() {
        let tests = TestGroup::from_cases([case! {id: "lib.A"}, case! {id: "lib.B"}]);
        let options: FilterOptions = serde_json::from_value(json!({"times": 2})).unwrap();
        let out = Repeat.apply(tests, &options).unwrap();
        assert_eq!(ids(&out), ["lib.A", "lib.B", "lib.A", "lib.B"]);
    }

    #[test]
    fn zero_times_is_rejected() {
        let options: FilterOptions = serde_json::from_value(json!({"times": 0})).unwrap();
        assert!(Repeat.apply(TestGroup::new(), &options).is_err());
        assert!(Repeat.analyze(&[], &options).is_err());
    }

    #[test]
    fn analysis() {
        let results = vec![ResultRecord::pass(); 6];
        assert_eq!(
            Repeat.analyze(&results, &FilterOptions::new()),
            Ok(Value::Null)
        );
        let options: FilterOptions = serde_json::from_value(json!({"times": 3})).unwrap();
        assert_eq!(
            Repeat.analyze(&results, &options),
            Ok(json!({"runs": 3, "records_per_run": 2}))
        );
    }
}
