//! Aggregation of result records into pass/fail/exception/error statistics.
//!
//! [`aggregate`] is a left fold over one or more groups of records into a fresh
//! [`Stats`] value. Every group is merged into the same accumulator, so
//! aggregating a flat sequence and aggregating any partition of it into groups
//! produce identical stats.

use serde::Serialize;

use crate::record::{ResultKind, ResultRecord, classify};

/// Aggregate statistics of a result sequence.
///
/// The per kind buckets hold records stripped of `file` and `kind`, while
/// `errors` holds every `fail` and `exception` record verbatim. A problem record
/// therefore shows up twice, once in its bucket and once in `errors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    /// Number of `pass` plus `fail` records.
    pub asserts: usize,
    pub passes: Vec<ResultRecord>,
    pub fails: Vec<ResultRecord>,
    pub exceptions: Vec<ResultRecord>,
    pub errors: Vec<ResultRecord>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a single record into the accumulator.
    ///
    /// Records without a kind are skipped.
    pub fn record(&mut self, record: &ResultRecord) {
        let Some(kind) = classify(record) else {
            return;
        };

        if kind.is_problem() {
            self.errors.push(record.clone());
        }
        if kind.is_assertion() {
            self.asserts += 1;
        }

        let stripped = record.stripped();
        match kind {
            ResultKind::Pass => self.passes.push(stripped),
            ResultKind::Fail => self.fails.push(stripped),
            ResultKind::Exception => self.exceptions.push(stripped),
        }
    }

    /// Fold a group of records into the accumulator.
    pub fn absorb<'r>(&mut self, records: impl IntoIterator<Item = &'r ResultRecord>) {
        for record in records {
            self.record(record);
        }
    }

    /// Merge another accumulator into this one, keeping record order.
    pub fn merge(&mut self, other: Stats) {
        self.asserts += other.asserts;
        self.passes.extend(other.passes);
        self.fails.extend(other.fails);
        self.exceptions.extend(other.exceptions);
        self.errors.extend(other.errors);
    }

    /// Whether no `fail` or `exception` record was seen.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The shapes of result input [`aggregate`] accepts.
///
/// A bare record is treated as a one element sequence and a flat sequence as a
/// single group, so every shape is normalized into a sequence of groups.
#[derive(Debug, Clone, Copy)]
pub enum ResultInput<'r> {
    Single(&'r ResultRecord),
    Flat(&'r [ResultRecord]),
    Grouped(&'r [Vec<ResultRecord>]),
}

impl<'r> ResultInput<'r> {
    fn groups(self) -> Vec<&'r [ResultRecord]> {
        match self {
            ResultInput::Single(record) => vec![std::slice::from_ref(record)],
            ResultInput::Flat(records) => vec![records],
            ResultInput::Grouped(groups) => groups.iter().map(Vec::as_slice).collect(),
        }
    }
}

impl<'r> From<&'r ResultRecord> for ResultInput<'r> {
    fn from(value: &'r ResultRecord) -> Self {
        ResultInput::Single(value)
    }
}

impl<'r> From<&'r [ResultRecord]> for ResultInput<'r> {
    fn from(value: &'r [ResultRecord]) -> Self {
        ResultInput::Flat(value)
    }
}

impl<'r> From<&'r Vec<ResultRecord>> for ResultInput<'r> {
    fn from(value: &'r Vec<ResultRecord>) -> Self {
        ResultInput::Flat(value)
    }
}

impl<'r> From<&'r [Vec<ResultRecord>]> for ResultInput<'r> {
    fn from(value: &'r [Vec<ResultRecord>]) -> Self {
        ResultInput::Grouped(value)
    }
}

impl<'r> From<&'r Vec<Vec<ResultRecord>>> for ResultInput<'r> {
    fn from(value: &'r Vec<Vec<ResultRecord>>) -> Self {
        ResultInput::Grouped(value)
    }
}

/// Aggregate records into a fresh [`Stats`] value.
pub fn aggregate<'r>(input: impl Into<ResultInput<'r>>) -> Stats {
    input
        .into()
        .groups()
        .into_iter()
        .fold(Stats::new(), |mut stats, group| {
            stats.absorb(group);
            stats
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn sample() -> Vec<ResultRecord> {
        vec![
            ResultRecord::pass().with_location("FooTest.php", 3),
            ResultRecord::fail("x").with_location("FooTest.php", 4),
            ResultRecord::default().with_message("no kind"),
            ResultRecord::exception("boom").with_location("FooTest.php", 9),
            ResultRecord::pass(),
        ]
    }

    #[test]
    fn buckets_and_counts() {
        let records = sample();
        let stats = aggregate(&records);

        assert_eq!(stats.asserts, 3);
        assert_eq!(stats.passes.len(), 2);
        assert_eq!(stats.fails.len(), 1);
        assert_eq!(stats.exceptions.len(), 1);
        assert_eq!(stats.errors, vec![records[1].clone(), records[3].clone()]);
        assert_eq!(stats.fails[0], records[1].stripped());
        assert_eq!(stats.fails[0].file, None);
        assert!(!stats.is_success());
    }

    #[test]
    fn single_record_is_a_one_element_sequence() {
        let record = ResultRecord::pass();
        assert_eq!(aggregate(&record), aggregate(&vec![record.clone()]));
    }

    #[test]
    fn groups_accumulate_into_one_accumulator() {
        let records = sample();
        let grouped = vec![records[..2].to_vec(), Vec::new(), records[2..].to_vec()];
        assert_eq!(aggregate(&grouped), aggregate(&records));
    }

    #[test]
    fn empty_input_is_zero() {
        let stats = aggregate(&Vec::<ResultRecord>::new());
        assert_eq!(stats, Stats::default());
        assert!(stats.is_success());
    }

    fn arb_record() -> impl Strategy<Value = ResultRecord> {
        (
            prop_oneof![
                Just(None),
                Just(Some(ResultKind::Pass)),
                Just(Some(ResultKind::Fail)),
                Just(Some(ResultKind::Exception)),
            ],
            proptest::option::of("[a-z]{0,6}"),
            proptest::option::of("[a-z]{1,6}\\.php"),
        )
            .prop_map(|(kind, message, file)| ResultRecord {
                kind,
                message,
                file,
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn aggregation_is_associative_over_grouping(
            records in proptest::collection::vec(arb_record(), 0..40),
            cuts in proptest::collection::vec(0usize..40, 0..6),
        ) {
            let mut cuts: Vec<usize> = cuts.into_iter().map(|cut| cut.min(records.len())).collect();
            cuts.sort_unstable();

            let mut groups = Vec::new();
            let mut start = 0;
            for cut in cuts.into_iter().chain([records.len()]) {
                groups.push(records[start..cut].to_vec());
                start = cut;
            }

            let flat = aggregate(&records);
            let folded = groups.iter().fold(Stats::new(), |mut acc, group| {
                acc.merge(aggregate(group));
                acc
            });

            prop_assert_eq!(&aggregate(&groups), &flat);
            prop_assert_eq!(&folded, &flat);
            prop_assert_eq!(flat.asserts, flat.passes.len() + flat.fails.len());
            prop_assert_eq!(flat.errors.len(), flat.fails.len() + flat.exceptions.len());
        }
    }
}
