//! Result records emitted while a case runs.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The kind of fact a [`ResultRecord`] reports.
///
/// Cases only ever emit these three kinds. "Error" is not a kind, it is the
/// aggregation bucket collecting every `fail` and `exception` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Pass,
    Fail,
    Exception,
}

impl ResultKind {
    /// Whether the record counts towards the assertion total.
    pub fn is_assertion(self) -> bool {
        matches!(self, ResultKind::Pass | ResultKind::Fail)
    }

    /// Whether the record also belongs into the "all problems" view.
    pub fn is_problem(self) -> bool {
        matches!(self, ResultKind::Fail | ResultKind::Exception)
    }

    /// The kind written as `name` on the wire, `None` for names testflow does not know.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pass" => Some(ResultKind::Pass),
            "fail" => Some(ResultKind::Fail),
            "exception" => Some(ResultKind::Exception),
            _ => None,
        }
    }

    /// The name of the stats bucket collecting records of this kind.
    pub fn bucket(self) -> &'static str {
        match self {
            ResultKind::Pass => "passes",
            ResultKind::Fail => "fails",
            ResultKind::Exception => "exceptions",
        }
    }
}

/// One emitted fact about an assertion or exception during execution.
///
/// Fields not known to testflow are kept in [`Self::extra`] and survive a
/// serialization round trip untouched. A `result` testflow does not know reads
/// as a record without kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(default, rename = "result", deserialize_with = "known_kind")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResultKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn known_kind<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ResultKind>, D::Error> {
    let kind = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(name)) => ResultKind::from_name(&name),
        _ => None,
    };
    Ok(kind)
}

impl ResultRecord {
    pub fn new(kind: ResultKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn pass() -> Self {
        Self::new(ResultKind::Pass)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(ResultKind::Fail).with_message(message)
    }

    pub fn exception(message: impl Into<String>) -> Self {
        Self::new(ResultKind::Exception).with_message(message)
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    pub fn with_location(self, file: impl Into<String>, line: u32) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
            ..self
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// A copy without the `file` and `kind` fields, as stored in the per kind buckets.
    pub fn stripped(&self) -> Self {
        Self {
            kind: None,
            file: None,
            ..self.clone()
        }
    }
}

/// Classify a record, `None` if the record carries no kind and is not countable.
pub fn classify(record: &ResultRecord) -> Option<ResultKind> {
    record.kind
}
