//! Errors produced by testflow.
//!
//! Only the outer surfaces fail hard: resolving what to run, applying a filter and
//! reading configuration. A failing analyze step is captured per filter in the
//! analysis map, and a failing case becomes a result record.

use thiserror::Error;

use crate::ident::TestIdentifier;

/// An identifier string could not be split into segments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("test identifier is empty")]
    Empty,

    #[error("test identifier `{input}` has an empty segment at position {position}")]
    EmptySegment { input: String, position: usize },
}

/// A requested case or group could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResolutionError {
    #[error("unknown test case `{0}`")]
    UnknownCase(TestIdentifier),

    #[error("unknown test group `{0}`, no cases found below it")]
    UnknownGroup(TestIdentifier),

    #[error("invalid test identifier")]
    InvalidIdentifier(#[from] IdentifierError),
}

/// Why a filter step failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FilterFailure {
    #[error("option `{option}` {problem}")]
    InvalidOption { option: String, problem: String },

    #[error("{0}")]
    Other(String),
}

impl FilterFailure {
    pub fn invalid_option(option: impl Into<String>, problem: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            problem: problem.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// A filter failed to transform the test set before execution.
///
/// This aborts the run, nothing is executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("filter `{filter}` failed to apply")]
pub struct FilterApplyError {
    pub filter: String,
    #[source]
    pub source: FilterFailure,
}

/// A filter failed to analyze the results of a run.
///
/// This is stored in place of the analysis value, the run itself still succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("filter `{filter}` failed to analyze results")]
pub struct FilterAnalyzeError {
    pub filter: String,
    #[source]
    pub source: FilterFailure,
}

/// Run options could not be read.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OptionsError {
    #[error("failed to parse run options as TOML")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse run options as JSON")]
    Json(#[from] serde_json::Error),
}

/// An error that aborted a dispatch before any results were produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DispatchError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("filter `{filter}` is not registered (known filters: {})", .known.join(", "))]
    UnknownFilter { filter: String, known: Vec<String> },

    #[error(transparent)]
    FilterApply(#[from] FilterApplyError),
}

/// A menu format name that is neither `html` nor `text`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown menu format `{0}`, expected `html` or `text`")]
pub struct UnknownMenuFormat(pub String);
