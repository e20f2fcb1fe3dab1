//! Fully qualified test identifiers.
//!
//! A [`TestIdentifier`] is an ordered sequence of path segments, for example
//! `Lib.tests.cases.FooTest`. The same type names single cases and groups
//! (namespaces), the difference is only in how the identifier is resolved.

use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::IdentifierError;

/// The separator used when displaying an identifier.
pub const SEPARATOR: char = '.';

/// An immutable, non-empty sequence of path segments.
///
/// Parsing accepts `.`, `\` and `::` as separators, so `Lib.Tests.FooTest`,
/// `\Lib\Tests\FooTest` and `Lib::Tests::FooTest` are the same identifier.
/// A single leading separator is allowed, empty segments anywhere else are not.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestIdentifier(Arc<[String]>);

impl TestIdentifier {
    /// Build an identifier from already split segments.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, IdentifierError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if let Some(position) = segments.iter().position(|segment| segment.is_empty()) {
            return Err(IdentifierError::EmptySegment {
                input: segments.join("."),
                position,
            });
        }
        Ok(Self(segments.into()))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Identifiers are never empty, this only exists to pair with [`Self::len`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The terminal segment, usually the case name.
    pub fn name(&self) -> &str {
        // non-empty by construction
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// Everything but the terminal segment, `None` for single segment identifiers.
    pub fn parent(&self) -> Option<TestIdentifier> {
        match self.0.len() {
            0 | 1 => None,
            len => Some(Self(self.0[..len - 1].into())),
        }
    }

    /// Whether `prefix` matches this identifier segment by segment.
    pub fn starts_with(&self, prefix: &TestIdentifier) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Append a segment, producing a new identifier.
    pub fn join(&self, segment: impl Into<String>) -> Result<Self, IdentifierError> {
        Self::from_segments(self.0.iter().cloned().chain([segment.into()]))
    }
}

impl FromStr for TestIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace("::", ".").replace('\\', ".");
        let normalized = normalized.strip_prefix('.').unwrap_or(&normalized);
        if normalized.is_empty() {
            return Err(IdentifierError::Empty);
        }

        let segments: Vec<&str> = normalized.split(SEPARATOR).collect();
        if let Some(position) = segments.iter().position(|segment| segment.is_empty()) {
            return Err(IdentifierError::EmptySegment {
                input: s.to_string(),
                position,
            });
        }
        Self::from_segments(segments)
    }
}

impl TryFrom<&str> for TestIdentifier {
    type Error = IdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for TestIdentifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TestIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl Serialize for TestIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TestIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
