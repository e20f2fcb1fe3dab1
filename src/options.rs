//! Run options.
//!
//! [`RunOptions`] is what a caller hands to the dispatcher. It can be built in
//! code or read from TOML or JSON. The `filters` option accepts a few shorthand
//! forms which are normalized into an ordered map of [`FilterSpec`] values, and
//! that order is the order filters are applied and analyzed in.
//!
//! ```toml
//! case = "lib.tests.cases.FooTest"
//! filters = ["summary", { repeat = { apply = { times = 2 } } }]
//! ```

use std::{fmt, path::PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{error::OptionsError, ident::TestIdentifier};

/// The discovery root used when neither `base` nor `path` is given.
pub const DEFAULT_PATH: &str = "tests/cases";

/// An option bundle handed to one phase of a filter. Never absent, possibly empty.
pub type FilterOptions = Map<String, Value>;

/// The normalized filter configuration, in declaration order.
pub type FilterSpecs = IndexMap<String, FilterSpec>;

/// The two independent option bundles of a configured filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub apply: FilterOptions,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub analyze: FilterOptions,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_apply(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.apply.insert(key.into(), value.into());
        self
    }

    pub fn with_analyze(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.analyze.insert(key.into(), value.into());
        self
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FilterOptions, D::Error> {
    let options = Option::<FilterOptions>::deserialize(deserializer)?;
    Ok(options.unwrap_or_default())
}

/// Null, `""` and `[]` count as unset, just like a missing option.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::Array(items)) if items.is_empty() => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// The `filters` option as written by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FiltersOption {
    /// `["summary", {repeat = {...}}]`
    List(Vec<FilterEntry>),

    /// `{summary = {}, repeat = {apply = {...}}}`, values may be empty or null.
    Map(IndexMap<String, Option<FilterSpec>>),
}

/// One entry of the list form of [`FiltersOption`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterEntry {
    Id(String),
    Configured(IndexMap<String, Option<FilterSpec>>),
}

impl Default for FiltersOption {
    fn default() -> Self {
        FiltersOption::Map(IndexMap::new())
    }
}

impl FiltersOption {
    /// Expand the shorthand forms into the canonical ordered mapping.
    ///
    /// Missing option bundles become empty bundles. A filter named twice keeps the
    /// position of its first mention and the spec of its last one.
    pub fn normalize(&self) -> FilterSpecs {
        fn insert_all<'a>(
            specs: &mut FilterSpecs,
            entries: impl IntoIterator<Item = (&'a String, &'a Option<FilterSpec>)>,
        ) {
            for (id, spec) in entries {
                specs.insert(id.clone(), spec.clone().unwrap_or_default());
            }
        }

        let mut specs = FilterSpecs::new();
        match self {
            FiltersOption::Map(map) => insert_all(&mut specs, map),
            FiltersOption::List(entries) => {
                for entry in entries {
                    match entry {
                        FilterEntry::Id(id) => {
                            specs.insert(id.clone(), FilterSpec::default());
                        }
                        FilterEntry::Configured(map) => insert_all(&mut specs, map),
                    }
                }
            }
        }
        specs
    }
}

impl From<FilterSpecs> for FiltersOption {
    fn from(value: FilterSpecs) -> Self {
        let filters = value.into_iter().map(|(id, spec)| (id, Some(spec)));
        FiltersOption::Map(filters.collect())
    }
}

/// One or more group identifiers.
///
/// Deserializes from a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupSelection(pub Vec<TestIdentifier>);

impl<'de> Deserialize<'de> for GroupSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(TestIdentifier),
            Many(Vec<TestIdentifier>),
        }

        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(id) => GroupSelection(vec![id]),
            OneOrMany::Many(ids) => GroupSelection(ids),
        })
    }
}

impl From<TestIdentifier> for GroupSelection {
    fn from(value: TestIdentifier) -> Self {
        GroupSelection(vec![value])
    }
}

impl FromIterator<TestIdentifier> for GroupSelection {
    fn from_iter<T: IntoIterator<Item = TestIdentifier>>(iter: T) -> Self {
        GroupSelection(iter.into_iter().collect())
    }
}

impl fmt::Display for GroupSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

/// The options of a single run.
///
/// Every option is optional, unset options are filled from the dispatcher
/// defaults by [`Self::merged_over`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct RunOptions {
    /// Discovery root override, falls back to `path`.
    pub base: Option<PathBuf>,

    /// A single case to run.
    #[serde(deserialize_with = "blank_as_none")]
    pub case: Option<TestIdentifier>,

    /// One or more groups to run, used when `case` is unset.
    #[serde(deserialize_with = "blank_as_none")]
    pub group: Option<GroupSelection>,

    pub filters: Option<FiltersOption>,

    /// Default discovery root.
    pub path: Option<PathBuf>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The documented defaults: no selection, no filters, `path` set to [`DEFAULT_PATH`].
    pub fn defaults() -> Self {
        Self {
            path: Some(PathBuf::from(DEFAULT_PATH)),
            ..Default::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn with_case(self, case: TestIdentifier) -> Self {
        Self {
            case: Some(case),
            ..self
        }
    }

    pub fn with_group(self, group: impl Into<GroupSelection>) -> Self {
        Self {
            group: Some(group.into()),
            ..self
        }
    }

    /// Append a filter, keeping the already configured ones in front of it.
    pub fn with_filter(self, id: impl Into<String>, spec: FilterSpec) -> Self {
        let mut specs = self.filter_specs();
        specs.insert(id.into(), spec);
        Self {
            filters: Some(specs.into()),
            ..self
        }
    }

    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..self
        }
    }

    pub fn with_base(self, base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
            ..self
        }
    }

    /// Fill every unset option from `defaults`, then default `base` to `path`.
    pub fn merged_over(self, defaults: &RunOptions) -> Self {
        let path = self.path.or_else(|| defaults.path.clone());
        let base = self
            .base
            .or_else(|| defaults.base.clone())
            .or_else(|| path.clone());
        Self {
            base,
            case: self.case.or_else(|| defaults.case.clone()),
            group: self.group.or_else(|| defaults.group.clone()),
            filters: self.filters.or_else(|| defaults.filters.clone()),
            path,
        }
    }

    /// The normalized filter configuration, empty when no filters are set.
    pub fn filter_specs(&self) -> FilterSpecs {
        self.filters
            .as_ref()
            .map(FiltersOption::normalize)
            .unwrap_or_default()
    }

    /// The run title: the case if set, otherwise the groups.
    pub fn title(&self) -> Option<String> {
        self.case
            .as_ref()
            .map(ToString::to_string)
            .or_else(|| self.group.as_ref().map(ToString::to_string))
    }
}
