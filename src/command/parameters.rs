//! Comma-separated `key=value` parameter lists.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How entries without a `key=value` shape are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterPolicy {
    /// Stop at the first malformed entry and report it.
    #[default]
    Strict,
    /// Keep bare entries with an empty value and drop nameless ones.
    Lenient,
}

impl fmt::Display for ParameterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterPolicy::Strict => write!(f, "strict"),
            ParameterPolicy::Lenient => write!(f, "lenient"),
        }
    }
}

impl std::str::FromStr for ParameterPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(ParameterPolicy::Strict),
            "lenient" => Ok(ParameterPolicy::Lenient),
            other => Err(format!(
                "unknown parameter policy: '{other}'. Supported: strict, lenient"
            )),
        }
    }
}

/// Ordered parameter mapping.
///
/// Iteration follows first appearance; re-inserting a name replaces its
/// value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    entries: IndexMap<String, String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

/// A parameter entry that could not be read under the strict policy.
///
/// Carries the parameters parsed before the offending entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedParameter {
    #[error("Parameter '{entry}' is missing a value.")]
    MissingValue { entry: String, parsed: ParameterSet },

    #[error("Parameter '{entry}' is missing a name.")]
    MissingName { entry: String, parsed: ParameterSet },
}

impl MalformedParameter {
    /// The trimmed entry that failed to parse.
    pub fn entry(&self) -> &str {
        match self {
            Self::MissingValue { entry, .. } | Self::MissingName { entry, .. } => entry,
        }
    }

    /// Parameters accepted before parsing stopped.
    pub fn parsed(&self) -> &ParameterSet {
        match self {
            Self::MissingValue { parsed, .. } | Self::MissingName { parsed, .. } => parsed,
        }
    }
}

/// Parse `value` with the strict policy.
pub fn try_parse_parameters(value: &str) -> Result<ParameterSet, MalformedParameter> {
    try_parse_parameters_with(value, ParameterPolicy::Strict)
}

/// Parse a comma-separated list of `key=value` entries.
///
/// Entries are trimmed and empty ones skipped. Each entry splits on its
/// first `=`, so values may themselves contain `=`.
pub fn try_parse_parameters_with(
    value: &str,
    policy: ParameterPolicy,
) -> Result<ParameterSet, MalformedParameter> {
    let mut params = ParameterSet::new();

    for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.split_once('=') {
            Some((name, val)) => {
                let name = name.trim();
                if name.is_empty() {
                    match policy {
                        ParameterPolicy::Strict => {
                            return Err(MalformedParameter::MissingName {
                                entry: entry.to_string(),
                                parsed: params,
                            });
                        }
                        ParameterPolicy::Lenient => continue,
                    }
                }
                params.insert(name, val.trim());
            }
            None => match policy {
                ParameterPolicy::Strict => {
                    return Err(MalformedParameter::MissingValue {
                        entry: entry.to_string(),
                        parsed: params,
                    });
                }
                ParameterPolicy::Lenient => params.insert(entry, ""),
            },
        }
    }

    Ok(params)
}

/// Render parameters as `k1=v1, k2=v2` in iteration order.
pub fn normalized_parameter_string(params: &ParameterSet) -> String {
    params.to_string()
}
