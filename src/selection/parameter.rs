//! Named, multi-valued request parameters.
//!
//! # Responsibilities
//! - Typed construction and fallible conversion from generic mappings
//! - Overlap matching with optional `regex:` patterns
//!
//! # Design Decisions
//! - Values are opaque `serde_json::Value`s, usually strings
//! - Matching is one-directional: only `regex:` values on the receiver
//!   are treated as patterns, so it is a named predicate and not `PartialEq`
//! - A pattern that fails to compile matches nothing
//! - `CompiledParameter` compiles patterns once for selectors evaluated
//!   per request; `Parameter::matches` stays the reference behavior

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ParameterError, SelectorError};
use crate::selection::pattern::{compile_full_match, pattern_of};

/// A named attribute carrying zero or more values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Parameter {
    name: String,
    values: Vec<Value>,
}

impl Parameter {
    /// Create a parameter from a name and its values.
    pub fn new<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Convert a mapping with keys `name` and (optionally) `values`.
    ///
    /// Numeric and boolean names are taken in their textual form (`1`
    /// becomes `"1"`). Empty strings, arrays and objects are rejected.
    pub fn from_map(source: &Map<String, Value>) -> Result<Self, ParameterError> {
        let name = match source.get("name") {
            None | Some(Value::Null) => return Err(ParameterError::MissingName),
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(scalar @ (Value::Number(_) | Value::Bool(_))) => scalar.to_string(),
            Some(other) => return Err(ParameterError::InvalidName(other.to_string())),
        };

        let values = match source.get("values") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(other) => return Err(ParameterError::InvalidValues(other.to_string())),
        };

        Ok(Self { name, values })
    }

    /// Convert a batch of mappings, preserving order.
    ///
    /// Stops at the first malformed element; no partial list is returned.
    pub fn to_parameters(source: &[Map<String, Value>]) -> Result<Vec<Self>, SelectorError> {
        source
            .iter()
            .enumerate()
            .map(|(index, map)| {
                Self::from_map(map)
                    .map_err(|source| SelectorError::MalformedParameter { index, source })
            })
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Replace the name, keeping the values.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the values, keeping the name.
    pub fn with_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if names are equal and some value of `self` matches
    /// some value of `other`.
    ///
    /// A string value of `self` starting with `regex:` is a pattern that
    /// must match an entire string value of `other`. Any other value is
    /// compared literally. `regex:` values in `other` are plain strings.
    pub fn matches(&self, other: &Parameter) -> bool {
        if self.name != other.name {
            return false;
        }

        self.values.iter().any(|v| value_matches(v, &other.values))
    }

    /// Compile `regex:` values up front.
    ///
    /// Fails on the first pattern that does not compile.
    pub fn compile(&self) -> Result<CompiledParameter, SelectorError> {
        let matchers = self
            .values
            .iter()
            .map(ValueMatcher::from_value)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CompiledParameter {
            name: self.name.clone(),
            matchers,
        })
    }
}

/// A [`Parameter`] whose `regex:` values are already compiled.
///
/// Matches exactly like [`Parameter::matches`] on the source parameter.
#[derive(Debug, Clone)]
pub struct CompiledParameter {
    name: String,
    matchers: Vec<ValueMatcher>,
}

impl CompiledParameter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, other: &Parameter) -> bool {
        self.name == other.name && self.matchers.iter().any(|m| m.matches(&other.values))
    }
}

#[derive(Debug, Clone)]
enum ValueMatcher {
    Literal(Value),
    Pattern(Regex),
}

impl ValueMatcher {
    fn from_value(value: &Value) -> Result<Self, SelectorError> {
        match value.as_str().and_then(pattern_of) {
            Some(pattern) => compile_full_match(pattern)
                .map(ValueMatcher::Pattern)
                .map_err(|source| SelectorError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                }),
            None => Ok(ValueMatcher::Literal(value.clone())),
        }
    }

    fn matches(&self, right: &[Value]) -> bool {
        match self {
            ValueMatcher::Literal(v) => right.iter().any(|w| w == v),
            ValueMatcher::Pattern(re) => right
                .iter()
                .any(|w| w.as_str().is_some_and(|s| re.is_match(s))),
        }
    }
}

impl TryFrom<Map<String, Value>> for Parameter {
    type Error = ParameterError;

    fn try_from(source: Map<String, Value>) -> Result<Self, Self::Error> {
        Self::from_map(&source)
    }
}

fn value_matches(left: &Value, right: &[Value]) -> bool {
    let pattern = match left {
        Value::String(s) => pattern_of(s),
        _ => None,
    };

    let Some(pattern) = pattern else {
        return right.iter().any(|w| w == left);
    };

    match compile_full_match(pattern) {
        Ok(re) => right
            .iter()
            .any(|w| w.as_str().is_some_and(|s| re.is_match(s))),
        Err(e) => {
            tracing::warn!(pattern = %pattern, error = %e, "Ignoring parameter value with invalid pattern");
            false
        }
    }
}
