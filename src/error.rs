//! Error types for criteria construction and service selection.

use thiserror::Error;

/// Errors raised while converting a generic mapping into a [`Parameter`].
///
/// [`Parameter`]: crate::selection::Parameter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// The mapping has no `name` key (or it is null).
    #[error("missing required key \"name\"")]
    MissingName,

    /// `name` is present but neither a non-empty string nor a scalar.
    #[error("\"name\" must be a non-empty string, number or boolean, got {0}")]
    InvalidName(String),

    /// `values` is present but not an array.
    #[error("\"values\" must be an array, got {0}")]
    InvalidValues(String),
}

/// Errors surfaced by the selection layer.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// `select` was called without criteria.
    #[error("criteria must not be absent")]
    MissingCriteria,

    /// A registry cannot be built from an empty selector list.
    #[error("at least one service selector is required")]
    NoSelectors,

    /// One element of a parameter batch could not be converted.
    #[error("malformed parameter at index {index}: {source}")]
    MalformedParameter {
        index: usize,
        #[source]
        source: ParameterError,
    },

    /// A configured selector pattern failed to compile.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
