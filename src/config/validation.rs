//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Require at least one selector (the fallback)
//! - Reject empty services, empty match lists and patterns that do not compile
//!   (including `regex:` values of configured parameters)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SelectorSetConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::{SelectorConfig, SelectorRule, SelectorSetConfig};
use crate::selection::pattern::{compile_full_match, pattern_of};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no selectors configured")]
    NoSelectors,

    #[error("selector {index}: service must not be empty")]
    EmptyService { index: usize },

    #[error("selector {index} ({kind}): {field} must not be empty")]
    EmptyField {
        index: usize,
        kind: &'static str,
        field: &'static str,
    },

    #[error("selector {index} ({kind}): invalid pattern {pattern:?}: {reason}")]
    InvalidPattern {
        index: usize,
        kind: &'static str,
        pattern: String,
        reason: String,
    },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &SelectorSetConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.selectors.is_empty() {
        errors.push(ValidationError::NoSelectors);
    }

    for (index, selector) in config.selectors.iter().enumerate() {
        validate_selector(index, selector, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_selector(index: usize, selector: &SelectorConfig, errors: &mut Vec<ValidationError>) {
    let kind = selector.rule.kind();

    if selector.service.trim().is_empty() {
        errors.push(ValidationError::EmptyService { index });
    }

    let mut require = |empty: bool, field: &'static str| {
        if empty {
            errors.push(ValidationError::EmptyField { index, kind, field });
        }
    };

    let patterns: Vec<&str> = match &selector.rule {
        SelectorRule::Default => Vec::new(),
        SelectorRule::ByApplication { application_pattern } => vec![application_pattern.as_str()],
        SelectorRule::ByExecutionType { execution_types } => {
            require(execution_types.is_empty(), "execution_types");
            Vec::new()
        }
        SelectorRule::ByOrigin { origin, .. } => {
            require(origin.is_empty(), "origin");
            Vec::new()
        }
        SelectorRule::ByAuthenticatedUser { users } => {
            require(users.is_empty(), "users");
            users.iter().map(String::as_str).collect()
        }
        SelectorRule::ByLocation { locations } => {
            require(locations.is_empty(), "locations");
            Vec::new()
        }
        SelectorRule::ByParameter { parameters } => {
            require(parameters.is_empty(), "parameters");
            require(
                parameters.iter().any(|p| p.name().trim().is_empty()),
                "parameters.name",
            );
            parameters
                .iter()
                .flat_map(|p| p.values())
                .filter_map(|v| v.as_str().and_then(pattern_of))
                .collect()
        }
    };

    for pattern in patterns {
        if let Err(e) = compile_full_match(pattern) {
            errors.push(ValidationError::InvalidPattern {
                index,
                kind,
                pattern: pattern.to_string(),
                reason: e.to_string(),
            });
        }
    }
}
