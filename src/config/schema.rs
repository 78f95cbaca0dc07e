//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::selection::Parameter;

/// Root configuration: logging plus the ordered selector list.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SelectorSetConfig {
    /// Logging settings.
    pub logging: LoggingConfig,

    /// Selectors in registration order. The first one is the fallback.
    pub selectors: Vec<SelectorConfig>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// One selector entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectorConfig {
    /// Service handle returned when this selector is chosen.
    pub service: String,

    /// Selector priority (higher wins among matches).
    #[serde(default)]
    pub priority: i32,

    /// Matching rule, tagged by `kind`.
    #[serde(flatten)]
    pub rule: SelectorRule,
}

/// Matching rule of a selector.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectorRule {
    /// Matches every request.
    Default,

    /// Application must fully match the pattern.
    ByApplication { application_pattern: String },

    /// Execution type must be one of the list.
    ByExecutionType { execution_types: Vec<String> },

    /// Origin must be equal; execution type must be listed when the list is non-empty.
    ByOrigin {
        origin: String,
        #[serde(default)]
        execution_types: Vec<String>,
    },

    /// Authenticated user must fully match one of the patterns.
    ByAuthenticatedUser { users: Vec<String> },

    /// Location must be one of the list.
    ByLocation { locations: Vec<String> },

    /// Every configured parameter must match one request parameter.
    ByParameter { parameters: Vec<Parameter> },
}

impl SelectorRule {
    /// Config name of this rule.
    pub fn kind(&self) -> &'static str {
        match self {
            SelectorRule::Default => "default",
            SelectorRule::ByApplication { .. } => "by_application",
            SelectorRule::ByExecutionType { .. } => "by_execution_type",
            SelectorRule::ByOrigin { .. } => "by_origin",
            SelectorRule::ByAuthenticatedUser { .. } => "by_authenticated_user",
            SelectorRule::ByLocation { .. } => "by_location",
            SelectorRule::ByParameter { .. } => "by_parameter",
        }
    }
}
