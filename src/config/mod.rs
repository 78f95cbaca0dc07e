//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SelectorSetConfig (validated, immutable)
//!     → SelectableService::from_config builds the registry
//! ```
//!
//! # Design Decisions
//! - Selector order in the file is registration order (first = fallback)
//! - Validation separates syntactic (serde) from semantic checks
//! - All validation problems are reported together

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LoggingConfig, SelectorConfig, SelectorRule, SelectorSetConfig};
pub use validation::{validate_config, ValidationError};
