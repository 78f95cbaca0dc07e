//! Service selection subsystem.
//!
//! # Data Flow
//! ```text
//! Caller builds Criteria (application, user, execution, origin, location, parameters)
//!     → registry.rs (SelectableService::select)
//!     → selector.rs (each ServiceSelector::supports)
//!     → Highest priority match, ties to earliest registered
//!     → No match: selector at index 0
//!     → Return: service handle
//!
//! Registry construction (at startup):
//!     SelectorConfig[]
//!     → selectors.rs (compile patterns, build variants)
//!     → Freeze as immutable SelectableService
//! ```
//!
//! # Design Decisions
//! - Registry immutable at runtime, no locks on the lookup path
//! - Deterministic: same criteria always picks the same selector
//! - Parameter matching supports `regex:` values on the configured side only

pub mod criteria;
pub mod parameter;
pub mod pattern;
pub mod registry;
pub mod selector;
pub mod selectors;

pub use criteria::Criteria;
pub use parameter::{CompiledParameter, Parameter};
pub use registry::SelectableService;
pub use selector::{ServiceSelector, SharedSelector};
pub use selectors::{
    ByApplicationServiceSelector, ByAuthenticatedUserServiceSelector, ByExecutionTypeServiceSelector,
    ByLocationServiceSelector, ByOriginServiceSelector, ByParameterServiceSelector, DefaultServiceSelector,
};
