//! Criteria-based backend service selection.
//!
//! Callers describe a request with [`Criteria`] and ask a
//! [`SelectableService`] for the backend handle that fits it best.

pub mod config;
pub mod error;
pub mod observability;
pub mod selection;

pub use config::schema::SelectorSetConfig;
pub use error::{ParameterError, SelectorError};
pub use selection::{Criteria, Parameter, SelectableService, ServiceSelector};
