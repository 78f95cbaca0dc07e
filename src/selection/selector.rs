//! Selector abstraction consumed by the registry.

use std::fmt::Debug;
use std::sync::Arc;

use crate::selection::criteria::Criteria;

/// A candidate backend that can judge whether it serves a request.
///
/// Implementations may be called concurrently from many threads.
pub trait ServiceSelector<S>: Send + Sync + Debug {
    /// Returns true if this selector can serve requests with `criteria`.
    fn supports(&self, criteria: &Criteria) -> bool;

    /// Ranking among matching selectors; higher wins.
    fn priority(&self) -> i32;

    /// The handle to use when this selector is chosen.
    fn service(&self) -> S;
}

/// Shared handle to a selector.
pub type SharedSelector<S> = Arc<dyn ServiceSelector<S>>;
