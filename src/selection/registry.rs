//! Priority-ordered service lookup.
//!
//! # Responsibilities
//! - Hold the ordered selector list
//! - Filter by predicate, rank by priority, fall back to the first entry
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Empty lists are rejected up front so the fallback always exists
//! - Ties on priority go to the earliest registered selector
//! - Nothing is cached; every call re-evaluates the predicates

use crate::config::schema::SelectorSetConfig;
use crate::error::SelectorError;
use crate::selection::criteria::Criteria;
use crate::selection::selector::SharedSelector;
use crate::selection::selectors::build_selector;

/// Chooses one service among several selectors.
#[derive(Debug)]
pub struct SelectableService<S> {
    selectors: Vec<SharedSelector<S>>,
}

impl<S> SelectableService<S> {
    /// Create a registry from selectors in registration order.
    pub fn new(selectors: Vec<SharedSelector<S>>) -> Result<Self, SelectorError> {
        if selectors.is_empty() {
            return Err(SelectorError::NoSelectors);
        }
        Ok(Self { selectors })
    }

    /// Select a service for `criteria`.
    ///
    /// Fails only when `criteria` is `None`, in which case no selector
    /// is evaluated.
    pub fn select(&self, criteria: Option<&Criteria>) -> Result<S, SelectorError> {
        let criteria = criteria.ok_or(SelectorError::MissingCriteria)?;
        Ok(self.get_service(criteria))
    }

    /// Select a service for `criteria`.
    pub fn get_service(&self, criteria: &Criteria) -> S {
        let mut best: Option<(usize, i32)> = None;
        let mut matched = 0usize;

        for (index, selector) in self.selectors.iter().enumerate() {
            if !selector.supports(criteria) {
                continue;
            }
            matched += 1;

            let priority = selector.priority();
            match best {
                // Strictly greater keeps the first of equal priorities.
                Some((_, best_priority)) if priority <= best_priority => {}
                _ => best = Some((index, priority)),
            }
        }

        let index = match best {
            Some((index, priority)) => {
                tracing::trace!(matched, index, priority, "Selector matched");
                index
            }
            None => {
                tracing::debug!(candidates = self.selectors.len(), "No selector matched, using fallback");
                0
            }
        };

        self.selectors[index].service()
    }

    /// Registered selectors in registration order.
    pub fn selectors(&self) -> &[SharedSelector<S>] {
        &self.selectors
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Always false; construction requires at least one selector.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl SelectableService<String> {
    /// Build a registry from configuration, keeping file order.
    pub fn from_config(config: &SelectorSetConfig) -> Result<Self, SelectorError> {
        let selectors = config
            .selectors
            .iter()
            .map(build_selector)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(selectors = selectors.len(), "Service selectors registered");
        Self::new(selectors)
    }
}
