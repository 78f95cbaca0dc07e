//! Shared fixtures for integration tests.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use service_selector::selection::{Criteria, SelectableService, ServiceSelector, SharedSelector};

type Predicate = Box<dyn Fn(&Criteria) -> bool + Send + Sync>;

/// Selector driven by a closure, counting predicate calls.
pub struct FnSelector {
    pub name: &'static str,
    pub priority: i32,
    predicate: Predicate,
    calls: AtomicUsize,
}

impl FnSelector {
    pub fn shared<F>(name: &'static str, priority: i32, predicate: F) -> Arc<Self>
    where
        F: Fn(&Criteria) -> bool + Send + Sync + 'static,
    {
        Arc::new(Self {
            name,
            priority,
            predicate: Box::new(predicate),
            calls: AtomicUsize::new(0),
        })
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for FnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSelector")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish()
    }
}

impl ServiceSelector<&'static str> for FnSelector {
    fn supports(&self, criteria: &Criteria) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.predicate)(criteria)
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn service(&self) -> &'static str {
        self.name
    }
}

/// Build a registry from fixtures, in the given order.
pub fn registry(selectors: &[Arc<FnSelector>]) -> SelectableService<&'static str> {
    let shared: Vec<SharedSelector<&'static str>> = selectors
        .iter()
        .map(|s| s.clone() as SharedSelector<&'static str>)
        .collect();
    SelectableService::new(shared).unwrap()
}
