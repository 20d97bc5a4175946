//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::{MemoryRepository, Repository};
use crate::services::order_number::OrderNumberGenerator;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The store is injected as a
/// trait object so tests can swap in [`MemoryRepository`] or a double.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    repository: Arc<dyn Repository>,
    order_numbers: OrderNumberGenerator,
}

impl AppState {
    /// Create a new application state around a store.
    #[must_use]
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                repository,
                order_numbers: OrderNumberGenerator::new(),
            }),
        }
    }

    /// State over a fresh, empty in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryRepository::new()))
    }

    /// Get a reference to the store.
    #[must_use]
    pub fn repository(&self) -> &dyn Repository {
        self.inner.repository.as_ref()
    }

    /// Get the order number generator.
    #[must_use]
    pub fn order_numbers(&self) -> &OrderNumberGenerator {
        &self.inner.order_numbers
    }
}
