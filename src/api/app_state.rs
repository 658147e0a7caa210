//! Shared state handed to axum handlers.

use std::sync::Arc;

use crate::registry::FrozenRegistry;
use crate::search::SearchCoordinator;

/// Application state shared across request handlers.
///
/// Everything inside is immutable after startup, so cloning per request is
/// cheap and lock-free.
#[derive(Clone)]
pub struct AppState {
    /// Frozen module registry.
    pub registry: FrozenRegistry,

    /// Search coordinator over the frozen registry.
    pub coordinator: Arc<SearchCoordinator>,
}

impl AppState {
    /// Assemble the state from the frozen registry and coordinator.
    pub fn new(registry: FrozenRegistry, coordinator: Arc<SearchCoordinator>) -> Self {
        Self {
            registry,
            coordinator,
        }
    }
}
