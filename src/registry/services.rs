//! Shared service collection.
//!
//! Modules with the service capability register their backing services here
//! during startup; consumers resolve them by type afterwards. The collection
//! is write-only during registration and read-only once the registry is
//! frozen.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Type-keyed collection of shared services.
#[derive(Default)]
pub struct ServiceCollection {
    entries: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl ServiceCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service instance, replacing any previous one of the same
    /// type.
    pub fn insert<T: Any + Send + Sync>(&mut self, service: Arc<T>) {
        self.entries.insert(TypeId::of::<T>(), service);
    }

    /// Resolve a service by type.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.entries
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|service| service.downcast::<T>().ok())
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no service is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ServiceCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCollection")
            .field("len", &self.entries.len())
            .finish()
    }
}
