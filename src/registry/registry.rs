//! Module capability registry.
//!
//! Consumes the ordered module sequence produced by the loader, probes each
//! instance for the optional capabilities it implements, forwards the
//! corresponding builder registrations, and produces the frozen view consumed
//! by the search coordinator and the HTTP layer.
//!
//! Registration is strictly single-threaded and happens-before all request
//! handling: [`ModuleRegistry::freeze`] consumes the registry, so no code
//! path can register a module once requests are being served.

use std::collections::HashSet;
use std::sync::Arc;

use axum::Router;
use tracing::{debug, info};

use super::capability::{Capability, CapabilitySet};
use super::contract::{Module, ModuleDescriptor, ModuleSearch};
use super::error::RegistryError;
use super::services::ServiceCollection;
use super::widgets::{RegisteredWidget, WidgetRegistry};

/// A registered module: descriptor plus its derived capability set.
#[derive(Debug, Clone)]
pub struct RegisteredModule {
    /// Identity and metadata.
    pub descriptor: ModuleDescriptor,

    /// Capabilities probed at registration.
    pub capabilities: CapabilitySet,
}

/// One search-capable module with its retained handler.
#[derive(Clone)]
pub struct SearchEntry {
    /// Module key, the aggregation identity.
    pub module_key: String,

    /// The module's search handler.
    pub handler: Arc<dyn ModuleSearch>,
}

/// Mutable registry used during startup only.
#[derive(Default)]
pub struct ModuleRegistry {
    entries: Vec<RegisteredModule>,
    keys: HashSet<String>,
    search_entries: Vec<SearchEntry>,
    endpoint_routers: Vec<(String, Router)>,
    services: ServiceCollection,
    widgets: WidgetRegistry,
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one module.
    ///
    /// Probes each optional capability by trait satisfaction and forwards the
    /// matching builder registration exactly once. Modules are processed in
    /// call order and never reordered, so the searchable index order is
    /// reproducible for a given loader sequence.
    ///
    /// # Errors
    ///
    /// [`RegistryError::EmptyKey`] and [`RegistryError::KeyCollision`] are
    /// fatal; the caller must abort startup.
    pub fn register(&mut self, module: Arc<dyn Module>) -> Result<(), RegistryError> {
        let descriptor = module.descriptor().clone();

        if descriptor.key.is_empty() {
            return Err(RegistryError::EmptyKey {
                name: descriptor.name,
            });
        }
        if !self.keys.insert(descriptor.key.clone()) {
            return Err(RegistryError::KeyCollision(descriptor.key));
        }

        let key = descriptor.key.clone();
        let mut capabilities = CapabilitySet::empty();

        if let Some(endpoints) = module.endpoints() {
            capabilities.insert(Capability::Endpoints);
            self.endpoint_routers.push((key.clone(), endpoints.router()));
        }

        if let Some(services) = module.services() {
            capabilities.insert(Capability::Services);
            services.register_services(&mut self.services);
        }

        if let Some(widgets) = module.widgets() {
            capabilities.insert(Capability::Widgets);
            self.widgets.register(&key, widgets.widgets());
        }

        if let Some(handler) = module.search() {
            capabilities.insert(Capability::Search);
            self.search_entries.push(SearchEntry {
                module_key: key.clone(),
                handler,
            });
        }

        debug!(
            module = %key,
            capabilities = ?capabilities.names(),
            "Module registered"
        );

        self.entries.push(RegisteredModule {
            descriptor,
            capabilities,
        });

        Ok(())
    }

    /// Freeze the registry into its immutable post-startup view.
    pub fn freeze(self) -> FrozenRegistry {
        info!(
            modules = self.entries.len(),
            searchable = self.search_entries.len(),
            widgets = self.widgets.len(),
            services = self.services.len(),
            "Module registry frozen"
        );

        FrozenRegistry {
            entries: self.entries.into(),
            search_entries: self.search_entries.into(),
            endpoint_routers: self.endpoint_routers,
            services: Arc::new(self.services),
            widgets: Arc::new(self.widgets),
        }
    }
}

/// Immutable registry view shared across requests.
///
/// Cheap to clone; all reads are lock-free because nothing mutates after
/// [`ModuleRegistry::freeze`].
#[derive(Clone)]
pub struct FrozenRegistry {
    entries: Arc<[RegisteredModule]>,
    search_entries: Arc<[SearchEntry]>,
    endpoint_routers: Vec<(String, Router)>,
    services: Arc<ServiceCollection>,
    widgets: Arc<WidgetRegistry>,
}

impl FrozenRegistry {
    /// All registered modules in registration order.
    pub fn modules(&self) -> &[RegisteredModule] {
        &self.entries
    }

    /// Look up one module by key.
    pub fn module(&self, key: &str) -> Option<&RegisteredModule> {
        self.entries.iter().find(|m| m.descriptor.key == key)
    }

    /// Keys of search-capable modules, in registration order.
    pub fn searchable_module_keys(&self) -> Vec<String> {
        self.search_entries
            .iter()
            .map(|e| e.module_key.clone())
            .collect()
    }

    /// Search-capable modules with their handlers, in registration order.
    pub fn search_entries(&self) -> Arc<[SearchEntry]> {
        self.search_entries.clone()
    }

    /// Per-module endpoint routers, in registration order.
    pub fn endpoint_routers(&self) -> &[(String, Router)] {
        &self.endpoint_routers
    }

    /// The shared service collection.
    pub fn services(&self) -> &ServiceCollection {
        &self.services
    }

    /// All registered widgets, sorted for rendering.
    pub fn widgets(&self) -> Vec<RegisteredWidget> {
        self.widgets.list()
    }
}
