//! Module Capability Registry
//!
//! Turns the ordered module sequence supplied by the loader into builder
//! registrations and the frozen index the search coordinator reads.
//!
//! # Architecture
//!
//! ```text
//! loader (ordered modules)
//!     ↓ register(), once per module
//! ModuleRegistry ── probes optional capabilities by trait satisfaction
//!     ├── endpoint routers  (mounted under /api/v1/{key})
//!     ├── ServiceCollection (type-keyed shared services)
//!     ├── WidgetRegistry    (dashboard widgets)
//!     └── search entries    (ordered, search-capable modules)
//!     ↓ freeze(), one-time barrier
//! FrozenRegistry ── immutable, lock-free reads for the process lifetime
//! ```

pub mod capability;
pub mod contract;
pub mod error;
#[allow(clippy::module_inception)]
pub mod registry;
pub mod services;
pub mod widgets;

// Re-exports for convenient access
pub use capability::{Capability, CapabilitySet};
pub use contract::{
    EndpointProvider, Module, ModuleDescriptor, ModuleSearch, ServiceProvider, WidgetProvider,
};
pub use error::RegistryError;
pub use registry::{FrozenRegistry, ModuleRegistry, RegisteredModule, SearchEntry};
pub use services::ServiceCollection;
pub use widgets::{RegisteredWidget, WidgetArea, WidgetDescriptor, WidgetRegistry};
