//! The module contract.
//!
//! Every feature unit ("module") implements [`Module`]: a stable identity
//! plus zero or more optional capabilities. Capabilities are expressed as
//! trait objects behind `Option` accessors, so the registry can probe them
//! structurally at registration time instead of trusting metadata flags.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::registry::services::ServiceCollection;
use crate::registry::widgets::WidgetDescriptor;
use crate::search::cancel::CancelSignal;
use crate::search::error::ModuleSearchError;
use crate::search::types::SearchPage;

/// Identity and metadata of a module.
///
/// `key` is a globally unique, stable slug. It is the sole identity used for
/// search result grouping and endpoint mounting, so two modules must never
/// share one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Stable unique slug, e.g. "notes".
    pub key: String,

    /// Human-readable name.
    pub name: String,

    /// Short description.
    pub description: String,

    /// Module author.
    pub author: String,

    /// Semantic version string, e.g. "1.2.0".
    pub version: String,
}

impl ModuleDescriptor {
    /// Create a descriptor.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        author: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: description.into(),
            author: author.into(),
            version: version.into(),
        }
    }
}

/// A pluggable feature unit.
///
/// The default capability accessors return `None`; a module overrides the
/// ones it implements. Accessors must be stable: the registry probes each
/// exactly once at registration and the derived capability set is frozen for
/// the process lifetime.
pub trait Module: Send + Sync {
    /// The module's identity and metadata.
    fn descriptor(&self) -> &ModuleDescriptor;

    /// HTTP endpoint capability.
    fn endpoints(&self) -> Option<&dyn EndpointProvider> {
        None
    }

    /// Backing service capability.
    fn services(&self) -> Option<&dyn ServiceProvider> {
        None
    }

    /// UI widget capability.
    fn widgets(&self) -> Option<&dyn WidgetProvider> {
        None
    }

    /// Text search capability.
    fn search(&self) -> Option<Arc<dyn ModuleSearch>> {
        None
    }
}

/// Capability: contribute HTTP endpoints.
///
/// The returned router is mounted under `/api/v1/{key}`.
pub trait EndpointProvider: Send + Sync {
    /// Build the module's route tree.
    fn router(&self) -> Router;
}

/// Capability: register backing services into the shared collection.
pub trait ServiceProvider: Send + Sync {
    /// Called exactly once at registration.
    fn register_services(&self, services: &mut ServiceCollection);
}

/// Capability: contribute dashboard widgets.
pub trait WidgetProvider: Send + Sync {
    /// Widget descriptors to register for this module.
    fn widgets(&self) -> Vec<WidgetDescriptor>;
}

/// Capability: answer free-text search queries.
///
/// Implementations must observe `cancel` cooperatively and may fail; both
/// cases are recovered per-module by the coordinator without affecting other
/// modules.
#[async_trait]
pub trait ModuleSearch: Send + Sync {
    /// Run one search call with the exact query passed by the caller.
    async fn search(
        &self,
        query: &str,
        cancel: CancelSignal,
    ) -> Result<SearchPage, ModuleSearchError>;
}
