//! Composition root.
//!
//! Startup is strictly single-threaded and happens-before all request
//! handling: modules are loaded and registered, the registry is frozen, and
//! only then do the servers start.

use std::sync::Arc;

use tracing::info;

use crate::api::{rest, AppState};
use crate::bootstrap::{config::Config, loader};
use crate::errors::AppError;
use crate::registry::{FrozenRegistry, ModuleRegistry};
use crate::search::SearchCoordinator;

pub async fn run() -> Result<(), AppError> {
    init_tracing();

    let config = Config::from_env()?;
    info!("Configuration loaded. Initializing node...");

    let registry = register_modules()?;
    let app_state = assemble_application(registry, &config);

    run_servers(app_state, config).await
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Load and register every module, then freeze the registry.
///
/// Any registration error is fatal: a node with an inconsistent module set
/// must never serve requests.
pub fn register_modules() -> Result<FrozenRegistry, AppError> {
    let modules = loader::load_builtin_modules();
    info!(count = modules.len(), "Registering modules");

    let mut registry = ModuleRegistry::new();
    for module in modules {
        registry.register(module)?;
    }

    Ok(registry.freeze())
}

/// Assemble the application state over the frozen registry.
pub fn assemble_application(registry: FrozenRegistry, config: &Config) -> AppState {
    let coordinator = Arc::new(SearchCoordinator::new(&registry, config.search.clone()));

    info!(
        searchable = ?coordinator.searchable_module_keys(),
        "Search coordinator ready"
    );

    AppState::new(registry, coordinator)
}

async fn run_servers(app_state: AppState, config: Config) -> Result<(), AppError> {
    info!("Starting servers...");

    tokio::select! {
        result = rest::start(&app_state, &config) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        },
    }

    info!("Application shutdown complete.");
    Ok(())
}
