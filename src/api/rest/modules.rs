//! Module and widget listing handlers.

use axum::extract::{Path, State};
use axum::response::Json;

use crate::api::app_state::AppState;
use crate::api::dto::{ApiError, ModuleResponse, ModulesResponse, WidgetsResponse};

/// List all registered modules with their capability sets.
pub async fn list(State(app_state): State<AppState>) -> Json<ModulesResponse> {
    let modules: Vec<ModuleResponse> = app_state
        .registry
        .modules()
        .iter()
        .map(ModuleResponse::from)
        .collect();

    Json(ModulesResponse {
        count: modules.len(),
        modules,
    })
}

/// Get one module by key.
pub async fn get(
    State(app_state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ModuleResponse>, ApiError> {
    app_state
        .registry
        .module(&key)
        .map(|module| Json(ModuleResponse::from(module)))
        .ok_or_else(|| ApiError::not_found(format!("no module with key \"{key}\"")))
}

/// List all registered widgets, sorted for rendering.
pub async fn widgets(State(app_state): State<AppState>) -> Json<WidgetsResponse> {
    let widgets = app_state.registry.widgets();

    Json(WidgetsResponse {
        count: widgets.len(),
        widgets,
    })
}
