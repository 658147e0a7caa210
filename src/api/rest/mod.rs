//! REST API router configuration.
//!
//! This module contains route definitions and server startup logic.
//! Handler implementations live in their respective submodules; module
//! endpoint routers collected at registration are nested under
//! `/api/v1/{key}`, so module keys must not collide with the core route
//! names (`health`, `search`, `modules`, `widgets`).

mod health;
mod modules;
mod search;

use axum::routing::get;
use axum::Router;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::api::app_state::AppState;
use crate::bootstrap::config::Config;
use crate::errors::AppError;

/// Build the REST API router with all routes.
pub fn build_router(app_state: AppState, config: &Config) -> Router {
    let cors = build_cors_layer(config);
    let api = "/api/v1";

    let endpoint_routers: Vec<_> = app_state
        .registry
        .endpoint_routers()
        .iter()
        .map(|(key, router)| (key.clone(), router.clone()))
        .collect();

    let mut router = Router::new()
        // Health
        .route(&format!("{api}/health"), get(health::check))
        // Aggregated search
        .route(&format!("{api}/search"), get(search::query))
        // Modules and widgets
        .route(&format!("{api}/modules"), get(modules::list))
        .route(&format!("{api}/modules/{{key}}"), get(modules::get))
        .route(&format!("{api}/widgets"), get(modules::widgets))
        .with_state(app_state);

    // Module-contributed endpoints, in registration order.
    for (key, module_router) in endpoint_routers {
        router = router.nest(&format!("{api}/{key}"), module_router);
    }

    router.layer(cors)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([ORIGIN, ACCEPT, CONTENT_TYPE, AUTHORIZATION])
        .max_age(std::time::Duration::from_secs(3600));

    if config.cors.allow_credentials {
        cors = cors.allow_credentials(true);
    }

    cors
}

/// Start the REST server.
pub async fn start(app_state: &AppState, config: &Config) -> Result<(), AppError> {
    let app = build_router(app_state.clone(), config);
    let bind_addr = format!("0.0.0.0:{}", config.server.rest_port);

    info!("Starting REST server on {}", &bind_addr);
    info!("CORS allowed origins: {:?}", config.cors.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
