//! Aggregated search handler.

use std::collections::HashMap;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::response::Json;

use crate::api::app_state::AppState;
use crate::api::dto::{ApiError, SearchResponse};
use crate::search::CancelHandle;

/// Search across every search-capable module.
///
/// The cancel handle is scoped to this request: if the client disconnects,
/// axum drops this future, the handle drops with it, and every in-flight
/// module call observes cancellation.
pub async fn query(
    State(app_state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params
        .get("q")
        .ok_or_else(|| ApiError::validation("q is required"))?;

    let (_cancel_handle, cancel) = CancelHandle::new();
    let start = Instant::now();

    let aggregate = app_state.coordinator.search(query, cancel).await?;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    Ok(Json(SearchResponse::from_aggregate(
        query, aggregate, elapsed_ms,
    )))
}
