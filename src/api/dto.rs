//! Wire DTOs and the REST error envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::registry::{RegisteredModule, RegisteredWidget};
use crate::search::{AggregateResult, SearchError};

/// One module in the `/modules` listing.
#[derive(Debug, Serialize)]
pub struct ModuleResponse {
    pub key: String,
    pub name: String,
    pub description: String,
    pub author: String,
    pub version: String,
    pub capabilities: Vec<&'static str>,
}

impl From<&RegisteredModule> for ModuleResponse {
    fn from(module: &RegisteredModule) -> Self {
        Self {
            key: module.descriptor.key.clone(),
            name: module.descriptor.name.clone(),
            description: module.descriptor.description.clone(),
            author: module.descriptor.author.clone(),
            version: module.descriptor.version.clone(),
            capabilities: module.capabilities.names(),
        }
    }
}

/// `/modules` listing.
#[derive(Debug, Serialize)]
pub struct ModulesResponse {
    pub count: usize,
    pub modules: Vec<ModuleResponse>,
}

/// `/widgets` listing.
#[derive(Debug, Serialize)]
pub struct WidgetsResponse {
    pub count: usize,
    pub widgets: Vec<RegisteredWidget>,
}

/// `/search` response envelope.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub groups: Vec<crate::search::ModuleResultGroup>,
    pub total_count: u64,
    pub elapsed_ms: u64,
}

impl SearchResponse {
    /// Build the envelope from an aggregate.
    pub fn from_aggregate(query: impl Into<String>, aggregate: AggregateResult, elapsed_ms: u64) -> Self {
        let total_count = aggregate.total_count();
        Self {
            success: true,
            query: query.into(),
            groups: aggregate.groups,
            total_count,
            elapsed_ms,
        }
    }
}

/// REST error with a stable code and HTTP status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// 400 with `VALIDATION_ERROR`.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "VALIDATION_ERROR",
            message: message.into(),
        }
    }

    /// 404 with `NOT_FOUND`.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "NOT_FOUND",
            message: message.into(),
        }
    }

    /// 500 with `INTERNAL_ERROR`.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL_ERROR",
            message: message.into(),
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        Self {
            status: err.status_code(),
            code: err.error_code(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": {
                "code": self.code,
                "message": self.message,
            }
        }));

        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_maps_to_api_error() {
        let api: ApiError = SearchError::validation("empty").into();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.code, "VALIDATION_ERROR");

        let api: ApiError = SearchError::Cancelled.into();
        assert_eq!(api.status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(api.code, "CANCELLED");
    }

    #[test]
    fn test_search_response_totals() {
        use crate::search::types::{ModuleResultGroup, ResultItem, SearchPage};

        let aggregate = AggregateResult {
            groups: vec![
                ModuleResultGroup::from_page(
                    "notes",
                    SearchPage::new(3, vec![ResultItem::new("a", "/a")]),
                ),
                ModuleResultGroup::empty("bookmarks"),
            ],
        };

        let response = SearchResponse::from_aggregate("milk", aggregate, 12);
        assert!(response.success);
        assert_eq!(response.total_count, 3);
        assert_eq!(response.groups.len(), 2);
        assert_eq!(response.elapsed_ms, 12);
    }
}
