//! Error types for aggregated search.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors visible at the coordinator boundary.
///
/// Per-module faults (timeouts, handler failures, panics) are absorbed inside
/// the coordinator and never surface here: callers see either a complete
/// ordered aggregate or one of these errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The caller cancelled before aggregation completed.
    #[error("search cancelled")]
    Cancelled,

    /// Query validation failed.
    #[error("validation error: {0}")]
    Validation(String),
}

impl SearchError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Cancelled => StatusCode::REQUEST_TIMEOUT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code string for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => "CANCELLED",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type alias for coordinator operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Error returned by a module's search handler.
///
/// Always recoverable at the coordinator: the module contributes an empty
/// group and the request proceeds.
#[derive(Debug, Error)]
pub enum ModuleSearchError {
    /// The handler observed cancellation and stopped early.
    #[error("cancelled")]
    Cancelled,

    /// The module's backing store failed.
    #[error("backend error: {0}")]
    Backend(String),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ModuleSearchError {
    /// Create a backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Validate a query string before dispatch.
pub fn validate_query(query: &str, max_length: usize) -> SearchResult<()> {
    if query.trim().is_empty() {
        return Err(SearchError::validation("query cannot be empty"));
    }

    if query.len() > max_length {
        return Err(SearchError::validation(format!(
            "query too long: {} chars (max {})",
            query.len(),
            max_length
        )));
    }

    Ok(())
}
