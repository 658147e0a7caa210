//! Integration tests for the REST API.
//!
//! Exercises the health, search, module, and widget endpoints against a full
//! in-process node with the built-in modules registered.

use axum::http::StatusCode;
use serde_json::json;

use crate::harness::{get_request, post_request, setup_test_server};

// ============================================================================
// GET /api/v1/health
// ============================================================================

#[tokio::test]
async fn test_health_returns_200() {
    let server = setup_test_server();

    let (status, response) = get_request(&server.router, "/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"].as_str(), Some("healthy"));
    assert!(response.get("timestamp").is_some());
}

// ============================================================================
// GET /api/v1/search
// ============================================================================

#[tokio::test]
async fn test_search_requires_query_param() {
    let server = setup_test_server();

    let (status, response) = get_request(&server.router, "/api/v1/search").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"].as_bool(), Some(false));
    assert_eq!(
        response["error"]["code"].as_str(),
        Some("VALIDATION_ERROR")
    );
}

#[tokio::test]
async fn test_search_rejects_empty_query() {
    let server = setup_test_server();

    let (status, _) = get_request(&server.router, "/api/v1/search?q=").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_reports_every_searchable_module() {
    let server = setup_test_server();

    let (status, response) = get_request(&server.router, "/api/v1/search?q=meal").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"].as_bool(), Some(true));
    assert_eq!(response["query"].as_str(), Some("meal"));
    assert!(response.get("elapsed_ms").is_some());

    // One group per searchable module, in registration order, even for
    // modules with no matches.
    let groups = response["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["module_key"].as_str(), Some("notes"));
    assert_eq!(groups[1]["module_key"].as_str(), Some("bookmarks"));

    // The seeded "Weekly meal planner" bookmark matches; notes is empty.
    assert_eq!(groups[0]["total_count"].as_u64(), Some(0));
    assert_eq!(groups[1]["total_count"].as_u64(), Some(1));
    assert_eq!(response["total_count"].as_u64(), Some(1));
}

#[tokio::test]
async fn test_search_sees_content_added_through_module_endpoint() {
    let server = setup_test_server();

    let (status, note) = post_request(
        &server.router,
        "/api/v1/notes",
        json!({"title": "Buy milk", "body": "oat, two liters"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(note["title"].as_str(), Some("Buy milk"));

    let (status, response) = get_request(&server.router, "/api/v1/search?q=milk").await;
    assert_eq!(status, StatusCode::OK);

    let groups = response["groups"].as_array().unwrap();
    assert_eq!(groups[0]["module_key"].as_str(), Some("notes"));
    assert_eq!(groups[0]["total_count"].as_u64(), Some(1));
    assert_eq!(
        groups[0]["items"][0]["title"].as_str(),
        Some("Buy milk")
    );
}

// ============================================================================
// GET /api/v1/modules
// ============================================================================

#[tokio::test]
async fn test_modules_listing_reports_capabilities() {
    let server = setup_test_server();

    let (status, response) = get_request(&server.router, "/api/v1/modules").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"].as_u64(), Some(2));

    let modules = response["modules"].as_array().unwrap();
    assert_eq!(modules[0]["key"].as_str(), Some("notes"));
    assert_eq!(
        modules[0]["capabilities"],
        json!(["endpoints", "widgets", "search"])
    );
    assert_eq!(modules[1]["key"].as_str(), Some("bookmarks"));
    assert_eq!(modules[1]["capabilities"], json!(["services", "search"]));
}

#[tokio::test]
async fn test_module_lookup_by_key() {
    let server = setup_test_server();

    let (status, response) = get_request(&server.router, "/api/v1/modules/notes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["key"].as_str(), Some("notes"));
    assert_eq!(response["name"].as_str(), Some("Notes"));

    let (status, response) = get_request(&server.router, "/api/v1/modules/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"]["code"].as_str(), Some("NOT_FOUND"));
}

// ============================================================================
// GET /api/v1/widgets
// ============================================================================

#[tokio::test]
async fn test_widget_listing() {
    let server = setup_test_server();

    let (status, response) = get_request(&server.router, "/api/v1/widgets").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"].as_u64(), Some(1));
    assert_eq!(
        response["widgets"][0]["module_key"].as_str(),
        Some("notes")
    );
    assert_eq!(
        response["widgets"][0]["id"].as_str(),
        Some("notes.recent")
    );
}

// ============================================================================
// Module endpoints
// ============================================================================

#[tokio::test]
async fn test_module_endpoints_are_mounted_under_module_key() {
    let server = setup_test_server();

    let (status, notes) = get_request(&server.router, "/api/v1/notes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notes.as_array().map(|a| a.len()), Some(0));
}
