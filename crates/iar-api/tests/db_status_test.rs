//! Connectivity check and health probe tests.

mod helpers;

use helpers::{setup_test_app, setup_test_app_with, MockIarRepository};
use serde_json::{json, Value};

#[tokio::test]
async fn test_db_status_connected() {
    let app = setup_test_app();

    let response = app.client().get("/api/db-status").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.json::<Value>(),
        json!({ "ok": true, "message": "Database connection successful." })
    );
}

#[tokio::test]
async fn test_db_status_unreachable() {
    let app = setup_test_app_with(MockIarRepository::unreachable(
        "error communicating with database: Connection refused (os error 111)",
    ));

    let response = app.client().get("/api/db-status").await;

    assert_eq!(response.status_code(), 500);
    let body = response.json::<Value>();
    assert_eq!(body["ok"], false);
    assert_eq!(
        body["error"],
        "error communicating with database: Connection refused (os error 111)"
    );
}

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app();

    let response = app.client().get("/health/live").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({ "status": "alive" }));
}

#[tokio::test]
async fn test_readiness_follows_database() {
    let app = setup_test_app();
    let response = app.client().get("/health/ready").await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["database"], "ready");

    let app = setup_test_app_with(MockIarRepository::unreachable("down"));
    let response = app.client().get("/health/ready").await;
    assert_eq!(response.status_code(), 503);
    assert_eq!(response.json::<Value>()["status"], "not_ready");
}

#[tokio::test]
async fn test_index_page_served() {
    let app = setup_test_app();

    let response = app.client().get("/").await;

    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("IAR Monitoring CSV Uploader"));
}
