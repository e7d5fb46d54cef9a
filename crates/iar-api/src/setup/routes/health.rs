//! Health check handlers.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;
use std::time::Duration;

const READINESS_TIMEOUT: Duration = Duration::from_secs(5);

pub(super) fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health/live", get(liveness_check))
        .route("/health/ready", get(readiness_check))
}

/// Liveness probe - process is running.
async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - destination database reachable.
async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut response = serde_json::json!({
        "status": "not_ready",
        "database": "unknown"
    });

    let ready = match tokio::time::timeout(READINESS_TIMEOUT, state.repository.ping()).await {
        Ok(Ok(())) => {
            response["database"] = serde_json::json!("ready");
            true
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Database readiness check failed");
            response["database"] = serde_json::json!(format!("not_ready: {}", e.fault_message()));
            false
        }
        Err(_) => {
            tracing::error!("Database readiness check timed out");
            response["database"] = serde_json::json!("timeout");
            false
        }
    };

    let status_code = if ready {
        response["status"] = serde_json::json!("ready");
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
