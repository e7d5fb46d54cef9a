use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use iar_core::DbStatusResponse;
use std::sync::Arc;

/// Connectivity check against the destination.
///
/// Advisory only: a later upload may still fail, or succeed after this reported a failure.
#[tracing::instrument(skip(state))]
pub async fn db_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.repository.ping().await {
        Ok(()) => (StatusCode::OK, Json(DbStatusResponse::connected())),
        Err(e) => {
            tracing::warn!(error = %e, "Database connectivity check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DbStatusResponse::failed(e.fault_message())),
            )
        }
    }
}
