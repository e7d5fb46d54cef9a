//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>` and use `?` on anything convertible into
//! [`AppError`], so every failure renders with the same status mapping, body shape and log
//! level.
//!
//! The `error` field carries the client message for 4xx responses and the most specific
//! fault message for 5xx responses (for a rejected insert, the database's own message).

use axum::{
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use iar_core::{AppError, ErrorMetadata, LogLevel};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`; lets clients branch on `ok` for every response of the API.
    pub ok: bool,
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            code: code.into(),
            details: None,
            error_type: None,
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from iar-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

/// A request that is not a readable multipart form carries no file.
impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "Rejected non-multipart upload");
        HttpAppError(AppError::NoFile)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_type = error_type,
                "Error occurred"
            );
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let message = if app_error.is_client_error() {
            app_error.client_message()
        } else {
            app_error.fault_message()
        };
        let mut body = ErrorResponse::new(message, app_error.error_code());

        // Error chains stay server-side in production and for sensitive errors.
        if !is_production_env() && !app_error.is_sensitive() {
            body.details = Some(app_error.detailed_message());
            body.error_type = Some(app_error.error_type().to_string());
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_status() {
        let response = HttpAppError(AppError::NoFile).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = HttpAppError(AppError::EmptyCsv).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_server_error_status() {
        let response = HttpAppError(AppError::Internal("boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = HttpAppError::from(anyhow::anyhow!("connect refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::new("CSV has no rows", "EMPTY_CSV")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "ok": false, "error": "CSV has no rows", "code": "EMPTY_CSV" })
        );
    }
}
