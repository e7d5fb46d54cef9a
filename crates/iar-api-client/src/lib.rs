//! HTTP client for the IAR uploader API.
//!
//! Provides a minimal client with a generic multipart helper and the domain calls
//! (connectivity check, preview, upload). The CLI uses this client directly.

pub mod api;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the IAR uploader API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: IAR_API_URL (or API_URL), default `http://localhost:3000`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("IAR_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.build_url(path))
            .multipart(form)
            .send()
            .await
            .context("Failed to send request")?;

        parse_response(response).await
    }

    /// Raw client for custom requests.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Deserialize a success body, or turn an error body into an error carrying the server's
/// `error` message.
async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(anyhow::anyhow!(error_message(status.as_u16(), &error_text)));
    }

    response
        .json()
        .await
        .context("Failed to parse response as JSON")
}

/// The `error` field of a JSON error body, or a generic status line when the body is not
/// one.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| format!("API request failed with status {}: {}", status, body))
}

// Re-export response types for convenience.
pub use iar_core::{CsvPreview, DbStatusResponse, PreviewState, UploadResponse};
