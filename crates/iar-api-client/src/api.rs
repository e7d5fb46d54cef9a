//! Domain methods for the IAR uploader API client.

use crate::{error_message, ApiClient};
use anyhow::{Context, Result};
use iar_core::{CsvPreview, DbStatusResponse, UploadResponse};
use std::path::Path;

/// Read a local file into a multipart form with a single `file` field.
pub fn csv_form(file_path: &Path) -> Result<reqwest::multipart::Form> {
    let buffer = std::fs::read(file_path)
        .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

    let filename = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.csv")
        .to_string();

    let part = reqwest::multipart::Part::bytes(buffer)
        .file_name(filename)
        .mime_str("text/csv")
        .context("Invalid MIME type")?;

    Ok(reqwest::multipart::Form::new().part("file", part))
}

impl ApiClient {
    /// Ask the server whether the destination database is reachable.
    ///
    /// A failed check is returned as a response with `ok == false`, not as an error; only
    /// transport failures (server unreachable, unreadable body) are errors.
    pub async fn db_status(&self) -> Result<DbStatusResponse> {
        let response = self
            .client()
            .get(self.build_url("/api/db-status"))
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read response body")?;

        match serde_json::from_str::<DbStatusResponse>(&text) {
            Ok(body) => Ok(body),
            Err(_) if !status.is_success() => {
                Ok(DbStatusResponse::failed(error_message(status.as_u16(), &text)))
            }
            Err(e) => Err(anyhow::Error::new(e).context("Failed to parse response as JSON")),
        }
    }

    /// Parse a CSV on the server without inserting anything.
    pub async fn preview_csv(&self, file_path: &Path) -> Result<CsvPreview> {
        self.post_multipart("/api/preview", csv_form(file_path)?)
            .await
    }

    /// Upload a CSV; every row is inserted or none is.
    pub async fn upload_csv(&self, file_path: &Path) -> Result<UploadResponse> {
        self.post_multipart("/api/upload-iar", csv_form(file_path)?)
            .await
    }
}
