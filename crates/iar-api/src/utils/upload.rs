//! Multipart extraction shared by the upload and preview handlers

use axum::extract::Multipart;
use iar_core::AppError;

/// The single file carried by a multipart submission.
#[derive(Debug)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

impl UploadedFile {
    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Extract the file sent in the field named `file`.
///
/// A `file` field without a file name is a plain form value, not a file, and is ignored.
/// Only one file field is accepted; a second one is rejected. A body that cannot be read
/// to the end is a server-side failure, not a client input error.
pub async fn extract_multipart_file(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    let mut uploaded: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if uploaded.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read file data: {}", e)))?;

        uploaded = Some(UploadedFile {
            data: data.to_vec(),
            file_name,
            content_type,
        });
    }

    uploaded.ok_or(AppError::NoFile)
}
