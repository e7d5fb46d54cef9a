use serde::{Deserialize, Serialize};

/// Body of the connectivity endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStatusResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DbStatusResponse {
    pub fn connected() -> Self {
        DbStatusResponse {
            ok: true,
            message: Some("Database connection successful.".to_string()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        DbStatusResponse {
            ok: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Body of a successful upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub inserted: u64,
}

impl UploadResponse {
    pub fn inserted(count: u64) -> Self {
        UploadResponse {
            ok: true,
            inserted: count,
        }
    }
}
