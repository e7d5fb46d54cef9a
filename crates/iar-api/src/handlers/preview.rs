use crate::error::HttpAppError;
use crate::utils::upload::extract_multipart_file;
use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    Json,
};
use iar_core::{parse_csv_bytes, AppError, CsvPreview};

/// Parse an uploaded CSV with the ingestion parser and return what would be inserted,
/// without touching the database.
#[tracing::instrument(skip(multipart))]
pub async fn preview_csv(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CsvPreview>, HttpAppError> {
    let file = extract_multipart_file(multipart?).await?;
    tracing::debug!(
        file_name = %file.file_name,
        content_type = %file.content_type,
        "Previewing CSV"
    );

    let csv = parse_csv_bytes(&file.data).map_err(AppError::from)?;
    let preview = CsvPreview::from_parsed(file.file_name.clone(), file.size_bytes(), &csv);

    if let Some(message) = preview.state.message() {
        return Err(AppError::InvalidInput(message.to_string()).into());
    }

    Ok(Json(preview))
}
