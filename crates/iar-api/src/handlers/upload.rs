use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use iar_core::{parse_csv_bytes, AppError, NormalizedRecord, UploadResponse};
use std::sync::Arc;

/// Parse the uploaded CSV, normalize every row and write the whole batch in one
/// all-or-nothing insert.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_iar(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let file = extract_multipart_file(multipart?).await?;

    let csv = parse_csv_bytes(&file.data).map_err(AppError::from)?;
    if csv.row_count() == 0 {
        return Err(AppError::EmptyCsv.into());
    }

    let records = NormalizedRecord::from_csv(&csv);
    let inserted = state.repository.bulk_insert(&records).await?;

    tracing::info!(
        file_name = %file.file_name,
        size_bytes = file.size_bytes(),
        rows = records.len(),
        inserted,
        "IAR upload complete"
    );

    Ok(Json(UploadResponse::inserted(inserted)))
}
