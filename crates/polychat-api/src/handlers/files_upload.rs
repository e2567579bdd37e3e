use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use polychat_core::{validation, FileEnvelope};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

/// Query parameters for upload.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UploadQuery {
    /// Human-readable name shown in the file overview.
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    /// MIME type of the uploaded body.
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/files/upload",
    tag = "files",
    params(UploadQuery),
    request_body(content = Vec<u8>, description = "Raw file body", content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "File uploaded", body = FileEnvelope),
        (status = 400, description = "Missing or invalid parameters, or empty body", body = ErrorResponse),
        (status = 413, description = "Body exceeds the upload ceiling", body = ErrorResponse),
        (status = 502, description = "Provider failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query, body), fields(body_len = body.len(), operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<Json<FileEnvelope>, HttpAppError> {
    let display_name = validation::validate_display_name(query.display_name.as_deref())?;
    let mime_type = validation::validate_mime_type(query.mime_type.as_deref())?;
    validation::validate_upload_body(body.len(), state.limits.max_upload_bytes)?;

    let file = state.store.upload(display_name, mime_type, body).await?;

    tracing::info!(name = %file.name, size_bytes = file.size_bytes, "File uploaded");
    Ok(Json(FileEnvelope { file }))
}
