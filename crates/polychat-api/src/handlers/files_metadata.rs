use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::NameQuery;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use polychat_core::{validation, FileMetadataEnvelope};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/files/metadata",
    tag = "files",
    params(NameQuery),
    responses(
        (status = 200, description = "File resource, or null when the file does not exist", body = FileMetadataEnvelope),
        (status = 400, description = "Missing or malformed name", body = ErrorResponse),
        (status = 502, description = "Provider failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(operation = "file_metadata"))]
pub async fn file_metadata(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NameQuery>,
) -> Result<Json<FileMetadataEnvelope>, HttpAppError> {
    let name = validation::validate_resource_name(query.name.as_deref())?;

    // A vanished file is a successful null so the caller can tell "doesn't
    // exist" apart from a provider failure.
    let file = state.store.get(name).await?;

    tracing::debug!(name = %name, found = file.is_some(), "Fetched file metadata");
    Ok(Json(FileMetadataEnvelope { file }))
}
