use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::NameQuery;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use polychat_core::{validation, AppError, DeleteReceipt};
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/api/files/delete",
    tag = "files",
    params(NameQuery),
    responses(
        (status = 200, description = "File deleted", body = DeleteReceipt),
        (status = 400, description = "Missing or malformed name", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 501, description = "Deletion not supported by the provider mode", body = ErrorResponse),
        (status = 502, description = "Provider failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(operation = "delete_file"))]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NameQuery>,
) -> Result<Json<DeleteReceipt>, HttpAppError> {
    // Capability gate comes first: an unsupported provider mode fails the
    // request regardless of parameter validity.
    if !state.store.supports_listing() {
        return Err(AppError::Unsupported(format!(
            "File deletion is not available for the {} backend",
            state.store.backend()
        ))
        .into());
    }

    let name = validation::validate_resource_name(query.name.as_deref())?;
    state.store.delete(name).await?;

    tracing::info!(name = %name, "File deleted");
    Ok(Json(DeleteReceipt {
        ok: true,
        name: name.to_string(),
    }))
}
