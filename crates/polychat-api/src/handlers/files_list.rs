use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use polychat_core::{validation, AppError, ListPage};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

/// Query parameters for list.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page size, 1-100. Defaults to 50.
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
    /// Opaque continuation cursor from a previous page.
    #[serde(rename = "pageToken")]
    pub page_token: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/files/list",
    tag = "files",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of files", body = ListPage),
        (status = 400, description = "pageSize out of range", body = ErrorResponse),
        (status = 501, description = "Listing not supported by the provider mode", body = ErrorResponse),
        (status = 502, description = "Provider failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(operation = "list_files"))]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListPage>, HttpAppError> {
    // Capability gate comes first: an unsupported provider mode fails the
    // request regardless of parameter validity.
    if !state.store.supports_listing() {
        return Err(AppError::Unsupported(format!(
            "File listing is not available for the {} backend",
            state.store.backend()
        ))
        .into());
    }

    let page_size = validation::parse_page_size(query.page_size.as_deref())?;
    let page = state
        .store
        .list(page_size, query.page_token.as_deref())
        .await?;

    tracing::debug!(
        count = page.files.len(),
        has_next = page.next_page_token.is_some(),
        "Listed files"
    );
    Ok(Json(page))
}
