//! Route configuration and setup.

use crate::api_doc::ApiDoc;
use crate::error::HttpAppError;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, Uri},
    routing::{delete, get, post},
    Json, Router,
};
use polychat_core::{AppError, Config};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

/// Extra bytes the transport-level body cap allows beyond the validation
/// ceiling, so slightly-over bodies still reach the handler and get the
/// gateway's own 413 envelope instead of a bare transport rejection.
const UPLOAD_BODY_SLACK: usize = 64 * 1024;

/// Assemble the application router.
pub fn build_router(config: &Config, state: Arc<AppState>) -> Router {
    let max_upload_bytes = config.max_upload_bytes();

    let files = Router::new()
        .route(
            "/api/files/upload",
            post(handlers::files_upload::upload_file).fallback(method_not_allowed),
        )
        .route(
            "/api/files/list",
            get(handlers::files_list::list_files).fallback(method_not_allowed),
        )
        .route(
            "/api/files/metadata",
            get(handlers::files_metadata::file_metadata).fallback(method_not_allowed),
        )
        .route(
            "/api/files/delete",
            delete(handlers::files_delete::delete_file).fallback(method_not_allowed),
        )
        .with_state(state);

    let docs: Router = RapiDoc::new("/api/openapi.json").path("/docs").into();

    files
        .route("/api/openapi.json", get(openapi_json))
        .merge(docs)
        .fallback(not_handled)
        .layer(setup_cors(config))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes + UPLOAD_BODY_SLACK))
        .layer(DefaultBodyLimit::disable())
}

fn setup_cors(config: &Config) -> CorsLayer {
    let origins = config.cors_origins();
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers(Any)
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Matched path, unsupported method: 405 with the fixed error envelope.
async fn method_not_allowed(method: Method, uri: Uri) -> HttpAppError {
    HttpAppError(AppError::MethodNotAllowed(format!(
        "{} is not supported on {}",
        method,
        uri.path()
    )))
}

/// Unmatched path: the router's "not handled" signal, as a 404 envelope.
async fn not_handled(uri: Uri) -> HttpAppError {
    HttpAppError(AppError::RouteNotHandled(format!(
        "No route for {}",
        uri.path()
    )))
}
