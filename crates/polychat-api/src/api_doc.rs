//! OpenAPI documentation.

use crate::error::ErrorResponse;
use crate::handlers;
use polychat_core::models::{
    DeleteReceipt, FileEnvelope, FileMetadataEnvelope, FileState, ListPage, UploadedFileRecord,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Polychat File Gateway",
        version = "0.1.0",
        description = "Backend-for-frontend proxy between the Polychat browser app and the upstream generative-AI provider's file storage. Upload, list, metadata, and delete; no storage of its own."
    ),
    paths(
        handlers::files_upload::upload_file,
        handlers::files_list::list_files,
        handlers::files_metadata::file_metadata,
        handlers::files_delete::delete_file,
    ),
    components(schemas(
        UploadedFileRecord,
        FileState,
        ListPage,
        FileEnvelope,
        FileMetadataEnvelope,
        DeleteReceipt,
        ErrorResponse,
    )),
    tags(
        (name = "files", description = "Provider file proxy")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_spec_covers_all_file_routes() {
        let spec = ApiDoc::openapi();
        for path in [
            "/api/files/upload",
            "/api/files/list",
            "/api/files/metadata",
            "/api/files/delete",
        ] {
            assert!(
                spec.paths.paths.contains_key(path),
                "missing path {} in OpenAPI spec",
                path
            );
        }
    }
}
