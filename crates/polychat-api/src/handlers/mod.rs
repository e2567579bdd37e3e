//! HTTP handlers for the file proxy routes.

pub mod files_delete;
pub mod files_list;
pub mod files_metadata;
pub mod files_upload;

use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for the metadata and delete routes.
///
/// `name` is kept optional at the extractor level so its absence renders the
/// gateway's own validation envelope instead of an extractor rejection.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// File resource name, `files/<id>`.
    pub name: Option<String>,
}
