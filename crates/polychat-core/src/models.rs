//! Wire models shared between the gateway and its clients.
//!
//! These are transient DTOs: the gateway persists nothing, so every type here
//! mirrors either the provider's file resource or one of the gateway's fixed
//! JSON response envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of a provider file.
///
/// `Processing` files exist but cannot be attached to a prompt yet; `Failed`
/// files are kept by the provider for inspection but are never attachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileState {
    Processing,
    Active,
    Failed,
}

/// File resource as exposed to the browser.
///
/// Mirrors the upstream provider's file resource one-to-one. `name` is the
/// stable identifier (`files/<id>`) and is the only field callers may use to
/// address the file in metadata/delete calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFileRecord {
    pub name: String,
    pub display_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub state: FileState,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl UploadedFileRecord {
    /// Whether the file is ready to be attached to a prompt.
    pub fn is_active(&self) -> bool {
        self.state == FileState::Active
    }
}

/// One page of a file listing.
///
/// `next_page_token` is the provider's opaque continuation cursor, re-exposed
/// verbatim; it is absent on the last page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    pub files: Vec<UploadedFileRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Success envelope for upload: `{ "file": {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileEnvelope {
    pub file: UploadedFileRecord,
}

/// Success envelope for metadata: `{ "file": {...} }` or `{ "file": null }`.
///
/// A missing file is a successful `null`, not an error, so callers can
/// distinguish "doesn't exist" from "provider failure".
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileMetadataEnvelope {
    pub file: Option<UploadedFileRecord>,
}

/// Success envelope for delete: `{ "ok": true, "name": "files/..." }`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteReceipt {
    pub ok: bool,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_state_uses_provider_wire_names() {
        assert_eq!(
            serde_json::to_string(&FileState::Processing).unwrap(),
            "\"PROCESSING\""
        );
        let state: FileState = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(state, FileState::Active);
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = UploadedFileRecord {
            name: "files/abc123".to_string(),
            display_name: "report.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size_bytes: 2048,
            state: FileState::Active,
            create_time: Utc::now(),
            update_time: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["displayName"], "report.pdf");
        assert_eq!(json["mimeType"], "application/pdf");
        assert_eq!(json["sizeBytes"], 2048);
        assert_eq!(json["state"], "ACTIVE");
    }

    #[test]
    fn list_page_omits_absent_token() {
        let page = ListPage {
            files: vec![],
            next_page_token: None,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("nextPageToken").is_none());
    }

    #[test]
    fn metadata_envelope_serializes_explicit_null() {
        let envelope = FileMetadataEnvelope { file: None };
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("file").is_some());
        assert!(json["file"].is_null());
    }
}
