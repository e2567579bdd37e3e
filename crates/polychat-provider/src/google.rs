//! Google AI Files API backend.
//!
//! Talks to the Gemini-style Files API: media upload via the resumable
//! upload endpoint, plus `v1beta/files` get/list/delete. The same store
//! serves two modes: `GeminiApi` (API-key mode, full surface) and `VertexAi`
//! (project binding with no list/delete surface). Unsupported operations are
//! rejected before any network I/O.

use crate::scoped::ClientLease;
use crate::traits::{FileStore, ProviderError, ProviderResult};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use polychat_core::{FileState, ListPage, ProviderBackend, UploadedFileRecord};
use serde::Deserialize;

const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";
const ERROR_TEXT_LIMIT: usize = 512;

/// Operating mode of the Google backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoogleMode {
    GeminiApi,
    VertexAi,
}

impl std::fmt::Display for GoogleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoogleMode::GeminiApi => f.write_str("gemini-api"),
            GoogleMode::VertexAi => f.write_str("vertex-ai"),
        }
    }
}

/// File store backed by the Google AI Files API.
pub struct GoogleFileStore {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    mode: GoogleMode,
}

impl GoogleFileStore {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        mode: GoogleMode,
    ) -> ProviderResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ProviderError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            mode,
        })
    }

    pub fn mode(&self) -> GoogleMode {
        self.mode
    }

    fn files_url(&self) -> String {
        format!("{}/v1beta/files", self.base_url)
    }

    fn resource_url(&self, name: &str) -> String {
        format!("{}/v1beta/{}", self.base_url, name)
    }

    fn upload_start_url(&self) -> String {
        format!("{}/upload/v1beta/files", self.base_url)
    }

    fn require_listing(&self, op: &str) -> ProviderResult<()> {
        if self.supports_listing() {
            return Ok(());
        }
        Err(ProviderError::Unsupported(format!(
            "File {} is not available in {} mode",
            op, self.mode
        )))
    }
}

/// Read the error body of a failed response into an Upstream error.
async fn upstream_error(op: &'static str, response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let mut message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    if message.len() > ERROR_TEXT_LIMIT {
        message.truncate(ERROR_TEXT_LIMIT);
        message.push_str("...");
    }
    ProviderError::Upstream {
        status,
        message: format!("{}: {}", op, message),
    }
}

// ----- Wire types (provider JSON, camelCase; sizeBytes is a string) -----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleFile {
    name: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    size_bytes: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    update_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct GoogleFileEnvelope {
    file: GoogleFile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleListResponse {
    #[serde(default)]
    files: Vec<GoogleFile>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl GoogleFile {
    fn into_record(self) -> UploadedFileRecord {
        let state = match self.state.as_deref() {
            Some("ACTIVE") => FileState::Active,
            Some("FAILED") => FileState::Failed,
            _ => FileState::Processing,
        };
        let now = Utc::now();
        UploadedFileRecord {
            display_name: self.display_name.unwrap_or_default(),
            mime_type: self
                .mime_type
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            size_bytes: self
                .size_bytes
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            state,
            create_time: self.create_time.unwrap_or(now),
            update_time: self.update_time.unwrap_or(now),
            name: self.name,
        }
    }
}

#[async_trait]
impl FileStore for GoogleFileStore {
    async fn upload(
        &self,
        display_name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> ProviderResult<UploadedFileRecord> {
        let lease = ClientLease::acquire(&self.http, "files.upload");

        // Resumable protocol: start the session, then send the body to the
        // session URL in a single finalizing chunk.
        let start = lease
            .client()
            .post(self.upload_start_url())
            .query(&[("key", self.api_key.as_str())])
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", data.len().to_string())
            .header("X-Goog-Upload-Header-Content-Type", mime_type)
            .json(&serde_json::json!({ "file": { "display_name": display_name } }))
            .send()
            .await?;

        if !start.status().is_success() {
            return Err(upstream_error("upload start", start).await);
        }

        let upload_url = start
            .headers()
            .get(UPLOAD_URL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or_else(|| {
                ProviderError::Decode("Upload session response carried no upload URL".to_string())
            })?;

        let finalize = lease
            .client()
            .post(upload_url)
            .header("X-Goog-Upload-Command", "upload, finalize")
            .header("X-Goog-Upload-Offset", "0")
            .body(data)
            .send()
            .await?;

        if !finalize.status().is_success() {
            return Err(upstream_error("upload finalize", finalize).await);
        }

        let envelope: GoogleFileEnvelope = finalize
            .json()
            .await
            .map_err(|e| ProviderError::Decode(format!("upload response: {}", e)))?;
        Ok(envelope.file.into_record())
    }

    async fn get(&self, name: &str) -> ProviderResult<Option<UploadedFileRecord>> {
        let lease = ClientLease::acquire(&self.http, "files.get");
        let response = lease
            .client()
            .get(self.resource_url(name))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(upstream_error("get", response).await);
        }

        let file: GoogleFile = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(format!("get response: {}", e)))?;
        Ok(Some(file.into_record()))
    }

    async fn list(&self, page_size: u32, page_token: Option<&str>) -> ProviderResult<ListPage> {
        self.require_listing("listing")?;

        let lease = ClientLease::acquire(&self.http, "files.list");
        let mut request = lease
            .client()
            .get(self.files_url())
            .query(&[("key", self.api_key.as_str())])
            .query(&[("pageSize", page_size.to_string())]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(upstream_error("list", response).await);
        }

        let page: GoogleListResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(format!("list response: {}", e)))?;
        Ok(ListPage {
            files: page.files.into_iter().map(GoogleFile::into_record).collect(),
            next_page_token: page.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    async fn delete(&self, name: &str) -> ProviderResult<()> {
        self.require_listing("deletion")?;

        let lease = ClientLease::acquire(&self.http, "files.delete");
        let response = lease
            .client()
            .delete(self.resource_url(name))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(name.to_string()));
        }
        if !response.status().is_success() {
            return Err(upstream_error("delete", response).await);
        }
        Ok(())
    }

    fn backend(&self) -> ProviderBackend {
        match self.mode {
            GoogleMode::GeminiApi => ProviderBackend::Gemini,
            GoogleMode::VertexAi => ProviderBackend::Vertex,
        }
    }

    fn supports_listing(&self) -> bool {
        self.mode == GoogleMode::GeminiApi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex_store() -> GoogleFileStore {
        // Base URL points nowhere routable; gated operations must fail before
        // any connection is attempted.
        GoogleFileStore::new("test-key", "http://127.0.0.1:1", GoogleMode::VertexAi).unwrap()
    }

    #[tokio::test]
    async fn vertex_mode_rejects_list_before_io() {
        let store = vertex_store();
        assert!(!store.supports_listing());
        let err = store.list(50, None).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported(_)));
    }

    #[tokio::test]
    async fn vertex_mode_rejects_delete_before_io() {
        let store = vertex_store();
        let err = store.delete("files/abc").await.unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported(_)));
    }

    #[test]
    fn backend_reflects_mode() {
        let store =
            GoogleFileStore::new("k", "http://localhost", GoogleMode::GeminiApi).unwrap();
        assert_eq!(store.backend(), ProviderBackend::Gemini);
        assert!(store.supports_listing());
        assert_eq!(vertex_store().backend(), ProviderBackend::Vertex);
    }

    #[test]
    fn wire_file_converts_to_record() {
        let file: GoogleFile = serde_json::from_value(serde_json::json!({
            "name": "files/abc123",
            "displayName": "notes.pdf",
            "mimeType": "application/pdf",
            "sizeBytes": "2048",
            "state": "ACTIVE",
            "createTime": "2026-01-05T12:00:00Z",
            "updateTime": "2026-01-05T12:00:01Z"
        }))
        .unwrap();
        let record = file.into_record();
        assert_eq!(record.name, "files/abc123");
        assert_eq!(record.size_bytes, 2048);
        assert_eq!(record.state, FileState::Active);
    }

    #[test]
    fn wire_file_defaults_unknown_state_to_processing() {
        let file: GoogleFile = serde_json::from_value(serde_json::json!({
            "name": "files/x",
            "state": "STATE_UNSPECIFIED"
        }))
        .unwrap();
        assert_eq!(file.into_record().state, FileState::Processing);
    }

    #[test]
    fn list_response_tolerates_missing_fields() {
        let page: GoogleListResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(page.files.is_empty());
        assert!(page.next_page_token.is_none());
    }
}
