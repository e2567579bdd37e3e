//! Typed endpoints for the file gateway.
//!
//! The [`FilesApi`] trait is the seam between the overview state manager and
//! the transport: the real [`ApiClient`] implements it over HTTP, tests drive
//! the overview through a stub.

use crate::ApiClient;
use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use polychat_core::models::{DeleteReceipt, FileEnvelope, FileMetadataEnvelope, ListPage, UploadedFileRecord};

/// The four file operations of the gateway.
#[async_trait]
pub trait FilesApi: Send + Sync {
    async fn upload_file(
        &self,
        display_name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> Result<UploadedFileRecord>;

    async fn list_files(
        &self,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<ListPage>;

    /// `Ok(None)` when the file does not exist; `Err` only on transport or
    /// provider failure.
    async fn file_metadata(&self, name: &str) -> Result<Option<UploadedFileRecord>>;

    async fn delete_file(&self, name: &str) -> Result<()>;
}

#[async_trait]
impl FilesApi for ApiClient {
    async fn upload_file(
        &self,
        display_name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> Result<UploadedFileRecord> {
        let query = [
            ("displayName", display_name.to_string()),
            ("mimeType", mime_type.to_string()),
        ];
        let envelope: FileEnvelope = self
            .post_bytes("/api/files/upload", &query, mime_type, data)
            .await?;
        Ok(envelope.file)
    }

    async fn list_files(
        &self,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<ListPage> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(size) = page_size {
            query.push(("pageSize", size.to_string()));
        }
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }
        self.get("/api/files/list", &query).await
    }

    async fn file_metadata(&self, name: &str) -> Result<Option<UploadedFileRecord>> {
        let query = [("name", name.to_string())];
        let envelope: FileMetadataEnvelope = self.get("/api/files/metadata", &query).await?;
        Ok(envelope.file)
    }

    async fn delete_file(&self, name: &str) -> Result<()> {
        let query = [("name", name.to_string())];
        let _receipt: DeleteReceipt = self.delete("/api/files/delete", &query).await?;
        Ok(())
    }
}
