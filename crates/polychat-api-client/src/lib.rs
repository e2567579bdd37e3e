//! Shared HTTP client for the Polychat file gateway.
//!
//! Provides a minimal client with generic GET/POST/DELETE helpers, the typed
//! file endpoints in [`files`], and the browser-facing overview state manager
//! in [`overview`].

pub mod files;
pub mod overview;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the file gateway.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: POLYCHAT_API_URL (or API_URL).
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("POLYCHAT_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| "http://localhost:8990".to_string());

        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.build_url(path);
        let mut request = self.client.get(&url);

        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.context("Failed to send request")?;
        Self::decode(response).await
    }

    /// POST a raw body with query parameters and deserialize the response.
    pub async fn post_bytes<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        content_type: &str,
        body: bytes::Bytes,
    ) -> Result<T> {
        let url = self.build_url(path);
        let request = self
            .client
            .post(&url)
            .query(query)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body);

        let response = request.send().await.context("Failed to send request")?;
        Self::decode(response).await
    }

    /// DELETE request with query parameters. Deserializes JSON response.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.build_url(path);
        let request = self.client.delete(&url).query(query);

        let response = request.send().await.context("Failed to send request")?;
        Self::decode(response).await
    }

    /// Surface the gateway's error envelope text on non-2xx, decode JSON otherwise.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        let body: T = response
            .json()
            .await
            .context("Failed to parse response as JSON")?;

        Ok(body)
    }

    /// Raw client for custom requests.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

// Re-export domain types for convenience.
pub use files::FilesApi;
pub use overview::{FileOverview, FileSummary};
pub use polychat_core::models::{
    DeleteReceipt, FileEnvelope, FileMetadataEnvelope, FileState, ListPage, UploadedFileRecord,
};
