//! File store abstraction trait
//!
//! This module defines the FileStore trait that all provider backends must
//! implement, along with the provider error taxonomy.

use async_trait::async_trait;
use bytes::Bytes;
use polychat_core::{ListPage, ProviderBackend, UploadedFileRecord};
use thiserror::Error;

/// Provider operation errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Request(String),

    #[error("Provider returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Operation not supported: {0}")]
    Unsupported(String),

    #[error("Malformed provider response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Request(err.to_string())
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// File store abstraction trait
///
/// All provider backends (Google Files API, in-memory) implement this trait
/// so the gateway handlers can proxy requests without coupling to a specific
/// upstream.
///
/// **Name format:** file resource names are `files/<id>`; the gateway
/// validates the prefix before any call lands here.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Upload a file body and return the provider's file resource.
    async fn upload(
        &self,
        display_name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> ProviderResult<UploadedFileRecord>;

    /// Fetch a file resource by name.
    ///
    /// An upstream not-found is a successful `None`, not an error, so callers
    /// can distinguish "doesn't exist" from "provider failure".
    async fn get(&self, name: &str) -> ProviderResult<Option<UploadedFileRecord>>;

    /// List one page of file resources.
    ///
    /// `page_token` is the opaque cursor from a previous page; the returned
    /// page carries the next cursor verbatim when more pages exist.
    async fn list(&self, page_size: u32, page_token: Option<&str>) -> ProviderResult<ListPage>;

    /// Delete a file resource by name.
    async fn delete(&self, name: &str) -> ProviderResult<()>;

    /// Which backend this store talks to.
    fn backend(&self) -> ProviderBackend;

    /// Whether list/delete are available in the backend's current mode.
    ///
    /// When this is false the gateway fails list/delete requests with a
    /// "feature not supported" error before reaching this trait's methods.
    fn supports_listing(&self) -> bool;
}
