//! Backend factory.

use crate::google::{GoogleFileStore, GoogleMode};
use crate::memory::MemoryFileStore;
use crate::traits::{FileStore, ProviderError, ProviderResult};
use polychat_core::{Config, ProviderBackend};
use std::sync::Arc;

/// Create a file store backend based on configuration.
pub fn create_file_store(config: &Config) -> ProviderResult<Arc<dyn FileStore>> {
    match config.provider_backend() {
        ProviderBackend::Gemini => {
            let api_key = config.google_api_key().ok_or_else(|| {
                ProviderError::Config("GOOGLE_API_KEY not configured".to_string())
            })?;
            let store =
                GoogleFileStore::new(api_key, config.google_api_base(), GoogleMode::GeminiApi)?;
            Ok(Arc::new(store))
        }

        ProviderBackend::Vertex => {
            let api_key = config.google_api_key().ok_or_else(|| {
                ProviderError::Config("GOOGLE_API_KEY not configured".to_string())
            })?;
            let store =
                GoogleFileStore::new(api_key, config.google_api_base(), GoogleMode::VertexAi)?;
            Ok(Arc::new(store))
        }

        ProviderBackend::Memory => Ok(Arc::new(MemoryFileStore::new())),
    }
}
