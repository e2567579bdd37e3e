//! Provider backend selection.

use serde::{Deserialize, Serialize};

/// Which upstream backend serves file storage.
///
/// `Gemini` is the API-key mode of the Google AI Files API and supports the
/// full surface. `Vertex` reaches the same file resources through a project
/// binding that exposes no list/delete operations. `Memory` is an in-process
/// backend for development and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderBackend {
    Gemini,
    Vertex,
    Memory,
}

impl ProviderBackend {
    /// Parse the `PROVIDER_BACKEND` environment value.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "gemini" | "google" | "google-ai" => Some(ProviderBackend::Gemini),
            "vertex" | "vertex-ai" => Some(ProviderBackend::Vertex),
            "memory" | "in-memory" => Some(ProviderBackend::Memory),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderBackend::Gemini => "gemini",
            ProviderBackend::Vertex => "vertex",
            ProviderBackend::Memory => "memory",
        }
    }
}

impl std::fmt::Display for ProviderBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
