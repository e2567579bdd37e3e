//! Polychat Core Library
//!
//! This crate provides the shared DTOs, error taxonomy, configuration, and
//! request validation used by the Polychat file gateway and its clients.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod provider_types;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{DeleteReceipt, FileEnvelope, FileMetadataEnvelope, FileState, ListPage, UploadedFileRecord};
pub use provider_types::ProviderBackend;
