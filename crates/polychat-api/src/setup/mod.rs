//! Application setup and initialization
//!
//! Initialization logic extracted from main.rs for better organization and
//! testability.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use polychat_core::Config;
use std::sync::Arc;

/// Initialize the application: provider backend, state, and router.
pub fn initialize_app(config: &Config) -> Result<(Arc<AppState>, axum::Router)> {
    let store =
        polychat_provider::create_file_store(config).context("Failed to create provider backend")?;

    tracing::info!(
        backend = %store.backend(),
        supports_listing = store.supports_listing(),
        "Provider backend ready"
    );

    let state = Arc::new(AppState::new(store, config));
    let router = routes::build_router(config, state.clone());

    Ok((state, router))
}
