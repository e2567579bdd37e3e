//! Application state.
//!
//! The gateway holds no database, queue, or session state: the provider
//! backend and the upload limits are everything the handlers need.

use polychat_core::Config;
use polychat_provider::FileStore;
use std::sync::Arc;

/// Upload size window enforced before any upstream call.
#[derive(Clone, Copy, Debug)]
pub struct UploadLimits {
    pub max_upload_bytes: usize,
}

/// Main application state shared by all handlers.
pub struct AppState {
    pub store: Arc<dyn FileStore>,
    pub limits: UploadLimits,
}

impl AppState {
    pub fn new(store: Arc<dyn FileStore>, config: &Config) -> Self {
        Self {
            store,
            limits: UploadLimits {
                max_upload_bytes: config.max_upload_bytes(),
            },
        }
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
