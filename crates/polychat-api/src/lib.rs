//! Polychat file gateway: the backend-for-frontend HTTP service.
//!
//! Exposed as a library so integration tests can build the router against
//! any provider backend; the binary in `main.rs` wires it to the configured
//! backend.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
