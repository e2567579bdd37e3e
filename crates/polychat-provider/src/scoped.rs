//! Scoped client acquisition.
//!
//! Every upstream call runs inside a lease: acquire the HTTP client, run the
//! operation, release when the lease drops. Release is Drop-based so early
//! returns and unwinding take the same path as success.

/// A lease on the backend's HTTP client for a single named operation.
pub struct ClientLease<'a> {
    client: &'a reqwest::Client,
    op: &'static str,
}

impl<'a> ClientLease<'a> {
    pub fn acquire(client: &'a reqwest::Client, op: &'static str) -> Self {
        tracing::trace!(op, "provider client acquired");
        Self { client, op }
    }

    pub fn client(&self) -> &reqwest::Client {
        self.client
    }
}

impl Drop for ClientLease<'_> {
    fn drop(&mut self) {
        tracing::trace!(op = self.op, "provider client released");
    }
}
