//! File overview state manager.
//!
//! The browser binds its file panel to this state: a flat record list with
//! incremental pagination, per-file-name in-flight flags for delete/attach so
//! the same file cannot be double-submitted while actions on other files stay
//! independent, an aggregate size/count summary, and a single latest-error
//! surface cleared only by an explicit call.

use crate::files::FilesApi;
use anyhow::Result;
use bytes::Bytes;
use polychat_core::models::UploadedFileRecord;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Aggregate summary over the currently loaded records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSummary {
    pub count: usize,
    pub total_size_bytes: u64,
}

#[derive(Clone, Copy)]
enum InFlight {
    Delete,
    Attach,
}

#[derive(Default)]
struct OverviewState {
    files: Vec<UploadedFileRecord>,
    next_page_token: Option<String>,
    loading: bool,
    deleting: HashSet<String>,
    attaching: HashSet<String>,
    last_error: Option<String>,
}

/// Client-side file overview.
///
/// All methods take `&self`; the state lives behind a mutex that is never
/// held across an await, so the overview can be shared across UI tasks.
pub struct FileOverview {
    api: Arc<dyn FilesApi>,
    state: Mutex<OverviewState>,
    uploads_cancelled: AtomicBool,
}

impl FileOverview {
    pub fn new(api: Arc<dyn FilesApi>) -> Self {
        Self {
            api,
            state: Mutex::new(OverviewState::default()),
            uploads_cancelled: AtomicBool::new(false),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, OverviewState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record_error(&self, err: &anyhow::Error) {
        // Latest error only: each failure overwrites the previous one.
        self.lock_state().last_error = Some(err.to_string());
    }

    /// Mark an operation in flight for `name`. False when already in flight.
    fn begin(&self, which: InFlight, name: &str) -> bool {
        let mut state = self.lock_state();
        let set = match which {
            InFlight::Delete => &mut state.deleting,
            InFlight::Attach => &mut state.attaching,
        };
        set.insert(name.to_string())
    }

    fn finish(&self, which: InFlight, name: &str) {
        let mut state = self.lock_state();
        let set = match which {
            InFlight::Delete => &mut state.deleting,
            InFlight::Attach => &mut state.attaching,
        };
        set.remove(name);
    }

    // ----- Read accessors -----

    pub fn files(&self) -> Vec<UploadedFileRecord> {
        self.lock_state().files.clone()
    }

    pub fn next_page_token(&self) -> Option<String> {
        self.lock_state().next_page_token.clone()
    }

    pub fn summary(&self) -> FileSummary {
        let state = self.lock_state();
        FileSummary {
            count: state.files.len(),
            total_size_bytes: state.files.iter().map(|f| f.size_bytes).sum(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().loading
    }

    pub fn is_deleting(&self, name: &str) -> bool {
        self.lock_state().deleting.contains(name)
    }

    pub fn is_attaching(&self, name: &str) -> bool {
        self.lock_state().attaching.contains(name)
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock_state().last_error.clone()
    }

    pub fn clear_error(&self) {
        self.lock_state().last_error = None;
    }

    // ----- Cancellation -----

    /// Reject uploads issued from now on before any request is sent.
    pub fn cancel_pending_uploads(&self) {
        self.uploads_cancelled.store(true, Ordering::Relaxed);
    }

    pub fn allow_uploads(&self) {
        self.uploads_cancelled.store(false, Ordering::Relaxed);
    }

    // ----- Operations -----

    /// Replace the record list with the first page. False when a load is
    /// already in flight.
    pub async fn refresh(&self) -> Result<bool> {
        {
            let mut state = self.lock_state();
            if state.loading {
                return Ok(false);
            }
            state.loading = true;
        }

        let result = self.api.list_files(None, None).await;

        let mut state = self.lock_state();
        state.loading = false;
        match result {
            Ok(page) => {
                state.files = page.files;
                state.next_page_token = page.next_page_token;
                Ok(true)
            }
            Err(err) => {
                state.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Append the next page. False when there is no further page or a load is
    /// already in flight.
    pub async fn load_more(&self) -> Result<bool> {
        let token = {
            let mut state = self.lock_state();
            if state.loading {
                return Ok(false);
            }
            let Some(token) = state.next_page_token.clone() else {
                return Ok(false);
            };
            state.loading = true;
            token
        };

        let result = self.api.list_files(None, Some(&token)).await;

        let mut state = self.lock_state();
        state.loading = false;
        match result {
            Ok(page) => {
                state.files.extend(page.files);
                state.next_page_token = page.next_page_token;
                Ok(true)
            }
            Err(err) => {
                state.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Upload a file and append its record.
    pub async fn upload(
        &self,
        display_name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> Result<UploadedFileRecord> {
        if self.uploads_cancelled.load(Ordering::Relaxed) {
            let err = anyhow::anyhow!("Upload of '{}' rejected: uploads cancelled", display_name);
            self.record_error(&err);
            return Err(err);
        }

        match self.api.upload_file(display_name, mime_type, data).await {
            Ok(record) => {
                self.lock_state().files.push(record.clone());
                Ok(record)
            }
            Err(err) => {
                self.record_error(&err);
                Err(err)
            }
        }
    }

    /// Delete a file. `Ok(false)` when a delete for the same name is already
    /// in flight (the request is not issued).
    pub async fn delete(&self, name: &str) -> Result<bool> {
        if !self.begin(InFlight::Delete, name) {
            return Ok(false);
        }

        let result = self.api.delete_file(name).await;
        self.finish(InFlight::Delete, name);

        match result {
            Ok(()) => {
                self.lock_state().files.retain(|f| f.name != name);
                Ok(true)
            }
            Err(err) => {
                self.record_error(&err);
                Err(err)
            }
        }
    }

    /// Verify a file is still present and active, returning its record for
    /// the chat composer. `Ok(None)` when an attach for the same name is
    /// already in flight.
    pub async fn attach(&self, name: &str) -> Result<Option<UploadedFileRecord>> {
        if !self.begin(InFlight::Attach, name) {
            return Ok(None);
        }

        let result = self.api.file_metadata(name).await;
        self.finish(InFlight::Attach, name);

        let file = match result {
            Ok(file) => file,
            Err(err) => {
                self.record_error(&err);
                return Err(err);
            }
        };

        match file {
            None => {
                let err = anyhow::anyhow!("File '{}' no longer exists", name);
                self.record_error(&err);
                Err(err)
            }
            Some(record) if !record.is_active() => {
                let err = anyhow::anyhow!(
                    "File '{}' is not ready to attach (state {:?})",
                    name,
                    record.state
                );
                self.record_error(&err);
                Err(err)
            }
            Some(record) => Ok(Some(record)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use polychat_core::models::{FileState, ListPage};
    use std::collections::HashMap;
    use std::sync::atomic::AtomicU64;

    fn record(name: &str, size: u64, state: FileState) -> UploadedFileRecord {
        let now = Utc::now();
        UploadedFileRecord {
            name: name.to_string(),
            display_name: format!("{}.txt", name.trim_start_matches("files/")),
            mime_type: "text/plain".to_string(),
            size_bytes: size,
            state,
            create_time: now,
            update_time: now,
        }
    }

    /// Scripted transport double: list pops pages in order, metadata serves a
    /// fixed map, delete and upload count invocations.
    #[derive(Default)]
    struct StubFilesApi {
        pages: Mutex<Vec<ListPage>>,
        metadata: Mutex<HashMap<String, UploadedFileRecord>>,
        upload_calls: AtomicU64,
        delete_calls: AtomicU64,
        fail_deletes: AtomicBool,
    }

    #[async_trait]
    impl FilesApi for StubFilesApi {
        async fn upload_file(
            &self,
            display_name: &str,
            mime_type: &str,
            data: Bytes,
        ) -> Result<UploadedFileRecord> {
            self.upload_calls.fetch_add(1, Ordering::Relaxed);
            let now = Utc::now();
            Ok(UploadedFileRecord {
                name: format!("files/{}", display_name),
                display_name: display_name.to_string(),
                mime_type: mime_type.to_string(),
                size_bytes: data.len() as u64,
                state: FileState::Active,
                create_time: now,
                update_time: now,
            })
        }

        async fn list_files(
            &self,
            _page_size: Option<u32>,
            _page_token: Option<&str>,
        ) -> Result<ListPage> {
            let mut pages = self.pages.lock().unwrap();
            if pages.is_empty() {
                return Err(anyhow::anyhow!("no more scripted pages"));
            }
            Ok(pages.remove(0))
        }

        async fn file_metadata(&self, name: &str) -> Result<Option<UploadedFileRecord>> {
            Ok(self.metadata.lock().unwrap().get(name).cloned())
        }

        async fn delete_file(&self, name: &str) -> Result<()> {
            self.delete_calls.fetch_add(1, Ordering::Relaxed);
            if self.fail_deletes.load(Ordering::Relaxed) {
                return Err(anyhow::anyhow!("delete of '{}' failed", name));
            }
            Ok(())
        }
    }

    fn overview_with(stub: StubFilesApi) -> (FileOverview, Arc<StubFilesApi>) {
        let stub = Arc::new(stub);
        (FileOverview::new(stub.clone()), stub)
    }

    #[tokio::test]
    async fn refresh_replaces_records_and_token() {
        let stub = StubFilesApi::default();
        stub.pages.lock().unwrap().push(ListPage {
            files: vec![record("files/a", 100, FileState::Active)],
            next_page_token: Some("1".to_string()),
        });
        let (overview, _stub) = overview_with(stub);

        assert!(overview.refresh().await.unwrap());
        assert_eq!(overview.files().len(), 1);
        assert_eq!(overview.next_page_token(), Some("1".to_string()));
        assert!(!overview.is_loading());
    }

    #[tokio::test]
    async fn load_more_appends_and_stops_at_last_page() {
        let stub = StubFilesApi::default();
        {
            let mut pages = stub.pages.lock().unwrap();
            pages.push(ListPage {
                files: vec![record("files/a", 100, FileState::Active)],
                next_page_token: Some("1".to_string()),
            });
            pages.push(ListPage {
                files: vec![record("files/b", 50, FileState::Active)],
                next_page_token: None,
            });
        }
        let (overview, _stub) = overview_with(stub);

        overview.refresh().await.unwrap();
        assert!(overview.load_more().await.unwrap());
        assert_eq!(overview.files().len(), 2);
        assert_eq!(overview.next_page_token(), None);

        // No further page: nothing issued, nothing changed.
        assert!(!overview.load_more().await.unwrap());
    }

    #[tokio::test]
    async fn summary_aggregates_size_and_count() {
        let stub = StubFilesApi::default();
        stub.pages.lock().unwrap().push(ListPage {
            files: vec![
                record("files/a", 100, FileState::Active),
                record("files/b", 50, FileState::Processing),
            ],
            next_page_token: None,
        });
        let (overview, _stub) = overview_with(stub);
        overview.refresh().await.unwrap();

        let summary = overview.summary();
        assert_eq!(
            summary,
            FileSummary {
                count: 2,
                total_size_bytes: 150
            }
        );
    }

    #[tokio::test]
    async fn delete_guard_rejects_double_submission_per_name() {
        let (overview, stub) = overview_with(StubFilesApi::default());

        // First submission holds the flag.
        assert!(overview.begin(InFlight::Delete, "files/a"));
        assert!(overview.is_deleting("files/a"));

        // Second submission for the same name is rejected without a request.
        assert!(!overview.delete("files/a").await.unwrap());
        assert_eq!(stub.delete_calls.load(Ordering::Relaxed), 0);

        // A different name is unaffected.
        assert!(overview.delete("files/b").await.unwrap());
        assert_eq!(stub.delete_calls.load(Ordering::Relaxed), 1);

        overview.finish(InFlight::Delete, "files/a");
        assert!(!overview.is_deleting("files/a"));
    }

    #[tokio::test]
    async fn delete_success_removes_record_and_clears_flag() {
        let stub = StubFilesApi::default();
        stub.pages.lock().unwrap().push(ListPage {
            files: vec![
                record("files/a", 10, FileState::Active),
                record("files/b", 20, FileState::Active),
            ],
            next_page_token: None,
        });
        let (overview, _stub) = overview_with(stub);
        overview.refresh().await.unwrap();

        assert!(overview.delete("files/a").await.unwrap());
        assert!(!overview.is_deleting("files/a"));
        let names: Vec<String> = overview.files().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["files/b".to_string()]);
    }

    #[tokio::test]
    async fn failed_delete_records_latest_error_and_releases_flag() {
        let stub = StubFilesApi::default();
        stub.fail_deletes.store(true, Ordering::Relaxed);
        let (overview, _stub) = overview_with(stub);

        assert!(overview.delete("files/a").await.is_err());
        assert!(!overview.is_deleting("files/a"));
        let first_error = overview.last_error().expect("error recorded");
        assert!(first_error.contains("files/a"));

        // Next failure overwrites the previous error.
        assert!(overview.delete("files/b").await.is_err());
        assert!(overview.last_error().unwrap().contains("files/b"));

        overview.clear_error();
        assert!(overview.last_error().is_none());
    }

    #[tokio::test]
    async fn attach_requires_active_state() {
        let stub = StubFilesApi::default();
        {
            let mut metadata = stub.metadata.lock().unwrap();
            metadata.insert(
                "files/ready".to_string(),
                record("files/ready", 10, FileState::Active),
            );
            metadata.insert(
                "files/pending".to_string(),
                record("files/pending", 10, FileState::Processing),
            );
        }
        let (overview, _stub) = overview_with(stub);

        let attached = overview.attach("files/ready").await.unwrap();
        assert_eq!(attached.unwrap().name, "files/ready");
        assert!(!overview.is_attaching("files/ready"));

        assert!(overview.attach("files/pending").await.is_err());
        assert!(overview.last_error().unwrap().contains("not ready"));

        assert!(overview.attach("files/ghost").await.is_err());
        assert!(overview.last_error().unwrap().contains("no longer exists"));
    }

    #[tokio::test]
    async fn attach_guard_rejects_double_submission() {
        let stub = StubFilesApi::default();
        stub.metadata.lock().unwrap().insert(
            "files/a".to_string(),
            record("files/a", 10, FileState::Active),
        );
        let (overview, _stub) = overview_with(stub);

        assert!(overview.begin(InFlight::Attach, "files/a"));
        assert!(overview.attach("files/a").await.unwrap().is_none());
        overview.finish(InFlight::Attach, "files/a");

        assert!(overview.attach("files/a").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn cancelled_upload_is_rejected_before_request() {
        let (overview, stub) = overview_with(StubFilesApi::default());

        overview.cancel_pending_uploads();
        assert!(overview
            .upload("a.txt", "text/plain", Bytes::from_static(b"x"))
            .await
            .is_err());
        assert_eq!(stub.upload_calls.load(Ordering::Relaxed), 0);
        assert!(overview.last_error().unwrap().contains("cancelled"));

        overview.allow_uploads();
        let record = overview
            .upload("a.txt", "text/plain", Bytes::from_static(b"x"))
            .await
            .unwrap();
        assert_eq!(record.display_name, "a.txt");
        assert_eq!(stub.upload_calls.load(Ordering::Relaxed), 1);
        assert_eq!(overview.files().len(), 1);
    }

    #[tokio::test]
    async fn refresh_guard_skips_while_loading() {
        let (overview, _stub) = overview_with(StubFilesApi::default());
        overview.lock_state().loading = true;
        assert!(!overview.refresh().await.unwrap());
        assert!(!overview.load_more().await.unwrap());
    }
}
