//! In-memory file store.
//!
//! First-class backend for development and tests: deterministic pagination
//! over insertion order, plus per-operation call counters so tests can assert
//! that gated or invalid requests never reached the upstream.

use crate::traits::{FileStore, ProviderError, ProviderResult};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use polychat_core::{FileState, ListPage, ProviderBackend, UploadedFileRecord};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// Snapshot of per-operation call counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpSnapshot {
    pub uploads: u64,
    pub gets: u64,
    pub lists: u64,
    pub deletes: u64,
}

#[derive(Default)]
struct OpCounters {
    uploads: AtomicU64,
    gets: AtomicU64,
    lists: AtomicU64,
    deletes: AtomicU64,
}

/// In-process file store keeping records in insertion order.
#[derive(Default)]
pub struct MemoryFileStore {
    files: Mutex<Vec<UploadedFileRecord>>,
    counters: OpCounters,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-operation call counts, for "upstream was never called" assertions.
    pub fn op_counts(&self) -> OpSnapshot {
        OpSnapshot {
            uploads: self.counters.uploads.load(Ordering::Relaxed),
            gets: self.counters.gets.load(Ordering::Relaxed),
            lists: self.counters.lists.load(Ordering::Relaxed),
            deletes: self.counters.deletes.load(Ordering::Relaxed),
        }
    }

    fn lock_files(&self) -> std::sync::MutexGuard<'_, Vec<UploadedFileRecord>> {
        // Records carry no cross-field invariants; a poisoned lock is usable.
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn upload(
        &self,
        display_name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> ProviderResult<UploadedFileRecord> {
        self.counters.uploads.fetch_add(1, Ordering::Relaxed);

        let now = Utc::now();
        let record = UploadedFileRecord {
            name: format!("files/{}", Uuid::new_v4().simple()),
            display_name: display_name.to_string(),
            mime_type: mime_type.to_string(),
            size_bytes: data.len() as u64,
            state: FileState::Active,
            create_time: now,
            update_time: now,
        };
        self.lock_files().push(record.clone());
        Ok(record)
    }

    async fn get(&self, name: &str) -> ProviderResult<Option<UploadedFileRecord>> {
        self.counters.gets.fetch_add(1, Ordering::Relaxed);
        Ok(self.lock_files().iter().find(|f| f.name == name).cloned())
    }

    async fn list(&self, page_size: u32, page_token: Option<&str>) -> ProviderResult<ListPage> {
        self.counters.lists.fetch_add(1, Ordering::Relaxed);

        let offset: usize = match page_token {
            Some(token) => token.parse().map_err(|_| {
                ProviderError::Request(format!("Invalid page token '{}'", token))
            })?,
            None => 0,
        };

        let files = self.lock_files();
        let page: Vec<UploadedFileRecord> = files
            .iter()
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect();
        let consumed = offset + page.len();
        let next_page_token = if consumed < files.len() {
            Some(consumed.to_string())
        } else {
            None
        };

        Ok(ListPage {
            files: page,
            next_page_token,
        })
    }

    async fn delete(&self, name: &str) -> ProviderResult<()> {
        self.counters.deletes.fetch_add(1, Ordering::Relaxed);

        let mut files = self.lock_files();
        let before = files.len();
        files.retain(|f| f.name != name);
        if files.len() == before {
            return Err(ProviderError::NotFound(name.to_string()));
        }
        Ok(())
    }

    fn backend(&self) -> ProviderBackend {
        ProviderBackend::Memory
    }

    fn supports_listing(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with(n: usize) -> MemoryFileStore {
        let store = MemoryFileStore::new();
        for i in 0..n {
            store
                .upload(&format!("file-{}.txt", i), "text/plain", Bytes::from("body"))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn upload_assigns_prefixed_name_and_active_state() {
        let store = store_with(1).await;
        let page = store.list(10, None).await.unwrap();
        let record = &page.files[0];
        assert!(record.name.starts_with("files/"));
        assert_eq!(record.state, FileState::Active);
        assert_eq!(record.size_bytes, 4);
    }

    #[tokio::test]
    async fn list_paginates_in_insertion_order() {
        let store = store_with(3).await;

        let first = store.list(2, None).await.unwrap();
        assert_eq!(first.files.len(), 2);
        assert_eq!(first.files[0].display_name, "file-0.txt");
        let token = first.next_page_token.expect("more pages");

        let second = store.list(2, Some(&token)).await.unwrap();
        assert_eq!(second.files.len(), 1);
        assert_eq!(second.files[0].display_name, "file-2.txt");
        assert!(second.next_page_token.is_none());
    }

    #[tokio::test]
    async fn exact_page_has_no_token() {
        let store = store_with(2).await;
        let page = store.list(2, None).await.unwrap();
        assert_eq!(page.files.len(), 2);
        assert!(page.next_page_token.is_none());
    }

    #[tokio::test]
    async fn malformed_token_is_rejected() {
        let store = store_with(1).await;
        assert!(store.list(10, Some("not-a-token")).await.is_err());
    }

    #[tokio::test]
    async fn get_missing_is_none_delete_missing_is_error() {
        let store = MemoryFileStore::new();
        assert!(store.get("files/ghost").await.unwrap().is_none());
        assert!(matches!(
            store.delete("files/ghost").await.unwrap_err(),
            ProviderError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn counters_track_operations() {
        let store = store_with(2).await;
        store.list(10, None).await.unwrap();
        let name = store.list(10, None).await.unwrap().files[0].name.clone();
        store.get(&name).await.unwrap();
        store.delete(&name).await.unwrap();

        let counts = store.op_counts();
        assert_eq!(counts.uploads, 2);
        assert_eq!(counts.lists, 2);
        assert_eq!(counts.gets, 1);
        assert_eq!(counts.deletes, 1);
    }
}
