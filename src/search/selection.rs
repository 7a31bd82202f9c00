//! Short-lived handles for multi-match results
//!
//! When a search matches several entries the caller is offered a list of
//! labelled choices. Each choice is backed by an integer handle that can be
//! redeemed once, within [`SELECTION_TTL`], for the full entry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::search::config::SELECTION_TTL;
use crate::search::result::SearchResultEntry;

#[derive(Debug)]
pub struct SelectionCache {
    next_handle: AtomicU64,
    ttl: Duration,
    entries: Mutex<HashMap<u64, (Instant, SearchResultEntry)>>,
}

impl Default for SelectionCache {
    fn default() -> Self {
        Self::new(SELECTION_TTL)
    }
}

impl SelectionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            next_handle: AtomicU64::new(0),
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Store `entry` and return its handle
    pub async fn insert(&self, entry: SearchResultEntry) -> u64 {
        let handle = self.next_handle.fetch_add(1, Ordering::Relaxed);
        let now = Instant::now();

        let mut entries = self.entries.lock().await;
        let ttl = self.ttl;
        entries.retain(|_, (created, _)| now.duration_since(*created) < ttl);
        entries.insert(handle, (now, entry));
        handle
    }

    /// Redeem a handle. Unknown, used and expired handles yield `None`.
    pub async fn take(&self, handle: u64) -> Option<SearchResultEntry> {
        let (created, entry) = self.entries.lock().await.remove(&handle)?;
        if created.elapsed() < self.ttl {
            Some(entry)
        } else {
            tracing::debug!("Selection handle {} expired", handle);
            None
        }
    }

    pub async fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries
            .lock()
            .await
            .retain(|_, (created, _)| created.elapsed() < ttl);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}
