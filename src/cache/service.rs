use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::meta::{JavaClass, MetaIndex, MetadataError};

/// Everything the cache holds. Cleared as a whole, never piecemeal.
#[derive(Debug, Default)]
struct CacheState {
    index: Option<Arc<MetaIndex>>,
    classes: HashMap<String, Arc<JavaClass>>,
    unreachable: HashSet<String>,
    evictions: u64,
}

impl CacheState {
    fn clear(&mut self) {
        self.index = None;
        self.classes.clear();
        self.unreachable.clear();
        self.evictions += 1;
    }
}

/// Observed state of one class in the cache
#[derive(Debug, Clone)]
pub enum ClassLookup {
    /// Never looked up since the last eviction
    Absent,
    /// Metadata is cached
    Present(Arc<JavaClass>),
    /// A fetch failed at transport level; do not retry until eviction
    Negative,
}

/// Snapshot of the cache contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub index_cached: bool,
    pub cached_classes: usize,
    pub unreachable_classes: usize,
    pub evictions: u64,
}

/// In-memory cache for the metadata index and class documents
///
/// The index, the class documents and the set of unreachable class names
/// share one eviction clock: a background task clears all three together
/// every `interval`. Values already handed out stay valid after an eviction.
///
/// Must be created inside a tokio runtime. The eviction task ends when the
/// cache is dropped.
#[derive(Debug)]
pub struct MetaCache {
    state: Arc<RwLock<CacheState>>,
    interval: Duration,
    evictor: JoinHandle<()>,
}

impl MetaCache {
    /// Create an empty cache cleared every `interval`
    pub fn new(interval: Duration) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        let state = Arc::new(RwLock::new(CacheState::default()));
        let evictor = Self::spawn_evictor(Arc::downgrade(&state), interval);

        tracing::info!(
            "Metadata cache created with eviction interval of {}s",
            interval.as_secs()
        );

        Self {
            state,
            interval,
            evictor,
        }
    }

    fn spawn_evictor(state: Weak<RwLock<CacheState>>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(state) = state.upgrade() else {
                    break;
                };
                state.write().await.clear();
                tracing::debug!("Evicted metadata cache");
            }
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Return the cached index, fetching it with `fetch` on a miss
    ///
    /// A failed fetch is logged and reported as `None`; nothing is cached, so
    /// the next call tries again.
    pub async fn index_or_fetch<F, Fut>(&self, fetch: F) -> Option<Arc<MetaIndex>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<MetaIndex, MetadataError>>,
    {
        let cached = self.state.read().await.index.clone();
        if let Some(index) = cached {
            tracing::debug!("Metadata index served from cache");
            return Some(index);
        }

        match fetch().await {
            Ok(index) => {
                let index = Arc::new(index);
                self.state.write().await.index = Some(index.clone());
                tracing::info!(
                    "Fetched metadata index with {} classes and {} members",
                    index.classes.len(),
                    index.members.len()
                );
                Some(index)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch metadata index: {}", e);
                None
            }
        }
    }

    /// Return a cached class, fetching it with `fetch` on a miss
    ///
    /// Classes whose fetch failed with [`MetadataErrorKind::Unreachable`] are
    /// remembered and skipped until the next eviction. Any other failure is
    /// not remembered and the class is fetched again on the next lookup.
    ///
    /// [`MetadataErrorKind::Unreachable`]: crate::meta::MetadataErrorKind::Unreachable
    pub async fn class_or_fetch<F, Fut>(&self, binary_name: &str, fetch: F) -> Option<Arc<JavaClass>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<JavaClass, MetadataError>>,
    {
        match self.lookup_class(binary_name).await {
            ClassLookup::Present(class) => return Some(class),
            ClassLookup::Negative => {
                tracing::debug!("Skipping unreachable class {}", binary_name);
                return None;
            }
            ClassLookup::Absent => {}
        }

        match fetch().await {
            Ok(class) => {
                let class = Arc::new(class);
                self.state
                    .write()
                    .await
                    .classes
                    .insert(binary_name.to_string(), class.clone());
                Some(class)
            }
            Err(e) if e.is_unreachable() => {
                tracing::warn!("Class {} is unreachable: {}", binary_name, e);
                self.mark_unreachable(binary_name).await;
                None
            }
            Err(e) => {
                tracing::warn!("Failed to load class {}: {}", binary_name, e);
                None
            }
        }
    }

    /// Look up a class without fetching
    pub async fn lookup_class(&self, binary_name: &str) -> ClassLookup {
        let state = self.state.read().await;
        if let Some(class) = state.classes.get(binary_name) {
            ClassLookup::Present(class.clone())
        } else if state.unreachable.contains(binary_name) {
            ClassLookup::Negative
        } else {
            ClassLookup::Absent
        }
    }

    pub async fn is_unreachable(&self, binary_name: &str) -> bool {
        self.state.read().await.unreachable.contains(binary_name)
    }

    pub async fn mark_unreachable(&self, binary_name: &str) {
        self.state
            .write()
            .await
            .unreachable
            .insert(binary_name.to_string());
    }

    /// Clear the index, the classes and the unreachable set right away
    pub async fn evict_all(&self) {
        self.state.write().await.clear();
        tracing::info!("Metadata cache cleared on request");
    }

    pub async fn stats(&self) -> CacheStats {
        let state = self.state.read().await;
        CacheStats {
            index_cached: state.index.is_some(),
            cached_classes: state.classes.len(),
            unreachable_classes: state.unreachable.len(),
            evictions: state.evictions,
        }
    }
}

impl Drop for MetaCache {
    fn drop(&mut self) {
        self.evictor.abort();
    }
}
