use std::sync::Arc;
use std::time::Duration;

use crate::cache::MetaCache;
use crate::meta::{JavaClass, MetadataSource};
use crate::search::engine::{ClassResolver, MatchEngine, MatchOutcome};
use crate::search::query::parse_query;
use crate::search::result::{SearchFailure, SearchResult};

/// Documentation search over a metadata source fronted by a [`MetaCache`]
#[derive(Debug)]
pub struct JavadocSearch<S> {
    source: S,
    cache: MetaCache,
}

/// Resolves classes through the cache, fetching from the source on a miss
struct CachedResolver<'a, S> {
    source: &'a S,
    cache: &'a MetaCache,
}

impl<S: MetadataSource> ClassResolver for CachedResolver<'_, S> {
    async fn resolve(&self, binary_name: &str) -> Option<Arc<JavaClass>> {
        self.cache
            .class_or_fetch(binary_name, || self.source.fetch_class(binary_name))
            .await
    }
}

impl<S: MetadataSource> JavadocSearch<S> {
    /// Create a search whose cache is cleared every `eviction_interval`.
    /// Must be called inside a tokio runtime.
    pub fn new(source: S, eviction_interval: Duration) -> Self {
        Self {
            source,
            cache: MetaCache::new(eviction_interval),
        }
    }

    pub fn cache(&self) -> &MetaCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve `query` into at most [`MAX_RESULTS`] entries
    ///
    /// An unavailable index is reported as [`SearchFailure::NoResults`].
    ///
    /// [`MAX_RESULTS`]: crate::search::config::MAX_RESULTS
    pub async fn search(&self, query: &str) -> SearchResult {
        let candidates = parse_query(query);

        let Some(index) = self
            .cache
            .index_or_fetch(|| self.source.fetch_index())
            .await
        else {
            tracing::info!("Search for {:?}: index unavailable", query);
            return SearchResult::Failure(SearchFailure::NoResults);
        };

        let resolver = CachedResolver {
            source: &self.source,
            cache: &self.cache,
        };
        let result = match MatchEngine::new(&index, &resolver).run(&candidates).await {
            MatchOutcome::TooMany => SearchResult::Failure(SearchFailure::TooManyResults),
            MatchOutcome::Matches(entries) if entries.is_empty() => {
                SearchResult::Failure(SearchFailure::NoResults)
            }
            MatchOutcome::Matches(entries) => SearchResult::Success(entries),
        };

        match &result {
            SearchResult::Success(entries) => {
                tracing::info!("Search for {:?}: {} results", query, entries.len())
            }
            SearchResult::Failure(failure) => {
                tracing::info!("Search for {:?}: {}", query, failure.as_str())
            }
        }
        result
    }
}
