use std::sync::Arc;

use anyhow::Result;
use rmcp::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::meta::MetadataSource;
use crate::meta::source::normalize_base_url;
use crate::search::config::MAX_QUERY_LENGTH;
use crate::search::outputs::{
    CacheStatsOutput, EntryDetails, GetSearchResultOutput, SearchChoice, SearchErrorOutput,
    SearchJavadocOutput,
};
use crate::search::result::SearchResult;
use crate::search::selection::SelectionCache;
use crate::search::service::JavadocSearch;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchJavadocParams {
    #[schemars(
        description = "Class and/or member to look up, e.g. 'HashMap', 'Map#put', 'List.size', '#MAX_VALUE' or 'Map$Entry'"
    )]
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetSearchResultParams {
    #[schemars(description = "Handle of one of the results of a previous search_javadoc call")]
    pub handle: u64,
}

#[derive(Debug)]
pub struct SearchTools<S> {
    search: Arc<JavadocSearch<S>>,
    selections: Arc<SelectionCache>,
    base_url: String,
}

impl<S> Clone for SearchTools<S> {
    fn clone(&self) -> Self {
        Self {
            search: self.search.clone(),
            selections: self.selections.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

impl<S: MetadataSource> SearchTools<S> {
    pub fn new(search: Arc<JavadocSearch<S>>, base_url: &str) -> Self {
        Self {
            search,
            selections: Arc::new(SelectionCache::default()),
            base_url: normalize_base_url(base_url),
        }
    }

    /// Search the documentation
    ///
    /// A single match is returned with its full details. Several matches are
    /// returned as labelled choices, each redeemable through
    /// [`get_search_result`](Self::get_search_result).
    pub async fn search_javadoc(&self, params: SearchJavadocParams) -> String {
        match self.search_javadoc_inner(&params.query).await {
            Ok(output) => output.to_json(),
            Err(e) => SearchErrorOutput::new(format!("Search failed: {e}")).to_json(),
        }
    }

    async fn search_javadoc_inner(&self, query: &str) -> Result<SearchJavadocOutput> {
        if query.chars().count() > MAX_QUERY_LENGTH {
            return Err(anyhow::anyhow!(
                "Query must not exceed {MAX_QUERY_LENGTH} characters"
            ));
        }

        let mut output = SearchJavadocOutput {
            query: query.to_string(),
            success: false,
            failure: None,
            results: Vec::new(),
            details: None,
        };

        match self.search.search(query).await {
            SearchResult::Failure(failure) => output.failure = Some(failure),
            SearchResult::Success(mut entries) if entries.len() == 1 => {
                let entry = entries.remove(0);
                output.success = true;
                output.results.push(SearchChoice {
                    handle: None,
                    kind: entry.kind().to_string(),
                    label: entry.label(),
                });
                output.details = Some(EntryDetails::from_entry(&entry, &self.base_url));
            }
            SearchResult::Success(entries) => {
                output.success = true;
                for entry in entries {
                    let kind = entry.kind().to_string();
                    let label = entry.label();
                    let handle = self.selections.insert(entry).await;
                    output.results.push(SearchChoice {
                        handle: Some(handle),
                        kind,
                        label,
                    });
                }
            }
        }
        Ok(output)
    }

    /// Redeem a handle from a multi-match search
    pub async fn get_search_result(&self, params: GetSearchResultParams) -> String {
        match self.selections.take(params.handle).await {
            Some(entry) => GetSearchResultOutput {
                handle: params.handle,
                details: EntryDetails::from_entry(&entry, &self.base_url),
            }
            .to_json(),
            None => SearchErrorOutput::new(format!(
                "Unknown or expired search result handle: {}",
                params.handle
            ))
            .to_json(),
        }
    }

    pub async fn get_cache_stats(&self) -> String {
        self.stats_output().await.to_json()
    }

    /// Drop all cached metadata, as a scheduled eviction would
    pub async fn clear_cache(&self) -> String {
        self.search.cache().evict_all().await;
        self.selections.purge_expired().await;
        self.stats_output().await.to_json()
    }

    async fn stats_output(&self) -> CacheStatsOutput {
        CacheStatsOutput {
            stats: self.search.cache().stats().await,
            eviction_interval_secs: self.search.cache().interval().as_secs(),
            pending_selections: self.selections.len().await,
        }
    }
}
