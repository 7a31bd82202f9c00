use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::meta::HttpMetadataSource;
use crate::search::JavadocSearch;
use crate::search::tools::{GetSearchResultParams, SearchJavadocParams, SearchTools};

#[derive(Debug, Clone)]
pub struct JavadocService {
    search_tools: SearchTools<HttpMetadataSource>,
    tool_router: ToolRouter<Self>,
}

impl JavadocService {
    /// Create a service serving the documentation rooted at `base_url`.
    /// Must be called inside a tokio runtime.
    pub fn new(
        base_url: &str,
        cache_interval: Duration,
        request_timeout: Option<Duration>,
    ) -> Result<Self> {
        let source = HttpMetadataSource::new(base_url, request_timeout)
            .with_context(|| format!("Failed to create metadata source for {base_url}"))?;
        let search = Arc::new(JavadocSearch::new(source, cache_interval));

        Ok(Self {
            search_tools: SearchTools::new(search, base_url),
            tool_router: Self::tool_router(),
        })
    }

    pub fn search_tools(&self) -> &SearchTools<HttpMetadataSource> {
        &self.search_tools
    }
}

#[tool_router]
impl JavadocService {
    #[tool(
        description = "Search the Java API documentation. Accepts a class name ('HashMap', 'java.util.HashMap'), a member ('#put', 'Map#put', 'List.size'), or a nested class ('Map$Entry'). A single match returns its full documentation. Up to five matches return labelled choices with handles; pass a handle to get_search_result. Fails with 'no_results' or 'too_many_results'; narrow a member query with the simple class name ('ArrayList#add' rather than '#add'). Package-qualified class names only work for class lookups, not before '#'."
    )]
    pub async fn search_javadoc(&self, params: Parameters<SearchJavadocParams>) -> String {
        self.search_tools.search_javadoc(params.0).await
    }

    #[tool(
        description = "Get the full documentation of one entry of a previous multi-match search_javadoc result. Each handle can be used once and expires after five minutes."
    )]
    pub async fn get_search_result(&self, params: Parameters<GetSearchResultParams>) -> String {
        self.search_tools.get_search_result(params.0).await
    }

    #[tool(
        description = "Show what the documentation metadata cache currently holds: whether the index is loaded, how many classes are cached or known unreachable, and the eviction interval."
    )]
    pub async fn get_cache_stats(&self) -> String {
        self.search_tools.get_cache_stats().await
    }

    #[tool(
        description = "Drop all cached documentation metadata so the next search refetches it. Use when the published documentation has changed."
    )]
    pub async fn clear_cache(&self) -> String {
        self.search_tools.clear_cache().await
    }
}

#[tool_handler]
impl ServerHandler for JavadocService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation::from_build_env(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "MCP server for looking up Java API documentation. Use search_javadoc with a class or member name; when a member search reports too_many_results, prefix the member with the simple class name (e.g. 'ArrayList#add' instead of '#add'). When several entries match, call get_search_result with one of the returned handles to read its documentation.".to_string(),
            ),
            ..Default::default()
        }
    }
}
