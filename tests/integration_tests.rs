//! Integration tests for javadoc-mcp over HTTP
//!
//! A local axum server publishes a small metadata corpus. The tests cover
//! failure classification of the HTTP source, caching across searches, and
//! the MCP tools end to end.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::json;

use javadoc_mcp::meta::{HttpMetadataSource, MetadataErrorKind, MetadataSource};
use javadoc_mcp::search::outputs::{CacheStatsOutput, SearchJavadocOutput};
use javadoc_mcp::search::tools::SearchJavadocParams;
use javadoc_mcp::search::{SearchFailure, SearchResultEntry};
use javadoc_mcp::{JavadocSearch, JavadocService};
use rmcp::handler::server::wrapper::Parameters;

/// Documentation server holding raw response bodies under `meta/`
#[derive(Default)]
struct DocServer {
    documents: HashMap<String, String>,
    hits: Mutex<HashMap<String, usize>>,
}

impl DocServer {
    fn new() -> Self {
        let mut documents = HashMap::new();
        documents.insert(
            "index.json".to_string(),
            json!({
                "classes": {
                    "com.x.Bar": "com/x/Bar",
                    "com.x.Broken": "com/x/Broken",
                    "java.util.Map": "java/util/Map"
                },
                "members": {"put": ["java/util/Map"], "get": ["java/util/Map"]}
            })
            .to_string(),
        );
        documents.insert(
            "com/x/Bar".to_string(),
            json!({"name": "com/x/Bar", "sourceName": "com.x.Bar", "simpleName": "Bar"})
                .to_string(),
        );
        documents.insert("com/x/Broken".to_string(), "<html>not json</html>".to_string());
        documents.insert(
            "java/util/Map".to_string(),
            json!({
                "name": "java/util/Map",
                "sourceName": "java.util.Map",
                "simpleName": "Map",
                "methods": [
                    {"name": "put", "typeId": "(java.lang.Object,java.lang.Object)"},
                    {"name": "get", "typeId": "(java.lang.Object)"}
                ]
            })
            .to_string(),
        );
        Self {
            documents,
            ..Default::default()
        }
    }

    fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

async fn meta(State(server): State<Arc<DocServer>>, Path(path): Path<String>) -> Response {
    let path = path.trim_start_matches('/').to_string();
    *server.hits.lock().unwrap().entry(path.clone()).or_default() += 1;

    match server.documents.get(&path) {
        Some(body) => ([(header::CONTENT_TYPE, "application/json")], body.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Serve `server` on a local port and return the documentation base url
async fn spawn(server: Arc<DocServer>) -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/docs/meta/*path", get(meta))
        .with_state(server);
    tokio::spawn(async move { axum::serve(listener, app).await });
    Ok(format!("http://{addr}/docs"))
}

#[tokio::test]
async fn test_fetches_index_and_class() -> Result<()> {
    let base_url = spawn(Arc::new(DocServer::new())).await?;
    let source = HttpMetadataSource::new(&base_url, Some(Duration::from_secs(5)))?;

    let index = source.fetch_index().await?;
    assert_eq!(index.classes.len(), 3);
    assert_eq!(index.members["put"], vec!["java/util/Map"]);

    let cls = source.fetch_class("com/x/Bar").await?;
    assert_eq!(cls.simple_name, "Bar");
    Ok(())
}

#[tokio::test]
async fn test_classifies_failures() -> Result<()> {
    let base_url = spawn(Arc::new(DocServer::new())).await?;
    let source = HttpMetadataSource::new(&base_url, None)?;

    let missing = source.fetch_class("com/x/Missing").await.unwrap_err();
    assert_eq!(missing.kind, MetadataErrorKind::Status);
    assert!(missing.message.contains("404"));

    let broken = source.fetch_class("com/x/Broken").await.unwrap_err();
    assert_eq!(broken.kind, MetadataErrorKind::Decode);
    Ok(())
}

#[tokio::test]
async fn test_connection_refused_is_unreachable() -> Result<()> {
    // Reserve a port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let source = HttpMetadataSource::new(&format!("http://{addr}/docs"), None)?;
    let err = source.fetch_index().await.unwrap_err();

    assert!(err.is_unreachable());
    assert!(err.url.ends_with("/docs/meta/index.json"));
    Ok(())
}

#[tokio::test]
async fn test_search_over_http_uses_cache() -> Result<()> {
    let server = Arc::new(DocServer::new());
    let base_url = spawn(server.clone()).await?;
    let source = HttpMetadataSource::new(&base_url, None)?;
    let search = JavadocSearch::new(source, Duration::from_secs(300));

    let result = search.search("Map#put").await;
    let [SearchResultEntry::Method { cls, data }] = result.entries() else {
        panic!("expected a single method, got {result:?}");
    };
    assert_eq!(cls.simple_name, "Map");
    assert_eq!(data.name, "put");

    assert!(search.search("Bar").await.is_success());
    assert!(search.search("java.util.Map").await.is_success());

    assert_eq!(server.hits("index.json"), 1);
    assert_eq!(server.hits("java/util/Map"), 1);
    assert_eq!(server.hits("com/x/Bar"), 1);
    Ok(())
}

#[tokio::test]
async fn test_undecodable_class_is_refetched() -> Result<()> {
    let server = Arc::new(DocServer::new());
    let base_url = spawn(server.clone()).await?;
    let source = HttpMetadataSource::new(&base_url, None)?;
    let search = JavadocSearch::new(source, Duration::from_secs(300));

    for _ in 0..2 {
        assert_eq!(
            search.search("Broken").await.failure(),
            Some(SearchFailure::NoResults)
        );
    }

    assert_eq!(server.hits("com/x/Broken"), 2);
    assert_eq!(search.cache().stats().await.unreachable_classes, 0);
    Ok(())
}

#[tokio::test]
async fn test_service_tools_end_to_end() -> Result<()> {
    let server = Arc::new(DocServer::new());
    let base_url = spawn(server.clone()).await?;
    let service = JavadocService::new(&base_url, Duration::from_secs(300), None)?;

    let json = service
        .search_javadoc(Parameters(SearchJavadocParams {
            query: "Map#get".to_string(),
        }))
        .await;
    let output: SearchJavadocOutput = serde_json::from_str(&json)?;

    assert!(output.success);
    let details = output.details.expect("single match carries details");
    assert_eq!(details.title, "Method Map#get");
    assert_eq!(details.label, "Map#get(java.lang.Object)");
    assert_eq!(details.link, format!("{base_url}/java/util/Map"));

    let stats: CacheStatsOutput = serde_json::from_str(&service.get_cache_stats().await)?;
    assert!(stats.stats.index_cached);
    assert_eq!(stats.stats.cached_classes, 1);

    let cleared: CacheStatsOutput = serde_json::from_str(&service.clear_cache().await)?;
    assert!(!cleared.stats.index_cached);

    service
        .search_javadoc(Parameters(SearchJavadocParams {
            query: "Bar".to_string(),
        }))
        .await;
    assert_eq!(server.hits("index.json"), 2);
    Ok(())
}
