//! Remote access to the metadata corpus
//!
//! [`HttpMetadataSource`] fetches the index and class documents with plain GET
//! requests. It keeps no state besides the base address and the HTTP client;
//! caching decisions belong to the caller.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::cache::constants::{INDEX_FILE, META_DIR};
use crate::meta::types::{JavaClass, MetaIndex};

/// What went wrong while fetching a metadata document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataErrorKind {
    /// The server could not be reached or the response body could not be read
    Unreachable,
    /// The request could not be built, e.g. because of a malformed address
    Request,
    /// The server answered with a non-success status
    Status,
    /// The payload is not a valid metadata document
    Decode,
}

impl MetadataErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataErrorKind::Unreachable => "unreachable",
            MetadataErrorKind::Request => "request",
            MetadataErrorKind::Status => "status",
            MetadataErrorKind::Decode => "decode",
        }
    }
}

/// Failure to fetch a metadata document, tagged with its kind
#[derive(Debug, Clone, Error)]
#[error("{} ({url}): {message}", .kind.as_str())]
pub struct MetadataError {
    pub kind: MetadataErrorKind,
    pub url: String,
    pub message: String,
}

impl MetadataError {
    pub fn new(kind: MetadataErrorKind, url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn is_unreachable(&self) -> bool {
        self.kind == MetadataErrorKind::Unreachable
    }

    fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        let kind = if err.is_builder() {
            MetadataErrorKind::Request
        } else {
            MetadataErrorKind::Unreachable
        };
        Self::new(kind, url, err.to_string())
    }
}

/// Provider of the index and class documents
pub trait MetadataSource: Send + Sync {
    /// Fetch the corpus index
    fn fetch_index(&self) -> impl Future<Output = Result<MetaIndex, MetadataError>> + Send;

    /// Fetch the document of one class by binary name
    fn fetch_class(
        &self,
        binary_name: &str,
    ) -> impl Future<Output = Result<JavaClass, MetadataError>> + Send;
}

/// Metadata source backed by HTTP GET requests
#[derive(Debug, Clone)]
pub struct HttpMetadataSource {
    meta_url: String,
    client: reqwest::Client,
}

impl HttpMetadataSource {
    /// Create a source for the documentation rooted at `base_url`
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let client = Self::build_http_client(timeout)?;
        Ok(Self {
            meta_url: format!("{}{META_DIR}", normalize_base_url(base_url)),
            client,
        })
    }

    fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
        let user_agent = Self::format_user_agent();

        tracing::info!("Creating HTTP client with User-Agent: {}", user_agent);

        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().context("Failed to create HTTP client")
    }

    fn format_user_agent() -> String {
        format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    pub fn index_url(&self) -> String {
        format!("{}{INDEX_FILE}", self.meta_url)
    }

    pub fn class_url(&self, binary_name: &str) -> String {
        format!("{}{binary_name}", self.meta_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MetadataError> {
        tracing::debug!("Fetching metadata document {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MetadataError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::new(
                MetadataErrorKind::Status,
                url,
                format!(
                    "HTTP {} - {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown error")
                ),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| MetadataError::from_reqwest(url, e))?;

        serde_json::from_slice(&body)
            .map_err(|e| MetadataError::new(MetadataErrorKind::Decode, url, e.to_string()))
    }
}

impl MetadataSource for HttpMetadataSource {
    async fn fetch_index(&self) -> Result<MetaIndex, MetadataError> {
        self.get_json(&self.index_url()).await
    }

    async fn fetch_class(&self, binary_name: &str) -> Result<JavaClass, MetadataError> {
        self.get_json(&self.class_url(binary_name)).await
    }
}

/// Ensure the base address ends with a single slash
pub fn normalize_base_url(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("https://docs.example"), "https://docs.example/");
        assert_eq!(normalize_base_url("https://docs.example/"), "https://docs.example/");
    }

    #[test]
    fn test_document_urls() {
        let source = HttpMetadataSource::new("https://docs.example/api", None).unwrap();
        assert_eq!(source.index_url(), "https://docs.example/api/meta/index.json");
        assert_eq!(
            source.class_url("com/x/Bar$Inner"),
            "https://docs.example/api/meta/com/x/Bar$Inner"
        );
    }

    #[test]
    fn test_error_display_includes_kind() {
        let err = MetadataError::new(MetadataErrorKind::Decode, "http://x/meta/a", "bad json");
        assert_eq!(err.to_string(), "decode (http://x/meta/a): bad json");
        assert!(!err.is_unreachable());
    }
}
