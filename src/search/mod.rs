//! # Search Module
//!
//! Resolves free-form Javadoc queries such as `HashMap`, `Map#put`,
//! `List.size` or `#MAX_VALUE` against the metadata index.
//!
//! ## Key Components
//!
//! - [`query`] - Splits a query into candidate class/member pairs
//! - [`engine`] - Matches candidates against the index and class documents
//! - [`result`] - Result entries, labels and failure kinds
//! - [`service`] - Ties parsing, caching and matching together
//! - [`selection`] - Handles for redeeming one entry of a multi-match result
//! - [`tools`] - MCP tool implementations for search operations
//! - [`config`] - Limits for results, labels and queries

pub mod config;
pub mod engine;
pub mod outputs;
pub mod query;
pub mod result;
pub mod selection;
pub mod service;
pub mod tools;

pub use engine::{ClassResolver, MatchEngine, MatchOutcome};
pub use query::{CandidatePair, parse_query};
pub use result::{SearchFailure, SearchResult, SearchResultEntry};
pub use selection::SelectionCache;
pub use service::JavadocSearch;
pub use tools::SearchTools;
