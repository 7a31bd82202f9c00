//! # Cache Module
//!
//! In-memory caching of the metadata corpus.
//!
//! ## Key Components
//!
//! - [`service`] - Cache for the index, class documents and unreachable classes
//!   with wholesale time-based eviction
//! - [`constants`] - Document locations and the default eviction interval

pub mod constants;
pub mod service;

pub use service::{CacheStats, ClassLookup, MetaCache};
