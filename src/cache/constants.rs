//! Constants for the metadata cache and document locations

use std::time::Duration;

/// Directory under the documentation root holding the metadata documents
pub const META_DIR: &str = "meta/";

/// Index document name inside [`META_DIR`]
pub const INDEX_FILE: &str = "index.json";

/// Interval after which the whole cache is cleared
pub const DEFAULT_EVICTION_INTERVAL: Duration = Duration::from_secs(5 * 60);
