//! # Search Configuration Module
//!
//! Limits applied to searches and to the selection handles handed out for
//! multi-match results.

use std::time::Duration;

/// Largest number of entries a successful search returns.
/// One more and the search fails with `too_many_results`.
pub const MAX_RESULTS: usize = 5;

/// Maximum length of an entry label in characters
pub const MAX_LABEL_LENGTH: usize = 80;

/// How long a selection handle stays valid
pub const SELECTION_TTL: Duration = Duration::from_secs(5 * 60);

/// Maximum allowed query length in characters
pub const MAX_QUERY_LENGTH: usize = 1000;
