//! Query parsing
//!
//! A raw query is split into candidate `(class, member)` pairs that the match
//! engine tries in order. The rules only look at the shape of the query:
//!
//! - `#member` searches members of any class
//! - `Class#member` searches members of matching classes
//! - `pkg.Class` or `Class.member` is ambiguous and yields both readings
//! - a bare word is tried as a class name first, then as a member name

use serde::{Deserialize, Serialize};

/// One hypothesis of what a query refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePair {
    pub class_part: Option<String>,
    pub member_part: Option<String>,
}

impl CandidatePair {
    pub fn new(class_part: Option<&str>, member_part: Option<&str>) -> Self {
        Self {
            class_part: class_part.map(str::to_string),
            member_part: member_part.map(str::to_string),
        }
    }

    fn from_fragments(class_part: &str, member_part: &str) -> Self {
        Self {
            class_part: non_empty(normalize_class_fragment(class_part)),
            member_part: non_empty(member_part.to_string()),
        }
    }
}

/// Split `query` into the candidate pairs to try, in priority order
pub fn parse_query(query: &str) -> Vec<CandidatePair> {
    if let Some(member) = query.strip_prefix('#') {
        vec![CandidatePair::from_fragments("", member)]
    } else if let Some((class, member)) = query.split_once('#') {
        vec![CandidatePair::from_fragments(class, member)]
    } else if let Some((class, member)) = query.rsplit_once('.') {
        vec![
            CandidatePair::from_fragments(class, member),
            CandidatePair::from_fragments(query, ""),
        ]
    } else {
        vec![
            CandidatePair::from_fragments(query, ""),
            CandidatePair::from_fragments("", query),
        ]
    }
}

/// Nested classes are written with `$` in binary names but with `.` in
/// source names, which is what class fragments are matched against
fn normalize_class_fragment(fragment: &str) -> String {
    fragment.replace('$', ".")
}

fn non_empty(fragment: String) -> Option<String> {
    if fragment.is_empty() {
        None
    } else {
        Some(fragment)
    }
}
