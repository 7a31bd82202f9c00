use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::meta::{JavaClass, JavaConstructor, JavaField, JavaMethod};
use crate::search::config::MAX_LABEL_LENGTH;

/// A single match of a search
///
/// Member variants keep a shared reference to their declaring class, which is
/// owned by the metadata cache.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResultEntry {
    Class(Arc<JavaClass>),
    Constructor {
        cls: Arc<JavaClass>,
        data: JavaConstructor,
    },
    Field {
        cls: Arc<JavaClass>,
        data: JavaField,
    },
    Method {
        cls: Arc<JavaClass>,
        data: JavaMethod,
    },
}

impl SearchResultEntry {
    pub fn kind(&self) -> &'static str {
        match self {
            SearchResultEntry::Class(_) => "class",
            SearchResultEntry::Constructor { .. } => "constructor",
            SearchResultEntry::Field { .. } => "field",
            SearchResultEntry::Method { .. } => "method",
        }
    }

    /// The class this entry is or belongs to
    pub fn class(&self) -> &Arc<JavaClass> {
        match self {
            SearchResultEntry::Class(cls)
            | SearchResultEntry::Constructor { cls, .. }
            | SearchResultEntry::Field { cls, .. }
            | SearchResultEntry::Method { cls, .. } => cls,
        }
    }

    /// Identity of the underlying class, member and overload
    pub fn dedupe_key(&self) -> String {
        match self {
            SearchResultEntry::Class(cls) => cls.name.clone(),
            SearchResultEntry::Constructor { cls, data } => {
                format!("{}#new|{}", cls.name, data.type_id)
            }
            SearchResultEntry::Field { cls, data } => format!("{}#{}", cls.name, data.name),
            SearchResultEntry::Method { cls, data } => {
                format!("{}#{}|{}", cls.name, data.name, data.type_id)
            }
        }
    }

    /// Short human-readable name of the entry
    pub fn short_text(&self) -> String {
        match self {
            SearchResultEntry::Class(cls) => cls.source_name.clone(),
            SearchResultEntry::Constructor { cls, data } => {
                format!("{}#new{}", cls.simple_name, data.type_id)
            }
            SearchResultEntry::Field { cls, data } => format!("{}#{}", cls.simple_name, data.name),
            SearchResultEntry::Method { cls, data } => {
                format!("{}#{}{}", cls.simple_name, data.name, data.type_id)
            }
        }
    }

    /// [`short_text`](Self::short_text) cut down to [`MAX_LABEL_LENGTH`]
    ///
    /// Class names keep their tail, members keep their head.
    pub fn label(&self) -> String {
        let text = self.short_text();
        let len = text.chars().count();
        if len <= MAX_LABEL_LENGTH {
            return text;
        }
        let keep = MAX_LABEL_LENGTH - 4;
        match self {
            SearchResultEntry::Class(_) => {
                let tail: String = text.chars().skip(len - keep).collect();
                format!("... {tail}")
            }
            _ => {
                let head: String = text.chars().take(keep).collect();
                format!("{head} ...")
            }
        }
    }
}

/// Why a search produced no usable list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchFailure {
    NoResults,
    TooManyResults,
}

impl SearchFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchFailure::NoResults => "no_results",
            SearchFailure::TooManyResults => "too_many_results",
        }
    }
}

/// Outcome of a search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    /// Between one and [`MAX_RESULTS`](crate::search::config::MAX_RESULTS) entries
    Success(Vec<SearchResultEntry>),
    Failure(SearchFailure),
}

impl SearchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SearchResult::Success(_))
    }

    pub fn entries(&self) -> &[SearchResultEntry] {
        match self {
            SearchResult::Success(entries) => entries,
            SearchResult::Failure(_) => &[],
        }
    }

    pub fn failure(&self) -> Option<SearchFailure> {
        match self {
            SearchResult::Success(_) => None,
            SearchResult::Failure(failure) => Some(*failure),
        }
    }
}
