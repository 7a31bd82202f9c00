//! Match scanning over the metadata index
//!
//! The engine walks the candidate pairs produced by the query parser, scans
//! the index for matching classes and members, and resolves class documents
//! through an injected [`ClassResolver`]. It performs no I/O itself.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use crate::meta::{JavaClass, MetaIndex};
use crate::search::config::MAX_RESULTS;
use crate::search::query::CandidatePair;
use crate::search::result::SearchResultEntry;

/// Member fragment that selects constructors
pub const CONSTRUCTOR_TOKEN: &str = "new";

/// Resolves a binary class name to its metadata
pub trait ClassResolver: Send + Sync {
    /// `None` when the class is unavailable for any reason
    fn resolve(&self, binary_name: &str) -> impl Future<Output = Option<Arc<JavaClass>>> + Send;
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// At most [`MAX_RESULTS`] entries, possibly none
    Matches(Vec<SearchResultEntry>),
    /// More than [`MAX_RESULTS`] entries were found; scanning stopped early
    TooMany,
}

/// State of one search over one index snapshot
pub struct MatchEngine<'a, R> {
    index: &'a MetaIndex,
    resolver: &'a R,
    results: Vec<SearchResultEntry>,
    /// Dedupe keys of the entries in `results`
    seen: HashSet<String>,
    /// Class and class/member lookups already performed
    visited: HashSet<String>,
}

impl<'a, R: ClassResolver> MatchEngine<'a, R> {
    pub fn new(index: &'a MetaIndex, resolver: &'a R) -> Self {
        Self {
            index,
            resolver,
            results: Vec::new(),
            seen: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    /// Try every candidate in order and collect the matches
    pub async fn run(mut self, candidates: &[CandidatePair]) -> MatchOutcome {
        for candidate in candidates {
            self.scan(candidate).await;
            if self.too_many() {
                tracing::debug!(
                    "Search exceeded {} results, stopping at candidate {:?}",
                    MAX_RESULTS,
                    candidate
                );
                return MatchOutcome::TooMany;
            }
        }
        MatchOutcome::Matches(self.results)
    }

    fn too_many(&self) -> bool {
        self.results.len() > MAX_RESULTS
    }

    async fn scan(&mut self, candidate: &CandidatePair) {
        let class_part = candidate.class_part.as_deref();
        let member_part = candidate.member_part.as_deref();

        match member_part {
            Some(member) if member != CONSTRUCTOR_TOKEN => {
                self.scan_members(class_part, member).await
            }
            _ if class_part.is_some() || member_part.is_some() => {
                self.scan_classes(class_part, member_part).await
            }
            _ => {}
        }
    }

    /// Member names containing `member`, restricted to classes whose name
    /// contains `class_part`
    async fn scan_members(&mut self, class_part: Option<&str>, member: &str) {
        let index = self.index;
        let owners = index
            .members
            .iter()
            .filter(|(name, _)| name.contains(member))
            .flat_map(|(_, classes)| classes);

        for binary_name in owners {
            if class_part.is_none_or(|class| binary_name.replace('$', ".").contains(class)) {
                self.add(binary_name, Some(member)).await;
            }
        }
    }

    /// Classes matching `class_part` by qualified or simple name. Substring
    /// matches are only considered when there is no such exact match.
    async fn scan_classes(&mut self, class_part: Option<&str>, member: Option<&str>) {
        let index = self.index;

        let exact: Vec<&String> = match class_part {
            Some(class) => index
                .classes
                .iter()
                .filter(|(source_name, _)| is_exact_class_match(source_name, class))
                .map(|(_, binary_name)| binary_name)
                .collect(),
            None => Vec::new(),
        };

        let matches = if exact.is_empty() {
            index
                .classes
                .iter()
                .filter(|(source_name, _)| class_part.is_none_or(|class| source_name.contains(class)))
                .map(|(_, binary_name)| binary_name)
                .collect()
        } else {
            exact
        };

        for binary_name in matches {
            self.add(binary_name, member).await;
        }
    }

    /// Resolve a class and add it, or its members matching `member`
    async fn add(&mut self, binary_name: &str, member: Option<&str>) {
        if self.too_many() {
            return;
        }

        let visit_key = match member {
            Some(member) => format!("{binary_name}##{member}"),
            None => binary_name.to_string(),
        };
        if !self.visited.insert(visit_key) {
            return;
        }

        let Some(cls) = self.resolver.resolve(binary_name).await else {
            return;
        };

        match member {
            None => self.push(SearchResultEntry::Class(cls)),
            Some(member) => {
                if !self.add_members(&cls, member, true) {
                    self.add_members(&cls, member, false);
                }
            }
        }
    }

    /// Add the fields and methods of `cls` named `member` (or containing it
    /// when not `exact`). Returns whether anything matched.
    fn add_members(&mut self, cls: &Arc<JavaClass>, member: &str, exact: bool) -> bool {
        let mut matched = false;

        if member == CONSTRUCTOR_TOKEN && !cls.constructors.is_empty() {
            matched = true;
            for ctor in &cls.constructors {
                self.push(SearchResultEntry::Constructor {
                    cls: cls.clone(),
                    data: ctor.clone(),
                });
            }
        }

        let is_match = |name: &str| {
            if exact {
                name == member
            } else {
                name.contains(member)
            }
        };

        for field in cls.fields.iter().filter(|f| is_match(&f.name)) {
            matched = true;
            self.push(SearchResultEntry::Field {
                cls: cls.clone(),
                data: field.clone(),
            });
        }

        for method in cls.methods.iter().filter(|m| is_match(&m.name)) {
            matched = true;
            self.push(SearchResultEntry::Method {
                cls: cls.clone(),
                data: method.clone(),
            });
        }

        matched
    }

    fn push(&mut self, entry: SearchResultEntry) {
        if self.seen.insert(entry.dedupe_key()) {
            self.results.push(entry);
        }
    }
}

/// `class` names the class itself or is its unqualified suffix
fn is_exact_class_match(source_name: &str, class: &str) -> bool {
    source_name == class
        || source_name
            .strip_suffix(class)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
