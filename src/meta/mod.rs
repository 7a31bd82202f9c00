//! # Meta Module
//!
//! Types and remote access for the Javadoc metadata corpus.
//!
//! - [`types`] - JSON document types (index, classes, members)
//! - [`source`] - HTTP source for the index and class documents

pub mod source;
pub mod types;

pub use source::{HttpMetadataSource, MetadataError, MetadataErrorKind, MetadataSource};
pub use types::{JavaClass, JavaConstructor, JavaField, JavaMethod, MetaIndex};
