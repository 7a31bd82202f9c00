//! Wire types for the Javadoc metadata corpus
//!
//! These mirror the JSON documents served under `{base}/meta/`. Unknown fields
//! are ignored and missing lists decode as empty, so older or newer generators
//! of the metadata stay readable.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The corpus-wide index served as `meta/index.json`
///
/// Both maps keep the order of the document, which is the order searches
/// report their matches in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaIndex {
    /// Source-qualified class name to binary class name.
    ///
    /// A nested class may appear under several source aliases.
    #[serde(default)]
    pub classes: IndexMap<String, String>,
    /// Member name to the binary names of all classes declaring it
    #[serde(default)]
    pub members: IndexMap<String, Vec<String>>,
}

/// A reference to another type by its generic signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSignature {
    pub signature: String,
}

/// A reference to a type by its display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeName {
    pub name: String,
}

/// A block tag of a documentation comment, e.g. `@since` or `@throws`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocProperty {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cls: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Javadoc {
    /// Main description as HTML
    pub text: String,
    #[serde(default)]
    pub properties: Vec<DocProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JavaParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: TypeName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaField {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(rename = "type")]
    pub field_type: TypeName,
    /// Compile-time constant value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Javadoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaMethod {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Erased parameter signature, distinguishes overloads
    pub type_id: String,
    #[serde(default)]
    pub parameters: Vec<JavaParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeName>,
    #[serde(default)]
    pub throws: Vec<TypeName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Javadoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaConstructor {
    #[serde(default)]
    pub modifiers: Vec<String>,
    pub type_id: String,
    #[serde(default)]
    pub parameters: Vec<JavaParameter>,
    #[serde(default)]
    pub throws: Vec<TypeName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Javadoc>,
}

/// A class document served as `meta/{binary name}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaClass {
    /// Binary name, the cache key of this class
    pub name: String,
    pub source_name: String,
    pub simple_name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_class: Option<TypeSignature>,
    #[serde(default)]
    pub interfaces: Vec<TypeSignature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default)]
    pub fields: Vec<JavaField>,
    #[serde(default)]
    pub methods: Vec<JavaMethod>,
    #[serde(default)]
    pub constructors: Vec<JavaConstructor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Javadoc>,
}

impl JavaClass {
    /// The binary name with nested-class separators normalised to dots
    pub fn dotted_name(&self) -> String {
        self.name.replace('$', ".")
    }
}
