//! Output types for search tools
//!
//! These types are used as the return values from search tool methods.
//! They are serialized to JSON strings for the MCP protocol, and can be
//! deserialized in tests for type-safe validation.

use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::meta::types::{JavaParameter, Javadoc, TypeName};
use crate::search::result::{SearchFailure, SearchResultEntry};

/// One entry of a multi-match result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchChoice {
    /// Handle to pass to `get_search_result`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<u64>,
    pub kind: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterDetails {
    pub name: String,
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl From<&JavaParameter> for ParameterDetails {
    fn from(param: &JavaParameter) -> Self {
        Self {
            name: param.name.clone(),
            type_name: param.param_type.name.clone(),
            doc: param.doc.as_deref().map(to_markdown),
        }
    }
}

/// A block tag of the documentation, e.g. `throws: IOException`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocTagDetails {
    pub name: String,
    pub text: String,
}

/// Everything known about a single result entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryDetails {
    pub kind: String,
    pub title: String,
    pub label: String,
    /// Source name of the class the entry is or belongs to
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub modifiers: Vec<String>,
    /// Field type, or the erased signature of a method or constructor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDetails>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub throws: Vec<String>,
    /// Documentation text as Markdown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub doc_tags: Vec<DocTagDetails>,
    /// Link to the rendered documentation page of the class
    pub link: String,
}

impl EntryDetails {
    /// Build the details of `entry`, linking into the docs at `base_url`
    pub fn from_entry(entry: &SearchResultEntry, base_url: &str) -> Self {
        let cls = entry.class();
        let mut details = Self {
            kind: entry.kind().to_string(),
            title: String::new(),
            label: entry.label(),
            class_name: cls.source_name.clone(),
            name: None,
            modifiers: Vec::new(),
            type_info: None,
            return_type: None,
            constant: None,
            extends: None,
            implements: Vec::new(),
            enum_values: Vec::new(),
            parameters: Vec::new(),
            throws: Vec::new(),
            doc: None,
            doc_tags: Vec::new(),
            link: format!("{base_url}{}", cls.dotted_name()),
        };

        let doc = match entry {
            SearchResultEntry::Class(cls) => {
                details.title = format!("Class {}", cls.simple_name);
                details.name = Some(cls.source_name.clone());
                details.modifiers = cls.modifiers.clone();
                details.extends = cls.super_class.as_ref().map(|s| s.signature.clone());
                details.implements = cls.interfaces.iter().map(|i| i.signature.clone()).collect();
                details.enum_values = cls.enum_values.clone().unwrap_or_default();
                cls.doc.as_ref()
            }
            SearchResultEntry::Constructor { cls, data } => {
                details.title = format!("Constructor {}", cls.simple_name);
                details.modifiers = data.modifiers.clone();
                details.type_info = Some(data.type_id.clone());
                details.parameters = data.parameters.iter().map(ParameterDetails::from).collect();
                details.throws = type_names(&data.throws);
                data.doc.as_ref()
            }
            SearchResultEntry::Field { cls, data } => {
                details.title = format!("Field {}#{}", cls.simple_name, data.name);
                details.name = Some(data.name.clone());
                details.modifiers = data.modifiers.clone();
                details.type_info = Some(data.field_type.name.clone());
                details.constant = data.constant.clone();
                data.doc.as_ref()
            }
            SearchResultEntry::Method { cls, data } => {
                details.title = format!("Method {}#{}", cls.simple_name, data.name);
                details.name = Some(data.name.clone());
                details.modifiers = data.modifiers.clone();
                details.type_info = Some(data.type_id.clone());
                details.return_type = data.return_type.as_ref().map(|t| t.name.clone());
                details.parameters = data.parameters.iter().map(ParameterDetails::from).collect();
                details.throws = type_names(&data.throws);
                data.doc.as_ref()
            }
        };

        if let Some(doc) = doc {
            details.doc = Some(to_markdown(&doc.text));
            details.doc_tags = doc_tags(doc);
        }
        details
    }
}

fn type_names(types: &[TypeName]) -> Vec<String> {
    types.iter().map(|t| t.name.clone()).collect()
}

fn doc_tags(doc: &Javadoc) -> Vec<DocTagDetails> {
    doc.properties
        .iter()
        .map(|property| DocTagDetails {
            name: match &property.cls {
                Some(cls) => format!("{}: {}", property.kind, cls),
                None => property.kind.clone(),
            },
            text: to_markdown(&property.text),
        })
        .collect()
}

/// Render a Javadoc HTML fragment as Markdown
fn to_markdown(html: &str) -> String {
    html2md::parse_html(html).trim().to_string()
}

/// Output from search_javadoc operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchJavadocOutput {
    pub query: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<SearchFailure>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<SearchChoice>,
    /// Full details when the search matched exactly one entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<EntryDetails>,
}

impl SearchJavadocOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }

    /// Check if there are any results
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}

/// Output from get_search_result operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GetSearchResultOutput {
    pub handle: u64,
    pub details: EntryDetails,
}

impl GetSearchResultOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Output from get_cache_stats and clear_cache operations
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CacheStatsOutput {
    #[serde(flatten)]
    pub stats: CacheStats,
    pub eviction_interval_secs: u64,
    pub pending_selections: usize,
}

impl CacheStatsOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Error output for search tools
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchErrorOutput {
    pub error: String,
}

impl SearchErrorOutput {
    /// Create a new error output
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize error"}"#.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::JavaClass;
    use serde_json::json;
    use std::sync::Arc;

    fn class() -> Arc<JavaClass> {
        Arc::new(
            serde_json::from_value(json!({
                "name": "java/util/Map$Entry",
                "sourceName": "java.util.Map.Entry",
                "simpleName": "Entry",
                "modifiers": ["public", "static", "interface"],
                "interfaces": [{"signature": "java.io.Serializable"}],
                "doc": {"text": "<p>A map entry.</p>", "properties": [
                    {"type": "since", "text": "1.2"}
                ]}
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_class_details() {
        let details = EntryDetails::from_entry(&SearchResultEntry::Class(class()), "https://docs/");

        assert_eq!(details.title, "Class Entry");
        assert_eq!(details.kind, "class");
        assert_eq!(details.implements, vec!["java.io.Serializable"]);
        assert_eq!(details.doc.as_deref(), Some("A map entry."));
        assert_eq!(details.doc_tags[0].name, "since");
        assert_eq!(details.link, "https://docs/java/util/Map.Entry");
    }

    #[test]
    fn test_method_details() {
        let method = serde_json::from_value(json!({
            "name": "setValue",
            "modifiers": ["public", "abstract"],
            "typeId": "(V)",
            "returnType": {"name": "V"},
            "parameters": [{"name": "value", "type": {"name": "V"}, "doc": "new value"}],
            "throws": [{"name": "UnsupportedOperationException"}],
            "doc": {"text": "Replaces the value.", "properties": [
                {"type": "throws", "text": "if unsupported", "cls": "UnsupportedOperationException"}
            ]}
        }))
        .unwrap();
        let entry = SearchResultEntry::Method { cls: class(), data: method };

        let details = EntryDetails::from_entry(&entry, "https://docs/");

        assert_eq!(details.title, "Method Entry#setValue");
        assert_eq!(details.label, "Entry#setValue(V)");
        assert_eq!(details.return_type.as_deref(), Some("V"));
        assert_eq!(details.parameters[0].type_name, "V");
        assert_eq!(details.throws, vec!["UnsupportedOperationException"]);
        assert_eq!(details.doc_tags[0].name, "throws: UnsupportedOperationException");
    }

    #[test]
    fn test_doc_html_is_rendered_as_markdown() {
        let field = serde_json::from_value(json!({
            "name": "EMPTY",
            "type": {"name": "Map"},
            "doc": {"text": "<p>Use <code>put</code> to <b>add</b> entries.</p>", "properties": [
                {"type": "see", "text": "<code>Map#put</code>"}
            ]}
        }))
        .unwrap();
        let entry = SearchResultEntry::Field { cls: class(), data: field };

        let details = EntryDetails::from_entry(&entry, "https://docs/");

        let doc = details.doc.unwrap();
        assert!(!doc.contains("<p>"));
        assert!(doc.contains("`put`"));
        assert!(doc.contains("**add**"));
        assert!(details.doc_tags[0].text.starts_with('`'));
        assert!(!details.doc_tags[0].text.contains("<code>"));
    }

    #[test]
    fn test_failed_search_output_omits_results() {
        let output = SearchJavadocOutput {
            query: "Nothing".to_string(),
            success: false,
            failure: Some(SearchFailure::NoResults),
            results: Vec::new(),
            details: None,
        };

        assert!(!output.has_results());
        let value: serde_json::Value = serde_json::from_str(&output.to_json()).unwrap();
        assert_eq!(
            value,
            json!({"query": "Nothing", "success": false, "failure": "no_results"})
        );
    }

    #[test]
    fn test_search_error_output() {
        let output = SearchErrorOutput::new("Search failed");
        let json = output.to_json();
        let deserialized: SearchErrorOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(output, deserialized);
    }
}
