//! Document outline data model.
//!
//! A parsed document is a forest of headed sections. Every section owns its
//! extracted content lines, an optional classification, and its ordered
//! subsections. Headings are unique within their parent and keep insertion
//! order, which is also the order they are rendered and exported in.

use crate::error::{Result, ViewerError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// File name offered for the exported outline.
pub const EXPORT_FILE_NAME: &str = "document-structure.json";

/// Classification of a section's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Table,
    Image,
}

impl ContentType {
    /// All content types in display order.
    pub const ALL: [ContentType; 3] = [ContentType::Text, ContentType::Table, ContentType::Image];

    /// Wire name (`"text"`, `"table"`, `"image"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Table => "table",
            ContentType::Image => "image",
        }
    }

    /// Human-readable label for selectors.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Text => "Text",
            ContentType::Table => "Table",
            ContentType::Image => "Image",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(ContentType::Text),
            "table" => Ok(ContentType::Table),
            "image" => Ok(ContentType::Image),
            other => Err(ViewerError::InvalidInput(format!("unknown content type '{other}'"))),
        }
    }
}

/// Ordered mapping from heading label to section.
pub type DocumentTree = IndexMap<String, DocumentNode>;

/// Heading labels from a root entry down to one section.
pub type NodePath = Vec<String>;

/// One section of the outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNode {
    /// Extracted content lines, in document order.
    #[serde(default)]
    pub content: Vec<String>,
    /// Classification; `None` marks a pure container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    /// Subsections keyed by heading.
    #[serde(default)]
    pub children: DocumentTree,
}

impl DocumentNode {
    /// Creates an empty section with the given classification.
    pub fn new(content_type: Option<ContentType>) -> Self {
        Self {
            content: Vec::new(),
            content_type,
            children: DocumentTree::new(),
        }
    }

    /// Appends content lines.
    pub fn with_content<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Adds (or replaces) a subsection.
    pub fn with_child(mut self, heading: impl Into<String>, child: DocumentNode) -> Self {
        self.children.insert(heading.into(), child);
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

/// Looks up a section by its heading path.
pub fn node_at<'a>(tree: &'a DocumentTree, path: &[String]) -> Option<&'a DocumentNode> {
    let (first, rest) = path.split_first()?;
    let mut node = tree.get(first)?;
    for heading in rest {
        node = node.children.get(heading)?;
    }
    Some(node)
}

/// Parses an outline from its JSON representation.
pub fn parse_tree(json: &str) -> Result<DocumentTree> {
    Ok(serde_json::from_str(json)?)
}

/// Serializes the full outline as pretty JSON with two-space indentation.
///
/// Key order follows the tree's insertion order and absent classifications
/// are omitted, so the output matches what a browser's
/// `JSON.stringify(tree, null, 2)` produces for the same structure.
pub fn export_json(tree: &DocumentTree) -> Result<String> {
    Ok(serde_json::to_string_pretty(tree)?)
}
