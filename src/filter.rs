//! Content-type filtering over the outline tree.
//!
//! A section is visible under a filter when its own classification matches,
//! or when any section beneath it matches. Visibility is decided at every
//! depth, so a matching parent still hides children whose subtrees hold
//! nothing of the selected type. Filtering never touches the source tree; it
//! always builds a reduced copy.

use crate::document::{ContentType, DocumentNode, DocumentTree};
use crate::error::{Result, ViewerError};
use std::fmt;
use std::str::FromStr;

/// Filter selection for the outline pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentFilter {
    /// Show every section.
    #[default]
    All,
    /// Show sections of one type and their ancestors.
    Only(ContentType),
}

impl ContentFilter {
    /// Choices in selector order.
    pub const CHOICES: [ContentFilter; 4] = [
        ContentFilter::All,
        ContentFilter::Only(ContentType::Text),
        ContentFilter::Only(ContentType::Table),
        ContentFilter::Only(ContentType::Image),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFilter::All => "all",
            ContentFilter::Only(ty) => ty.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentFilter::All => "All",
            ContentFilter::Only(ty) => ty.label(),
        }
    }

    /// Whether a section classified as `content_type` matches on its own.
    pub fn accepts(&self, content_type: Option<ContentType>) -> bool {
        match self {
            ContentFilter::All => true,
            ContentFilter::Only(ty) => content_type == Some(*ty),
        }
    }
}

impl fmt::Display for ContentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentFilter {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(ContentFilter::All),
            other => other.parse().map(ContentFilter::Only),
        }
    }
}

/// Returns true if `node` or any of its descendants matches `filter`.
pub fn node_matches(node: &DocumentNode, filter: ContentFilter) -> bool {
    filter.accepts(node.content_type)
        || node.children.values().any(|child| node_matches(child, filter))
}

/// Derives the visible outline for `filter`.
///
/// Every retained section keeps its content and classification; its children
/// are restricted by the same rule. `ContentFilter::All` returns an
/// identical copy.
pub fn filter_tree(tree: &DocumentTree, filter: ContentFilter) -> DocumentTree {
    if filter == ContentFilter::All {
        return tree.clone();
    }
    tree.iter()
        .filter_map(|(heading, node)| filter_node(node, filter).map(|kept| (heading.clone(), kept)))
        .collect()
}

// Children are reduced first, so a section survives iff it matches itself or
// at least one child survived.
fn filter_node(node: &DocumentNode, filter: ContentFilter) -> Option<DocumentNode> {
    let children = filter_tree(&node.children, filter);
    if !filter.accepts(node.content_type) && children.is_empty() {
        return None;
    }
    Some(DocumentNode {
        content: node.content.clone(),
        content_type: node.content_type,
        children,
    })
}

/// Total number of sections in a tree.
pub fn count_nodes(tree: &DocumentTree) -> usize {
    tree.values().map(|node| 1 + count_nodes(&node.children)).sum()
}

/// Number of sections that stay visible under `filter`.
pub fn count_matching(tree: &DocumentTree, filter: ContentFilter) -> usize {
    match filter {
        ContentFilter::All => count_nodes(tree),
        _ => count_nodes(&filter_tree(tree, filter)),
    }
}
