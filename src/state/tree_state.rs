//! Outline expansion state management.
//!
//! Sections are keyed by their heading path from the root, so expansion
//! survives filter changes: a section hidden by the filter and shown again
//! keeps its open/closed state.

use outline_viewer::{DocumentTree, NodePath};
use std::collections::HashSet;

/// State related to outline section expansion.
///
/// Responsibilities:
/// - Tracking which sections are expanded
/// - Bulk expand/collapse
#[derive(Debug, Clone, Default)]
pub struct TreeState {
    /// Heading paths of expanded sections
    expanded: HashSet<NodePath>,
}

impl TreeState {
    /// Creates a new tree state with every section collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapses every section.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    pub fn is_expanded(&self, path: &[String]) -> bool {
        self.expanded.contains(path)
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Expands the given section.
    ///
    /// # Returns
    /// `true` if the section was newly expanded.
    pub fn expand(&mut self, path: NodePath) -> bool {
        self.expanded.insert(path)
    }

    /// Collapses the given section.
    ///
    /// # Returns
    /// `true` if the section was expanded and is now collapsed.
    pub fn collapse(&mut self, path: &[String]) -> bool {
        self.expanded.remove(path)
    }

    /// Expands every section of `tree` that has something to show.
    pub fn expand_all(&mut self, tree: &DocumentTree) {
        let mut path = Vec::new();
        self.expand_recursive(tree, &mut path);
    }

    fn expand_recursive(&mut self, tree: &DocumentTree, path: &mut NodePath) {
        for (heading, node) in tree {
            path.push(heading.clone());
            if node.has_children() || node.has_content() {
                self.expanded.insert(path.clone());
            }
            self.expand_recursive(&node.children, path);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outline_viewer::{ContentType, DocumentNode};

    fn path(parts: &[&str]) -> NodePath {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_expand_collapse() {
        let mut state = TreeState::new();
        assert!(state.expand(path(&["A", "B"])));
        assert!(!state.expand(path(&["A", "B"])));
        assert!(state.is_expanded(&path(&["A", "B"])));
        assert!(!state.is_expanded(&path(&["A"])));

        assert!(state.collapse(&path(&["A", "B"])));
        assert!(!state.collapse(&path(&["A", "B"])));
    }

    #[test]
    fn test_expand_all_skips_empty_leaves() {
        let mut tree = DocumentTree::new();
        tree.insert(
            "A".into(),
            DocumentNode::new(None)
                .with_child("B", DocumentNode::new(Some(ContentType::Text)).with_content(["x"]))
                .with_child("C", DocumentNode::new(Some(ContentType::Image))),
        );

        let mut state = TreeState::new();
        state.expand_all(&tree);
        assert_eq!(state.expanded_count(), 2);
        assert!(state.is_expanded(&path(&["A", "B"])));
        assert!(!state.is_expanded(&path(&["A", "C"])));
    }
}
