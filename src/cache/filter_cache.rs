//! Memoization of the filtered outline.

use crate::document::DocumentTree;
use crate::filter::{self, ContentFilter};

/// Cache for the visible outline.
///
/// The outline is re-derived from the source tree for the current filter on
/// every frame; this cache keeps the last derivation keyed by filter. It must
/// be invalidated whenever a new tree is loaded.
#[derive(Debug, Default)]
pub struct FilterCache {
    /// Filter the cached tree was derived for.
    filter: Option<ContentFilter>,

    /// Cached visible tree.
    visible: DocumentTree,

    /// Cached number of visible sections.
    visible_count: usize,

    /// Incremented on every invalidation.
    generation: u64,
}

impl FilterCache {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the visible tree for `filter`, deriving it if needed.
    pub fn visible(&mut self, tree: &DocumentTree, filter: ContentFilter) -> &DocumentTree {
        self.refresh(tree, filter);
        &self.visible
    }

    /// Returns the visible section count for `filter`.
    pub fn visible_count(&mut self, tree: &DocumentTree, filter: ContentFilter) -> usize {
        self.refresh(tree, filter);
        self.visible_count
    }

    /// Whether a derivation for `filter` is cached.
    pub fn is_valid_for(&self, filter: ContentFilter) -> bool {
        self.filter == Some(filter)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drops the cached derivation.
    ///
    /// This should be called whenever:
    /// - A new document tree is loaded
    /// - The document is closed
    pub fn invalidate(&mut self) {
        self.filter = None;
        self.visible.clear();
        self.visible_count = 0;
        self.generation += 1;
    }

    fn refresh(&mut self, tree: &DocumentTree, filter: ContentFilter) {
        if self.is_valid_for(filter) {
            return;
        }
        self.visible = filter::filter_tree(tree, filter);
        self.visible_count = filter::count_nodes(&self.visible);
        self.filter = Some(filter);
        tracing::debug!(%filter, sections = self.visible_count, "derived visible outline");
    }
}
