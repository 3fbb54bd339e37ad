//! Viewer composition: filter, split pane and scroll synchronization wired
//! to one document view.
//!
//! `ViewerShell` owns the session-local [`ViewState`] and the listener
//! lifecycle. The UI forwards raw observations (pointer positions, pane
//! offsets, filter picks, source load results) and reads back what to draw;
//! no UI types cross this boundary.

use crate::cache::FilterCache;
use crate::document::{self, DocumentTree};
use crate::error::Result;
use crate::filter::{self, ContentFilter};
use crate::scroll_sync::{
    Pane, ScrollSynchronizer, ScrollViewport, SyncOutcome, SyncState, TrackedPane,
};
use crate::source::PageIndicator;
use crate::split_pane::{ContainerBounds, SplitPaneController};
use std::time::{Duration, Instant};

/// Event subscriptions held while the view is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    OutlineScroll,
    SourceScroll,
    /// Pointer movement anywhere in the window.
    PointerMove,
    /// Pointer release anywhere in the window.
    PointerUp,
}

impl Listener {
    pub const ALL: [Listener; 4] = [
        Listener::OutlineScroll,
        Listener::SourceScroll,
        Listener::PointerMove,
        Listener::PointerUp,
    ];

    pub fn scroll(pane: Pane) -> Listener {
        match pane {
            Pane::Outline => Listener::OutlineScroll,
            Pane::Source => Listener::SourceScroll,
        }
    }
}

/// Load state of the paginated source document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceStatus {
    /// No source document selected.
    #[default]
    Empty,
    Loading,
    Loaded { total_pages: u32 },
    /// Loading failed; the pane shows an inline indicator.
    Failed(String),
}

/// Session-local view state, recreated on every mount.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub filter: ContentFilter,
    pub split: SplitPaneController,
    pub sync: ScrollSynchronizer,
    pub pages: PageIndicator,
}

impl ViewState {
    pub fn new(quiescence: Duration) -> Self {
        Self {
            filter: ContentFilter::All,
            split: SplitPaneController::new(),
            sync: ScrollSynchronizer::with_quiescence(quiescence),
            pages: PageIndicator::default(),
        }
    }
}

/// Composes the outline/source view.
pub struct ViewerShell {
    document_id: Option<String>,
    tree: DocumentTree,
    source: SourceStatus,
    state: ViewState,
    quiescence: Duration,
    listeners: Vec<Listener>,
    outline_pane: TrackedPane,
    source_pane: TrackedPane,
    cache: FilterCache,
}

impl ViewerShell {
    /// Creates an unmounted shell with no document.
    pub fn new(quiescence: Duration) -> Self {
        Self {
            document_id: None,
            tree: DocumentTree::new(),
            source: SourceStatus::Empty,
            state: ViewState::new(quiescence),
            quiescence,
            listeners: Vec::new(),
            outline_pane: TrackedPane::new(),
            source_pane: TrackedPane::new(),
            cache: FilterCache::new(),
        }
    }

    // ===== Lifecycle =====

    /// Creates fresh view state and attaches all listeners.
    pub fn mount(&mut self) {
        self.state = ViewState::new(self.quiescence);
        if let SourceStatus::Loaded { total_pages } = self.source {
            self.state.pages.set_total(total_pages);
        }
        self.outline_pane.clear();
        self.source_pane.clear();
        self.cache.invalidate();
        self.listeners = Listener::ALL.to_vec();
        tracing::debug!("viewer mounted");
    }

    /// Detaches every listener, clears the quiescence timer and drops any
    /// drag in progress.
    pub fn unmount(&mut self) {
        self.listeners.clear();
        self.state.sync.reset();
        self.state.split.end_drag();
        self.outline_pane.take_pending();
        self.source_pane.take_pending();
        tracing::debug!("viewer unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    pub fn is_listening(&self, listener: Listener) -> bool {
        self.listeners.contains(&listener)
    }

    // ===== Document =====

    /// Replaces the displayed outline.
    pub fn load_document(&mut self, document_id: Option<String>, tree: DocumentTree) {
        tracing::info!(
            document = document_id.as_deref().unwrap_or("<file>"),
            sections = filter::count_nodes(&tree),
            "document loaded"
        );
        self.document_id = document_id;
        self.tree = tree;
        self.cache.invalidate();
        self.outline_pane.clear();
        self.source_pane.clear();
        self.state.sync.reset();
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    /// The full, unfiltered outline.
    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    pub fn has_document(&self) -> bool {
        !self.tree.is_empty()
    }

    // ===== Filter =====

    pub fn filter(&self) -> ContentFilter {
        self.state.filter
    }

    pub fn set_filter(&mut self, filter: ContentFilter) {
        if self.state.filter != filter {
            tracing::debug!(%filter, "filter changed");
            self.state.filter = filter;
        }
    }

    /// Outline visible under the current filter.
    pub fn visible_tree(&mut self) -> &DocumentTree {
        self.cache.visible(&self.tree, self.state.filter)
    }

    /// Number of sections visible under the current filter.
    pub fn visible_count(&mut self) -> usize {
        self.cache.visible_count(&self.tree, self.state.filter)
    }

    pub fn total_count(&self) -> usize {
        filter::count_nodes(&self.tree)
    }

    // ===== Split pane =====

    pub fn split_ratio(&self) -> f32 {
        self.state.split.ratio()
    }

    pub fn is_dragging_divider(&self) -> bool {
        self.state.split.is_dragging()
    }

    /// Pointer pressed on the divider.
    pub fn on_divider_pointer_down(&mut self) {
        if self.is_mounted() {
            self.state.split.begin_drag();
        }
    }

    /// Pointer moved anywhere. Returns true if the split ratio changed.
    pub fn on_pointer_move(&mut self, pointer_x: f32, bounds: ContainerBounds) -> bool {
        if !self.is_listening(Listener::PointerMove) {
            return false;
        }
        self.state.split.update_drag(pointer_x, bounds)
    }

    /// Pointer released anywhere.
    pub fn on_pointer_up(&mut self) {
        if self.is_listening(Listener::PointerUp) {
            self.state.split.end_drag();
        }
    }

    // ===== Scroll synchronization =====

    /// Reports a pane's geometry for this frame.
    ///
    /// An offset change since the last report is a scroll event and is handed
    /// to the synchronizer. Returns the synchronizer's verdict for scroll
    /// events, `None` otherwise.
    pub fn observe_scroll(
        &mut self,
        pane: Pane,
        now: Instant,
        offset: f32,
        content_height: f32,
        viewport_height: f32,
    ) -> Option<SyncOutcome> {
        if !self.is_listening(Listener::scroll(pane)) {
            return None;
        }

        let moved = self
            .pane_mut(pane)
            .observe(offset, content_height, viewport_height);
        let outcome = if moved {
            let sync = &mut self.state.sync;
            Some(match pane {
                Pane::Outline => sync.handle_scroll(pane, now, &self.outline_pane, &mut self.source_pane),
                Pane::Source => sync.handle_scroll(pane, now, &self.source_pane, &mut self.outline_pane),
            })
        } else {
            self.state.sync.poll(now);
            None
        };

        self.state
            .pages
            .update_from_fraction(self.source_pane.metrics().fraction());
        outcome
    }

    /// Offset the UI should apply to `pane` on this frame, if any.
    pub fn take_scroll_request(&mut self, pane: Pane) -> Option<f32> {
        self.pane_mut(pane).take_pending()
    }

    /// Fires the quiescence timer if due.
    pub fn poll(&mut self, now: Instant) {
        self.state.sync.poll(now);
    }

    pub fn sync_state(&self) -> SyncState {
        self.state.sync.state()
    }

    /// Time until the synchronizer unlocks; the UI schedules a repaint then.
    pub fn quiescence_remaining(&self, now: Instant) -> Option<Duration> {
        self.state.sync.remaining(now)
    }

    pub fn mirrored_writes(&self) -> u64 {
        self.state.sync.writes()
    }

    fn pane_mut(&mut self, pane: Pane) -> &mut TrackedPane {
        match pane {
            Pane::Outline => &mut self.outline_pane,
            Pane::Source => &mut self.source_pane,
        }
    }

    // ===== Source document =====

    pub fn source_status(&self) -> &SourceStatus {
        &self.source
    }

    pub fn on_source_loading(&mut self) {
        self.source = SourceStatus::Loading;
        self.state.pages.set_total(0);
    }

    /// The source renderer reported success.
    pub fn on_source_loaded(&mut self, total_pages: u32) {
        tracing::info!(total_pages, "source document loaded");
        self.source = SourceStatus::Loaded { total_pages };
        self.state.pages.set_total(total_pages);
        self.source_pane.clear();
    }

    /// The source renderer failed; the rest of the view keeps working.
    pub fn on_source_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "source document failed to load");
        self.source = SourceStatus::Failed(message);
        self.state.pages.set_total(0);
    }

    pub fn page_indicator(&self) -> PageIndicator {
        self.state.pages
    }

    // ===== Export =====

    /// Serializes the full outline, ignoring the current filter.
    pub fn export_json(&self) -> Result<String> {
        document::export_json(&self.tree)
    }
}

impl Default for ViewerShell {
    fn default() -> Self {
        Self::new(crate::scroll_sync::DEFAULT_QUIESCENCE)
    }
}
