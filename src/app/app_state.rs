//! Centralized application state for the outline viewer.
//!
//! The view core (filter, split, scroll synchronization, page indicator) is
//! owned by the library's `ViewerShell`; the application adds the pieces that
//! only make sense with a window: section expansion, themes, the document
//! store location and the last error.

use crate::state::{ThemeState, TreeState};
use outline_viewer::{DocumentStore, DocumentSummary, ViewerShell};
use std::path::PathBuf;
use std::time::Duration;

/// Where the displayed outline and source document came from.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    /// Label shown in the status bar (document id or file path)
    pub origin: Option<String>,
    /// Source PDF currently shown, if any
    pub source_path: Option<PathBuf>,
}

/// Main application state composed of focused state components.
pub struct AppState {
    // ===== Focused State Components =====
    /// Filter, split pane, scroll sync and source status
    pub shell: ViewerShell,

    /// Outline expansion state
    pub tree: TreeState,

    /// Theme and styling state
    pub theme: ThemeState,

    /// Provenance of the displayed documents
    pub document: DocumentInfo,

    /// Outputs directory documents are opened from
    pub store: DocumentStore,

    /// Last listing of `store`; `None` until the documents menu is first opened
    pub documents: Option<Result<Vec<DocumentSummary>, String>>,

    // ===== Top-Level State =====
    /// Current error message to display (if any)
    pub error_message: Option<String>,
}

impl AppState {
    /// Creates the application state with a mounted viewer.
    pub fn new(store: DocumentStore, quiescence: Duration) -> Self {
        let mut shell = ViewerShell::new(quiescence);
        shell.mount();
        Self {
            shell,
            tree: TreeState::new(),
            theme: ThemeState::new(),
            document: DocumentInfo::default(),
            store,
            documents: None,
            error_message: None,
        }
    }

    // ===== High-Level Coordination Methods =====

    /// Clears the outline-related state before a new outline is shown.
    pub fn reset_outline_state(&mut self) {
        self.tree.clear();
        self.error_message = None;
    }
}
