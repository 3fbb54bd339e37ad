//! Application-level coordination and workflow management.
//!
//! Handles high-level application operations like document loading, error
//! handling and export, coordinating between the view core and the loaders.

use crate::app::AppState;
use crate::io::{AsyncLoader, LoadKind, LoadResult, OutlineRequest};
use anyhow::Context;
use outline_viewer::{
    ContentFilter, NodePath, SampleTreeSource, TreeSource, EXPORT_FILE_NAME, SAMPLE_DOCUMENT_ID,
};
use std::path::{Path, PathBuf};

/// Coordinates application-level operations and workflows.
///
/// This struct is responsible for:
/// - Starting outline and source document loads
/// - Applying load results to the view
/// - Routing outline and filter interactions
/// - Exporting the outline
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Starts loading a standalone outline file.
    pub fn open_outline_file(
        state: &mut AppState,
        loader: &mut AsyncLoader,
        path: PathBuf,
        ctx: &egui::Context,
    ) {
        state.error_message = None;
        loader.start_outline_load(OutlineRequest::File(path), ctx);
    }

    /// Starts loading a document from the outputs directory.
    pub fn open_stored_document(
        state: &mut AppState,
        loader: &mut AsyncLoader,
        document_id: String,
        ctx: &egui::Context,
    ) {
        state.error_message = None;
        let request = OutlineRequest::Stored {
            store: state.store.clone(),
            document_id,
        };
        loader.start_outline_load(request, ctx);
    }

    /// Shows the bundled sample outline.
    pub fn open_sample(state: &mut AppState) {
        match SampleTreeSource.fetch_tree(SAMPLE_DOCUMENT_ID) {
            Ok(tree) => {
                state.reset_outline_state();
                state.tree.expand_all(&tree);
                state.shell.load_document(Some(SAMPLE_DOCUMENT_ID.to_string()), tree);
                state.document.origin = Some(SAMPLE_DOCUMENT_ID.to_string());
            }
            Err(e) => {
                state.error_message = Some(format!("Error loading sample: {}", e));
            }
        }
    }

    /// Re-reads the outputs directory listing shown in the header.
    ///
    /// Runs when the documents menu is opened, not on every frame.
    pub fn refresh_document_list(state: &mut AppState) {
        let listing = state.store.list_documents().map_err(|e| e.to_string());
        if let Err(message) = &listing {
            tracing::warn!(%message, "cannot list documents");
        }
        state.documents = Some(listing);
    }

    /// Starts opening a source PDF for the right-hand pane.
    pub fn open_source(
        state: &mut AppState,
        loader: &mut AsyncLoader,
        path: PathBuf,
        ctx: &egui::Context,
    ) {
        state.shell.on_source_loading();
        state.document.source_path = Some(path.clone());
        loader.start_source_load(path, ctx);
    }

    /// Applies every finished load to application state.
    ///
    /// Called once per frame in the update loop.
    /// Returns true if any load completed (success or error).
    pub fn check_loading_completion(state: &mut AppState, loader: &mut AsyncLoader) -> bool {
        let mut completed = false;
        loop {
            match loader.check_completion() {
                LoadResult::Outline {
                    document_id,
                    origin,
                    tree,
                } => {
                    state.reset_outline_state();
                    state.tree.expand_all(&tree);
                    state.shell.load_document(document_id, tree);
                    state.document.origin = Some(origin);
                }
                LoadResult::Source { path, total_pages } => {
                    state.document.source_path = Some(path);
                    state.shell.on_source_loaded(total_pages);
                }
                LoadResult::Error {
                    kind: LoadKind::Outline,
                    message,
                } => {
                    tracing::error!(%message, "outline failed to load");
                    state.error_message = Some(format!("Error loading document: {}", message));
                }
                LoadResult::Error {
                    kind: LoadKind::Source,
                    message,
                } => {
                    // The source pane shows its own indicator; the outline keeps working.
                    state.shell.on_source_failed(message);
                }
                LoadResult::None => return completed,
            }
            completed = true;
        }
    }

    /// Handles outline section expand/collapse.
    pub fn handle_node_expand_toggle(state: &mut AppState, path: NodePath, was_expanded: bool) {
        if was_expanded {
            state.tree.collapse(&path);
        } else {
            state.tree.expand(path);
        }
    }

    /// Handles a content filter pick.
    pub fn handle_filter_change(state: &mut AppState, filter: ContentFilter) {
        state.shell.set_filter(filter);
    }

    /// Expands every section of the loaded outline.
    pub fn expand_all(state: &mut AppState) {
        state.tree.expand_all(state.shell.tree());
    }

    /// Asks for a destination and writes the full outline there.
    ///
    /// The export ignores the current filter.
    pub fn export_outline(state: &mut AppState) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(EXPORT_FILE_NAME);
        if let Some(dir) = dirs::download_dir() {
            dialog = dialog.set_directory(dir);
        }

        let Some(path) = dialog.save_file() else {
            return;
        };
        match Self::write_export(state, &path) {
            Ok(()) => tracing::info!(path = %path.display(), "exported outline"),
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "export failed");
                state.error_message = Some(format!("Error exporting outline: {:#}", e));
            }
        }
    }

    fn write_export(state: &AppState, path: &Path) -> anyhow::Result<()> {
        let json = state.shell.export_json()?;
        std::fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))
    }
}
