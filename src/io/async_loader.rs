//! Asynchronous document loading.
//!
//! Outlines and source PDFs are read on background threads, keeping the GUI
//! responsive during file I/O. Results come back through one channel and are
//! drained once per frame.

use crate::io::{LoadKind, LoadingState};
use anyhow::Context;
use eframe::egui;
use outline_viewer::{
    parse_tree, DocumentStore, DocumentTree, LopdfPageSource, PageSource, TreeSource,
};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

/// Result of a completed loading operation.
pub enum LoadResult {
    /// An outline finished loading
    Outline {
        /// Store identifier, or `None` for a file picked from disk
        document_id: Option<String>,
        /// Where the outline came from, for display
        origin: String,
        tree: DocumentTree,
    },
    /// A source document was opened and its pages counted
    Source { path: PathBuf, total_pages: u32 },
    /// Loading failed with an error
    Error { kind: LoadKind, message: String },
    /// No result available
    None,
}

impl LoadResult {
    fn kind(&self) -> Option<LoadKind> {
        match self {
            LoadResult::Outline { .. } => Some(LoadKind::Outline),
            LoadResult::Source { .. } => Some(LoadKind::Source),
            LoadResult::Error { kind, .. } => Some(*kind),
            LoadResult::None => None,
        }
    }
}

/// Where to read an outline from.
#[derive(Debug, Clone)]
pub enum OutlineRequest {
    /// A standalone `output_tree.json`
    File(PathBuf),
    /// A document in the outputs directory
    Stored { store: DocumentStore, document_id: String },
}

/// A result tagged with the request generation it answers.
struct Tagged {
    generation: u64,
    result: LoadResult,
}

/// Manages asynchronous loading of outlines and source documents.
///
/// This struct coordinates background thread file loading with the main GUI thread,
/// ensuring responsive UI during potentially long-running I/O operations.
pub struct AsyncLoader {
    /// Shared loading state counters
    loading_state: Arc<Mutex<LoadingState>>,

    /// Handed to each loading thread
    sender: Sender<Tagged>,

    /// Channel receiver for loading results
    receiver: Receiver<Tagged>,

    /// Sequence number of the latest outline request; older results are dropped
    outline_generation: u64,

    /// Sequence number of the latest source request
    source_generation: u64,
}

impl AsyncLoader {
    /// Creates a new async loader with no active loading operation.
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            loading_state: Arc::new(Mutex::new(LoadingState::new())),
            sender,
            receiver,
            outline_generation: 0,
            source_generation: 0,
        }
    }

    /// Checks if a loading operation of `kind` is currently in progress.
    pub fn is_loading(&self, kind: LoadKind) -> bool {
        lock(&self.loading_state).in_progress(kind)
    }

    /// Starts loading an outline.
    ///
    /// Call `check_completion()` regularly (e.g., once per frame) to collect the result.
    pub fn start_outline_load(&mut self, request: OutlineRequest, ctx: &egui::Context) {
        self.outline_generation += 1;
        let generation = self.outline_generation;
        tracing::debug!(?request, generation, "loading outline");

        self.spawn(LoadKind::Outline, generation, ctx, move || {
            match load_outline(&request) {
                Ok((document_id, origin, tree)) => LoadResult::Outline {
                    document_id,
                    origin,
                    tree,
                },
                Err(err) => LoadResult::Error {
                    kind: LoadKind::Outline,
                    message: format!("{err:#}"),
                },
            }
        });
    }

    /// Starts opening a source PDF and counting its pages.
    pub fn start_source_load(&mut self, path: PathBuf, ctx: &egui::Context) {
        self.source_generation += 1;
        let generation = self.source_generation;
        tracing::debug!(path = %path.display(), generation, "loading source document");

        self.spawn(LoadKind::Source, generation, ctx, move || {
            match LopdfPageSource.load(&path) {
                Ok(total_pages) => LoadResult::Source { path, total_pages },
                Err(err) => LoadResult::Error {
                    kind: LoadKind::Source,
                    message: err.to_string(),
                },
            }
        });
    }

    fn spawn<F>(&mut self, kind: LoadKind, generation: u64, ctx: &egui::Context, job: F)
    where
        F: FnOnce() -> LoadResult + Send + 'static,
    {
        lock(&self.loading_state).started(kind);

        let loading_state = Arc::clone(&self.loading_state);
        let sender = self.sender.clone();
        let ctx_handle = ctx.clone();

        thread::spawn(move || {
            let result = job();
            // Counted as finished before the result is visible to the GUI.
            lock(&loading_state).finished(kind);
            let _ = sender.send(Tagged { generation, result });

            // Notify GUI thread to repaint
            ctx_handle.request_repaint();
        });
    }

    /// Returns the next available result, skipping results of superseded
    /// requests.
    ///
    /// Call this in a loop until it yields `LoadResult::None`.
    pub fn check_completion(&mut self) -> LoadResult {
        while let Ok(Tagged { generation, result }) = self.receiver.try_recv() {
            let latest = match result.kind() {
                Some(LoadKind::Outline) => self.outline_generation,
                Some(LoadKind::Source) => self.source_generation,
                None => continue,
            };
            if generation == latest {
                return result;
            }
            tracing::debug!(generation, latest, "dropping superseded load result");
        }
        LoadResult::None
    }
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn lock(state: &Mutex<LoadingState>) -> MutexGuard<'_, LoadingState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn load_outline(
    request: &OutlineRequest,
) -> anyhow::Result<(Option<String>, String, DocumentTree)> {
    match request {
        OutlineRequest::File(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            let tree =
                parse_tree(&json).with_context(|| format!("cannot parse {}", path.display()))?;
            Ok((None, path.display().to_string(), tree))
        }
        OutlineRequest::Stored {
            store,
            document_id,
        } => {
            let tree = store.fetch_tree(document_id)?;
            Ok((Some(document_id.clone()), document_id.clone(), tree))
        }
    }
}
