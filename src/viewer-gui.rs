//! Outline Viewer GUI Application
//!
//! Shows a parsed document's structure beside its source PDF using the egui
//! framework. The viewer features:
//! - Hierarchical outline with content-type filtering and depth accents
//! - Source pane with a "current / total" page indicator
//! - Proportional scroll synchronization between the two panes
//! - Draggable split between the panes
//! - Asynchronous loading of outlines and PDFs
//! - JSON export of the full outline
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state management and coordination
//! - `presentation/` - Visual styling and color mapping
//! - `io/` - Background loading of outlines and source documents
//! - `ui/` - UI panel rendering and pointer handling
//! - `rendering/` - Outline section rendering
//! - `state/` - Expansion and theme state

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use eframe::egui;
use outline_viewer::config::ViewerArgs;
use outline_viewer::{logging, DocumentStore};

mod app;
mod io;
mod presentation;
mod rendering;
mod state;
mod ui;

use app::{AppState, ApplicationCoordinator, ThemeCoordinator};
use io::AsyncLoader;
use rendering::outline_renderer::OutlineInteraction;
use ui::header::HeaderInteraction;
use ui::panel_manager::{PanelInteraction, PanelManager};

/// What to open on the first frame.
enum StartupLoad {
    Stored(String),
    Sample,
}

/// Main application entry point that initializes and launches the viewer.
fn main() -> eframe::Result {
    logging::init();
    let args = ViewerArgs::parse();
    tracing::info!(outputs = %args.outputs_dir.display(), "starting outline viewer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title("Outline Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "Outline Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(OutlineViewerApp::new(args)))),
    )
}

/// The main Outline Viewer application.
///
/// Most functionality is delegated to coordinators:
/// - `ApplicationCoordinator` handles loading, export and interaction logic
/// - `ThemeCoordinator` handles theme application
/// - `PanelManager` handles UI panel layout and rendering
struct OutlineViewerApp {
    /// Centralized application state
    state: AppState,
    /// Background loader for outlines and PDFs
    loader: AsyncLoader,
    /// Outline to open on the first frame
    pending_outline: Option<StartupLoad>,
    /// Source PDF to open on the first frame
    pending_source: Option<std::path::PathBuf>,
}

impl OutlineViewerApp {
    fn new(args: ViewerArgs) -> Self {
        let store = DocumentStore::new(&args.outputs_dir);
        let pending_outline = match (args.sample, args.document_id.clone()) {
            (true, _) => Some(StartupLoad::Sample),
            (false, Some(id)) => Some(StartupLoad::Stored(id)),
            (false, None) => None,
        };

        Self {
            state: AppState::new(store, args.quiescence()),
            loader: AsyncLoader::new(),
            pending_outline,
            pending_source: args.source.clone(),
        }
    }

    /// Handles panel interactions by delegating to the coordinators.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        match interaction {
            PanelInteraction::Header(header) => match header {
                HeaderInteraction::OpenOutlineFile(path) => {
                    ApplicationCoordinator::open_outline_file(&mut self.state, &mut self.loader, path, ctx);
                }
                HeaderInteraction::RefreshDocuments => {
                    ApplicationCoordinator::refresh_document_list(&mut self.state);
                }
                HeaderInteraction::OpenStoredDocument(id) => {
                    ApplicationCoordinator::open_stored_document(&mut self.state, &mut self.loader, id, ctx);
                }
                HeaderInteraction::OpenSample => {
                    ApplicationCoordinator::open_sample(&mut self.state);
                }
                HeaderInteraction::OpenSource(path) => {
                    ApplicationCoordinator::open_source(&mut self.state, &mut self.loader, path, ctx);
                }
                HeaderInteraction::FilterChanged(filter) => {
                    ApplicationCoordinator::handle_filter_change(&mut self.state, filter);
                }
                HeaderInteraction::ExpandAll => {
                    ApplicationCoordinator::expand_all(&mut self.state);
                }
                HeaderInteraction::CollapseAll => {
                    self.state.tree.clear();
                }
                HeaderInteraction::ExportRequested => {
                    ApplicationCoordinator::export_outline(&mut self.state);
                }
                HeaderInteraction::ThemeSelected(name) => {
                    ThemeCoordinator::select_theme(&mut self.state, &name);
                }
            },
            PanelInteraction::Outline(OutlineInteraction::ExpandToggled { path, was_expanded }) => {
                ApplicationCoordinator::handle_node_expand_toggle(&mut self.state, path, was_expanded);
            }
        }
    }
}

impl Drop for OutlineViewerApp {
    fn drop(&mut self) {
        self.state.shell.unmount();
    }
}

impl eframe::App for OutlineViewerApp {
    /// Main update loop that renders all UI panels and handles application state.
    ///
    /// 1. Collect finished background loads
    /// 2. Apply theme if it changed
    /// 3. Start the loads requested on the command line (first frame only)
    /// 4. Render all panels via PanelManager
    /// 5. Handle panel interactions
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ApplicationCoordinator::check_loading_completion(&mut self.state, &mut self.loader);

        ThemeCoordinator::apply_current_theme(ctx, &mut self.state);

        match self.pending_outline.take() {
            Some(StartupLoad::Stored(id)) => {
                ApplicationCoordinator::open_stored_document(&mut self.state, &mut self.loader, id, ctx);
            }
            Some(StartupLoad::Sample) => ApplicationCoordinator::open_sample(&mut self.state),
            None => {}
        }
        if let Some(path) = self.pending_source.take() {
            ApplicationCoordinator::open_source(&mut self.state, &mut self.loader, path, ctx);
        }

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state, &self.loader) {
            self.handle_panel_interaction(interaction, ctx);
        }
    }
}
