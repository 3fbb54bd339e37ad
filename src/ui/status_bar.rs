//! Status bar UI rendering
//!
//! Handles the bottom status bar: document, visible sections, split ratio
//! and scroll sync state.

use crate::app::AppState;
use eframe::egui;
use egui::RichText;
use outline_viewer::SyncState;

/// Renders the status panel at the bottom of the window
pub fn render_status_bar(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        match &state.document.origin {
            Some(origin) => {
                ui.label(RichText::new(format!("Document: {origin}")).strong());
                ui.label(RichText::new("|").strong());
                let visible = state.shell.visible_count();
                let total = state.shell.total_count();
                ui.label(format!(
                    "Sections: {visible} / {total} ({})",
                    state.shell.filter().label()
                ));
                ui.label(format!("Expanded: {}", state.tree.expanded_count()));
            }
            None => {
                ui.label(RichText::new("No document loaded").strong());
            }
        }

        if let Some(source) = &state.document.source_path {
            ui.label(RichText::new("|").strong());
            let name = source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| source.display().to_string());
            ui.label(format!("Source: {name}"));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let sync = match state.shell.sync_state() {
                SyncState::Idle => "idle",
                SyncState::Propagating { .. } => "syncing",
            };
            ui.label(format!("Scroll sync: {sync}"));
            ui.label(RichText::new("|").strong());
            ui.label(format!("Split: {:.0}%", state.shell.split_ratio() * 100.0));
        });
    });
}
