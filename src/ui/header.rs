//! Header panel UI rendering
//!
//! Handles the top bar with document controls, the content filter, export
//! and the theme selector.

use crate::app::AppState;
use eframe::egui;
use outline_viewer::ContentFilter;
use std::path::PathBuf;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User picked an `output_tree.json` from disk
    OpenOutlineFile(PathBuf),
    /// User opened the documents menu
    RefreshDocuments,
    /// User picked a document from the outputs directory
    OpenStoredDocument(String),
    /// User clicked "Sample"
    OpenSample,
    /// User picked a source PDF
    OpenSource(PathBuf),
    /// User chose another content filter
    FilterChanged(ContentFilter),
    ExpandAll,
    CollapseAll,
    /// User clicked "Export JSON"
    ExportRequested,
    /// User chose another theme
    ThemeSelected(String),
}

/// Renders the application header
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("📂 Open Outline").clicked() {
            let mut dialog = rfd::FileDialog::new().add_filter("Document outline", &["json"]);
            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }
            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenOutlineFile(path));
            }
        }

        let documents_menu = egui::ComboBox::from_id_salt("stored_documents")
            .selected_text("🗄 Documents")
            .show_ui(ui, |ui| match &state.documents {
                None => {
                    ui.spinner();
                }
                Some(Ok(documents)) if documents.iter().any(|d| d.has_tree) => {
                    for document in documents.iter().filter(|d| d.has_tree) {
                        let current = state.shell.document_id() == Some(document.id.as_str());
                        if ui.selectable_label(current, &document.id).clicked() {
                            interaction =
                                Some(HeaderInteraction::OpenStoredDocument(document.id.clone()));
                        }
                    }
                }
                Some(Ok(_)) => {
                    ui.label(format!("No documents in {}", state.store.root().display()));
                }
                Some(Err(message)) => {
                    ui.colored_label(ui.visuals().error_fg_color, message);
                }
            });
        // The listing is read once per opening of the menu.
        if documents_menu.response.clicked() {
            interaction = Some(HeaderInteraction::RefreshDocuments);
        }

        if ui.button("📄 Sample").clicked() {
            interaction = Some(HeaderInteraction::OpenSample);
        }

        if ui.button("📕 Open PDF").clicked() {
            let mut dialog = rfd::FileDialog::new().add_filter("PDF", &["pdf"]);
            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }
            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenSource(path));
            }
        }

        ui.separator();

        let old_filter = state.shell.filter();
        let mut filter = old_filter;
        ui.label("Show:");
        egui::ComboBox::from_id_salt("content_filter")
            .selected_text(filter.label())
            .show_ui(ui, |ui| {
                for choice in ContentFilter::CHOICES {
                    ui.selectable_value(&mut filter, choice, choice.label());
                }
            });
        if filter != old_filter {
            interaction = Some(HeaderInteraction::FilterChanged(filter));
        }

        let has_document = state.shell.has_document();
        if ui.add_enabled(has_document, egui::Button::new("⊞ Expand all")).clicked() {
            interaction = Some(HeaderInteraction::ExpandAll);
        }
        if ui.add_enabled(has_document, egui::Button::new("⊟ Collapse all")).clicked() {
            interaction = Some(HeaderInteraction::CollapseAll);
        }

        ui.separator();

        let export = ui
            .add_enabled(has_document, egui::Button::new("💾 Export JSON"))
            .on_hover_text("Save the full outline, ignoring the filter");
        if export.clicked() {
            interaction = Some(HeaderInteraction::ExportRequested);
        }

        // Push theme selector to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let current_theme = state.theme.current_theme_name();
            let mut selected = current_theme.to_string();
            egui::ComboBox::from_id_salt("theme_selector")
                .selected_text(current_theme)
                .show_ui(ui, |ui| {
                    for theme_name in state.theme.theme_manager().list_themes() {
                        ui.selectable_value(&mut selected, theme_name.to_string(), theme_name);
                    }
                });
            if selected != current_theme {
                interaction = Some(HeaderInteraction::ThemeSelected(selected));
            }

            ui.label("Theme:");
        });
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(state.theme.colors().error, err);
    }

    interaction
}
