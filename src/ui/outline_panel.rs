//! Outline pane UI rendering
//!
//! Left pane: a fixed "STRUCTURED DATA" caption over the scrollable outline.
//! The pane reports its scroll geometry to the shell every frame and applies
//! the offsets the shell mirrors onto it.

use crate::app::AppState;
use crate::io::{AsyncLoader, LoadKind};
use crate::rendering::outline_renderer::{self, OutlineInteraction};
use egui::{RichText, ScrollArea};
use outline_viewer::{Pane, SyncOutcome};
use std::time::{Duration, Instant};

/// Renders the outline pane.
pub fn render_outline_panel(
    ui: &mut egui::Ui,
    state: &mut AppState,
    loader: &AsyncLoader,
    now: Instant,
) -> Option<OutlineInteraction> {
    let colors = state.theme.colors().clone();

    ui.horizontal(|ui| {
        ui.label(RichText::new("STRUCTURED DATA").small().strong().color(colors.text_dim));
        if state.shell.has_document() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let visible = state.shell.visible_count();
                let total = state.shell.total_count();
                ui.label(
                    RichText::new(format!("{visible} / {total} sections"))
                        .small()
                        .color(colors.text_dim),
                );
            });
        }
    });
    ui.separator();

    let mut scroll_area = ScrollArea::vertical()
        .id_salt("outline_scroll")
        .auto_shrink([false, false]);
    if let Some(offset) = state.shell.take_scroll_request(Pane::Outline) {
        scroll_area = scroll_area.vertical_scroll_offset(offset);
    }

    let has_document = state.shell.has_document();
    let loading = loader.is_loading(LoadKind::Outline);
    let output = scroll_area.show(ui, |ui| {
        if loading {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading outline...").color(colors.text_dim));
            });
            return None;
        }
        if !has_document {
            outline_renderer::render_empty(ui, "Open a document to see its structure", colors.text_dim);
            return None;
        }
        let visible = state.shell.visible_tree();
        if visible.is_empty() {
            outline_renderer::render_empty(ui, "No sections match the selected filter", colors.text_dim);
            return None;
        }
        outline_renderer::render_outline(ui, visible, &state.tree, &colors)
    });

    let outcome = state.shell.observe_scroll(
        Pane::Outline,
        now,
        output.state.offset.y,
        output.content_size.y,
        output.inner_rect.height(),
    );
    if let Some(SyncOutcome::Mirrored { .. }) = outcome {
        ui.ctx().request_repaint();
    }
    if loading {
        ui.ctx().request_repaint_after(Duration::from_millis(100));
    }

    output.inner
}
