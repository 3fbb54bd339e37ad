//! Source pane UI rendering
//!
//! Right pane: a "SOURCE PDF" caption with the page indicator over a column
//! of page frames. Pages are not rasterized; each one is drawn as a numbered
//! sheet at US Letter proportions so the column has the real document's
//! scrollable extent.

use crate::app::AppState;
use egui::{RichText, ScrollArea, Sense, Stroke};
use outline_viewer::{Pane, SourceStatus, SyncOutcome, ThemeColors};
use std::time::Instant;

/// Rendered page width at full size.
const PAGE_WIDTH: f32 = 600.0;
/// Height over width of a US Letter page.
const PAGE_ASPECT: f32 = 11.0 / 8.5;
/// Vertical gap between pages.
const PAGE_GAP: f32 = 16.0;
/// Horizontal padding around the page column.
const PAGE_MARGIN: f32 = 12.0;

/// Renders the source pane.
pub fn render_source_panel(ui: &mut egui::Ui, state: &mut AppState, now: Instant) {
    let colors = state.theme.colors().clone();

    ui.horizontal(|ui| {
        ui.label(RichText::new("SOURCE PDF").small().strong().color(colors.text_dim));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(state.shell.page_indicator().label())
                    .small()
                    .monospace()
                    .color(colors.text_dim),
            );
        });
    });
    ui.separator();

    let mut scroll_area = ScrollArea::vertical()
        .id_salt("source_scroll")
        .auto_shrink([false, false]);
    if let Some(offset) = state.shell.take_scroll_request(Pane::Source) {
        scroll_area = scroll_area.vertical_scroll_offset(offset);
    }

    let status = state.shell.source_status().clone();
    let output = scroll_area.show(ui, |ui| match &status {
        SourceStatus::Empty => {
            centered_message(ui, "Open a PDF to show it beside the outline", &colors, false);
        }
        SourceStatus::Loading => {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading PDF...").color(colors.text_dim));
            });
        }
        SourceStatus::Failed(message) => {
            centered_message(ui, "Failed to load PDF", &colors, true);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(message).small().color(colors.text_dim));
            });
        }
        SourceStatus::Loaded { total_pages } => {
            render_pages(ui, *total_pages, &colors);
        }
    });

    let outcome = state.shell.observe_scroll(
        Pane::Source,
        now,
        output.state.offset.y,
        output.content_size.y,
        output.inner_rect.height(),
    );
    if let Some(SyncOutcome::Mirrored { .. }) = outcome {
        ui.ctx().request_repaint();
    }
}

fn centered_message(ui: &mut egui::Ui, message: &str, colors: &ThemeColors, is_error: bool) {
    let color = if is_error { colors.error } else { colors.text_dim };
    ui.add_space(24.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(message).color(color));
    });
}

fn render_pages(ui: &mut egui::Ui, total_pages: u32, colors: &ThemeColors) {
    let width = (ui.available_width() - 2.0 * PAGE_MARGIN).clamp(1.0, PAGE_WIDTH);
    let size = egui::vec2(width, width * PAGE_ASPECT);

    ui.add_space(PAGE_GAP);
    ui.vertical_centered(|ui| {
        for page in 1..=total_pages {
            let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
            if ui.is_rect_visible(rect) {
                let painter = ui.painter();
                painter.rect_filled(rect, 2.0, colors.page_background);
                painter.rect_stroke(rect, 2.0, Stroke::new(1.0, colors.border), egui::StrokeKind::Inside);
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    format!("Page {page}"),
                    egui::FontId::proportional(18.0),
                    colors.text_dim,
                );
            }
            ui.add_space(PAGE_GAP);
        }
    });
}
