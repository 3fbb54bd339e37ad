//! Panel orchestration and layout management.
//!
//! Lays out the header, the status bar and the split central area (outline,
//! divider, source), and feeds global pointer input to the split pane.

use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::rendering::outline_renderer::OutlineInteraction;
use crate::ui::divider::{self, DIVIDER_WIDTH};
use crate::ui::header::{self, HeaderInteraction};
use crate::ui::{outline_panel, source_panel, status_bar};
use egui::UiBuilder;
use outline_viewer::ContainerBounds;
use std::time::Instant;

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    Header(HeaderInteraction),
    Outline(OutlineInteraction),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// This is the main entry point for rendering the entire UI, called from
    /// the eframe::App::update() implementation.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        loader: &AsyncLoader,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;
        let now = Instant::now();
        state.shell.poll(now);

        // Header panel at the top
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(PanelInteraction::Header(header_interaction));
            }
        });

        // Status panel at the very bottom
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        let central_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(4))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default()
            .frame(central_frame)
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap();
                let bounds = ContainerBounds::new(rect.left(), rect.width());

                // Pointer movement and release count anywhere in the window.
                let (pointer, released) =
                    ctx.input(|i| (i.pointer.latest_pos(), i.pointer.any_released()));
                if let Some(pos) = pointer {
                    state.shell.on_pointer_move(pos.x, bounds);
                }
                if released {
                    state.shell.on_pointer_up();
                }

                let split_x = rect.left() + rect.width() * state.shell.split_ratio();
                let half = DIVIDER_WIDTH / 2.0;
                let left_rect = egui::Rect::from_min_max(rect.min, egui::pos2(split_x - half, rect.bottom()));
                let divider_rect = egui::Rect::from_min_max(
                    egui::pos2(split_x - half, rect.top()),
                    egui::pos2(split_x + half, rect.bottom()),
                );
                let right_rect = egui::Rect::from_min_max(egui::pos2(split_x + half, rect.top()), rect.max);

                ui.scope_builder(UiBuilder::new().max_rect(left_rect), |ui| {
                    ui.set_clip_rect(left_rect);
                    if let Some(outline_interaction) = outline_panel::render_outline_panel(ui, state, loader, now) {
                        interaction = Some(PanelInteraction::Outline(outline_interaction));
                    }
                });

                divider::render_divider(ui, divider_rect, state);

                ui.scope_builder(UiBuilder::new().max_rect(right_rect), |ui| {
                    ui.set_clip_rect(right_rect);
                    source_panel::render_source_panel(ui, state, now);
                });

                ui.advance_cursor_after_rect(rect);
            });

        // Wake up when the scroll lock expires so it settles without input.
        if let Some(remaining) = state.shell.quiescence_remaining(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }

        interaction
    }
}
