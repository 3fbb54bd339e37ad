//! Draggable divider between the two panes.
//!
//! Only the pointer-down lands here; movement and release are read from the
//! global pointer state by the panel manager so a drag keeps working when the
//! pointer leaves the divider.

use crate::app::AppState;
use egui::{Sense, Stroke};

/// Width of the grab area.
pub const DIVIDER_WIDTH: f32 = 6.0;

pub fn render_divider(ui: &mut egui::Ui, rect: egui::Rect, state: &mut AppState) {
    let response = ui.interact(rect, ui.id().with("split_divider"), Sense::drag());
    if response.drag_started() {
        state.shell.on_divider_pointer_down();
    }

    let dragging = state.shell.is_dragging_divider();
    if dragging || response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
    }

    let colors = state.theme.colors();
    let (width, color) = if dragging {
        (2.0, colors.divider_active)
    } else {
        (1.0, colors.border)
    };
    let x = rect.center().x;
    ui.painter().line_segment(
        [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
        Stroke::new(width, color),
    );
}
