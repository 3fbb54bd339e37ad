//! Theme selection and application.

use crate::app::AppState;

/// Coordinates theme management.
pub struct ThemeCoordinator;

impl ThemeCoordinator {
    /// Switches to the named theme. Visuals are rebuilt on the next frame.
    pub fn select_theme(state: &mut AppState, theme_name: &str) {
        state.theme.set_theme(theme_name);
    }

    /// Applies the current theme to the egui context if it changed.
    ///
    /// Called every frame; rebuilding visuals only happens after a change.
    pub fn apply_current_theme(ctx: &egui::Context, state: &mut AppState) {
        if !state.theme.take_dirty() {
            return;
        }
        let theme = state.theme.theme_manager().current_theme();
        ctx.set_theme(if theme.dark_mode {
            egui::Theme::Dark
        } else {
            egui::Theme::Light
        });
        ctx.set_visuals(theme.visuals());
        tracing::debug!(theme = state.theme.current_theme_name(), "applied theme");
    }
}
