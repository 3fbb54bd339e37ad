//! Session-local theme selection.
//!
//! Nothing is written to disk; each launch starts on the first built-in theme.

use outline_viewer::{ThemeColors, ThemeManager};

/// Current theme plus a flag telling the frame loop to rebuild egui visuals.
pub struct ThemeState {
    manager: ThemeManager,
    needs_apply: bool,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeState {
    /// Starts on the default theme with visuals still to be applied.
    pub fn new() -> Self {
        Self {
            manager: ThemeManager::new(),
            needs_apply: true,
        }
    }

    pub fn theme_manager(&self) -> &ThemeManager {
        &self.manager
    }

    pub fn current_theme_name(&self) -> &str {
        self.manager.current_theme_name()
    }

    pub fn colors(&self) -> &ThemeColors {
        &self.manager.current_theme().colors
    }

    /// Switches themes. Unknown names are logged and ignored.
    pub fn set_theme(&mut self, theme_name: &str) {
        if theme_name == self.current_theme_name() {
            return;
        }
        match self.manager.set_current_theme(theme_name) {
            Ok(()) => self.needs_apply = true,
            Err(err) => tracing::warn!(%err, "theme not changed"),
        }
    }

    /// Returns true once after each theme change.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.needs_apply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_change_marks_dirty() {
        let mut state = ThemeState::new();
        assert!(state.take_dirty());
        assert!(!state.take_dirty());

        state.set_theme("Slate");
        assert_eq!(state.current_theme_name(), "Slate");
        assert!(state.take_dirty());

        state.set_theme("Nope");
        assert_eq!(state.current_theme_name(), "Slate");
        assert!(!state.take_dirty());
    }
}
