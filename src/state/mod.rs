//! State management modules for the outline viewer.
//!
//! This module contains state-only logic (no UI concerns):
//! - Tree state (which outline sections are expanded)
//! - Theme state (theme manager, current theme)
//!
//! Filter, split ratio and scroll synchronization live in the library's
//! `ViewerShell`, which owns the session-local view state.

mod theme_state;
mod tree_state;

pub use theme_state::ThemeState;
pub use tree_state::TreeState;
