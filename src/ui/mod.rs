//! UI panel rendering subsystem
//!
//! This module contains all UI panel rendering logic for the outline viewer:
//! - Header panel (document controls, filter, export, theme selector)
//! - Outline panel (structured data with scroll reporting)
//! - Source panel (page column and page indicator)
//! - Divider (split pane drag handle)
//! - Status bar (document and view summary)
//! - Panel manager (panel orchestration and layout)

pub mod divider;
pub mod header;
pub mod outline_panel;
pub mod panel_manager;
pub mod source_panel;
pub mod status_bar;
