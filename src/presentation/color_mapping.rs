//! Color mapping for outline sections.
//!
//! This module provides functions for:
//! - Tag colors per content type
//! - Left-border accents cycled by depth
//! - Tag background tints

use egui::Color32;
use outline_viewer::theme::with_alpha;
use outline_viewer::{ContentType, ThemeColors};

/// Text color of a content-type tag.
pub fn tag_color(content_type: ContentType, colors: &ThemeColors) -> Color32 {
    colors.content_tag(content_type)
}

/// Background tint behind a content-type tag.
pub fn tag_fill(content_type: ContentType, colors: &ThemeColors) -> Color32 {
    with_alpha(colors.content_tag(content_type), 32)
}

/// Left-border accent for a section at `depth` (0 for roots).
pub fn depth_accent(depth: usize, colors: &ThemeColors) -> Color32 {
    colors.depth_accent(depth)
}

/// Uppercase tag label, e.g. "TABLE".
pub fn tag_label(content_type: ContentType) -> String {
    content_type.as_str().to_ascii_uppercase()
}
