//! Built-in color themes for the outline viewer.
//!
//! A theme carries the egui chrome colors plus the viewer's own accents: one
//! tag color per content type and a five-step palette cycled by outline depth.

use crate::document::ContentType;
use crate::error::{Result, ViewerError};
use egui::Color32;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Number of accent colors cycled through by outline depth.
pub const DEPTH_ACCENTS: usize = 5;

/// Complete color palette for a theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Background colors
    pub background: Color32,
    pub panel_background: Color32,
    pub extreme_background: Color32,
    /// Fill of the placeholder pages in the source pane.
    pub page_background: Color32,

    // Foreground colors
    pub text: Color32,
    pub text_dim: Color32,
    pub text_strong: Color32,

    // Interactive colors
    pub selection: Color32,
    pub hover: Color32,
    pub border: Color32,
    pub divider_active: Color32,

    // Content-type tags
    pub text_tag: Color32,
    pub table_tag: Color32,
    pub image_tag: Color32,

    /// Left-border accents, indexed by depth modulo [`DEPTH_ACCENTS`].
    pub depth_accents: [Color32; DEPTH_ACCENTS],

    pub error: Color32,
    pub warning: Color32,
}

impl ThemeColors {
    pub fn content_tag(&self, content_type: ContentType) -> Color32 {
        match content_type {
            ContentType::Text => self.text_tag,
            ContentType::Table => self.table_tag,
            ContentType::Image => self.image_tag,
        }
    }

    pub fn depth_accent(&self, depth: usize) -> Color32 {
        self.depth_accents[depth % DEPTH_ACCENTS]
    }
}

/// A named palette plus the egui base it builds on.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub dark_mode: bool,
    pub colors: ThemeColors,
}

impl Theme {
    /// egui visuals with this theme's palette applied.
    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        let c = &self.colors;

        visuals.panel_fill = c.panel_background;
        visuals.window_fill = c.panel_background;
        visuals.extreme_bg_color = c.extreme_background;
        visuals.faint_bg_color = c.background;
        visuals.override_text_color = Some(c.text);
        visuals.hyperlink_color = c.text_tag;
        visuals.error_fg_color = c.error;
        visuals.warn_fg_color = c.warning;

        visuals.selection.bg_fill = c.selection;
        visuals.selection.stroke.color = c.text_tag;

        let widgets = &mut visuals.widgets;
        widgets.noninteractive.bg_fill = c.panel_background;
        widgets.noninteractive.bg_stroke.color = c.border;
        for state in [&mut widgets.inactive, &mut widgets.hovered] {
            state.bg_fill = c.hover;
            state.weak_bg_fill = c.hover;
        }
        widgets.active.bg_fill = c.selection;
        visuals
    }
}

/// The built-in themes, in menu order, and the current selection.
pub struct ThemeManager {
    themes: IndexMap<String, Theme>,
    current: usize,
}

impl ThemeManager {
    /// Registers every built-in theme and selects the first one.
    pub fn new() -> Self {
        let themes = [light_theme(), dark_theme(), slate_theme()]
            .into_iter()
            .map(|theme| (theme.name.clone(), theme))
            .collect();
        Self { themes, current: 0 }
    }

    pub fn get_theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Theme names in menu order.
    pub fn list_themes(&self) -> Vec<&str> {
        self.themes.keys().map(String::as_str).collect()
    }

    pub fn current_theme_name(&self) -> &str {
        &self.current_theme().name
    }

    pub fn current_theme(&self) -> &Theme {
        match self.themes.get_index(self.current) {
            Some((_, theme)) => theme,
            None => &FALLBACK,
        }
    }

    /// Selects a theme by name.
    pub fn set_current_theme(&mut self, name: &str) -> Result<()> {
        let index = self
            .themes
            .get_index_of(name)
            .ok_or_else(|| ViewerError::InvalidInput(format!("unknown theme '{name}'")))?;
        self.current = index;
        Ok(())
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

static FALLBACK: Lazy<Theme> = Lazy::new(light_theme);

fn light_theme() -> Theme {
    Theme {
        name: "Light".to_string(),
        description: "Light gray workspace with white pages".to_string(),
        dark_mode: false,
        colors: ThemeColors {
            background: hex_to_color32("#f9fafb"),
            panel_background: hex_to_color32("#ffffff"),
            extreme_background: hex_to_color32("#f3f4f6"),
            page_background: hex_to_color32("#ffffff"),

            text: hex_to_color32("#111827"),
            text_dim: hex_to_color32("#6b7280"),
            text_strong: hex_to_color32("#000000"),

            selection: hex_to_color32("#dbeafe"),
            hover: hex_to_color32("#f3f4f6"),
            border: hex_to_color32("#e5e7eb"),
            divider_active: hex_to_color32("#3b82f6"),

            text_tag: hex_to_color32("#2563eb"),
            table_tag: hex_to_color32("#16a34a"),
            image_tag: hex_to_color32("#9333ea"),

            depth_accents: [
                hex_to_color32("#3b82f6"),
                hex_to_color32("#10b981"),
                hex_to_color32("#f59e0b"),
                hex_to_color32("#ef4444"),
                hex_to_color32("#8b5cf6"),
            ],

            error: hex_to_color32("#dc2626"),
            warning: hex_to_color32("#d97706"),
        },
    }
}

fn dark_theme() -> Theme {
    Theme {
        name: "Dark".to_string(),
        description: "Neutral charcoal with dimmed pages".to_string(),
        dark_mode: true,
        colors: ThemeColors {
            background: hex_to_color32("#18181b"),
            panel_background: hex_to_color32("#202023"),
            extreme_background: hex_to_color32("#09090b"),
            page_background: hex_to_color32("#3f3f46"),

            text: hex_to_color32("#e4e4e7"),
            text_dim: hex_to_color32("#a1a1aa"),
            text_strong: hex_to_color32("#fafafa"),

            selection: hex_to_color32("#1e3a8a"),
            hover: hex_to_color32("#2e2e33"),
            border: hex_to_color32("#52525b"),
            divider_active: hex_to_color32("#60a5fa"),

            text_tag: hex_to_color32("#93c5fd"),
            table_tag: hex_to_color32("#86efac"),
            image_tag: hex_to_color32("#d8b4fe"),

            depth_accents: [
                hex_to_color32("#60a5fa"),
                hex_to_color32("#2dd4bf"),
                hex_to_color32("#facc15"),
                hex_to_color32("#fb7185"),
                hex_to_color32("#c4b5fd"),
            ],

            error: hex_to_color32("#f87171"),
            warning: hex_to_color32("#fbbf24"),
        },
    }
}

/// Blue-gray dark palette, after Tailwind's slate scale.
fn slate_theme() -> Theme {
    Theme {
        name: "Slate".to_string(),
        description: "Blue-gray dark palette".to_string(),
        dark_mode: true,
        colors: ThemeColors {
            background: hex_to_color32("#0f172a"),
            panel_background: hex_to_color32("#1e293b"),
            extreme_background: hex_to_color32("#0b1120"),
            page_background: hex_to_color32("#334155"),

            text: hex_to_color32("#e2e8f0"),
            text_dim: hex_to_color32("#94a3b8"),
            text_strong: hex_to_color32("#f8fafc"),

            selection: hex_to_color32("#334155"),
            hover: hex_to_color32("#273449"),
            border: hex_to_color32("#475569"),
            divider_active: hex_to_color32("#38bdf8"),

            text_tag: hex_to_color32("#60a5fa"),
            table_tag: hex_to_color32("#4ade80"),
            image_tag: hex_to_color32("#c084fc"),

            depth_accents: [
                hex_to_color32("#38bdf8"),
                hex_to_color32("#34d399"),
                hex_to_color32("#fbbf24"),
                hex_to_color32("#f87171"),
                hex_to_color32("#a78bfa"),
            ],

            error: hex_to_color32("#f87171"),
            warning: hex_to_color32("#fbbf24"),
        },
    }
}

/// Parses `#rrggbb` (or `#rgb`); anything else is black.
pub fn hex_to_color32(hex: &str) -> Color32 {
    let digits = hex.trim_start_matches('#');
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        _ => digits.to_string(),
    };
    match u32::from_str_radix(&expanded, 16) {
        Ok(rgb) if expanded.len() == 6 => {
            let [_, r, g, b] = rgb.to_be_bytes();
            Color32::from_rgb(r, g, b)
        }
        _ => Color32::BLACK,
    }
}

/// Sets the alpha channel of a color.
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
