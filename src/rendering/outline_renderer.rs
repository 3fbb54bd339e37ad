//! Outline section rendering logic
//!
//! Draws the visible outline as nested accordions. Each section gets a
//! left-border accent by depth, its heading, and an uppercase content-type
//! tag; an expanded section shows its content lines and then its subsections.

use eframe::egui;
use egui::{Color32, RichText, Sense, Stroke};
use outline_viewer::{ContentType, DocumentNode, DocumentTree, NodePath, ThemeColors};

use crate::presentation::color_mapping;
use crate::state::TreeState;

/// Horizontal indent of nested sections.
const NESTED_INDENT: f32 = 14.0;
/// Width of the depth accent on the left edge of a section.
const ACCENT_WIDTH: f32 = 3.0;

/// Result of user interaction with an outline section
pub enum OutlineInteraction {
    /// Section header was clicked to expand or collapse it
    ExpandToggled { path: NodePath, was_expanded: bool },
}

/// Renders every section of `tree`.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `tree` - The outline visible under the current filter
/// * `tree_state` - Which sections are expanded
/// * `colors` - Color palette for the current theme
pub fn render_outline(
    ui: &mut egui::Ui,
    tree: &DocumentTree,
    tree_state: &TreeState,
    colors: &ThemeColors,
) -> Option<OutlineInteraction> {
    let mut path = Vec::new();
    render_sections(ui, tree, &mut path, tree_state, colors)
}

fn render_sections(
    ui: &mut egui::Ui,
    tree: &DocumentTree,
    path: &mut NodePath,
    tree_state: &TreeState,
    colors: &ThemeColors,
) -> Option<OutlineInteraction> {
    let mut interaction = None;
    for (heading, node) in tree {
        path.push(heading.clone());
        if let Some(clicked) = render_section(ui, heading, node, path, tree_state, colors) {
            interaction = Some(clicked);
        }
        path.pop();
    }
    interaction
}

fn render_section(
    ui: &mut egui::Ui,
    heading: &str,
    node: &DocumentNode,
    path: &mut NodePath,
    tree_state: &TreeState,
    colors: &ThemeColors,
) -> Option<OutlineInteraction> {
    let depth = path.len() - 1;
    let expandable = node.has_content() || node.has_children();
    let is_expanded = expandable && tree_state.is_expanded(path);
    let mut interaction = None;

    let frame = egui::Frame::new()
        .inner_margin(egui::Margin {
            left: 10,
            right: 6,
            top: 4,
            bottom: 4,
        })
        .stroke(Stroke::new(1.0, colors.border))
        .corner_radius(4.0);

    let shown = frame.show(ui, |ui| {
        ui.set_width(ui.available_width());

        let header = ui.horizontal(|ui| {
            let symbol = match (expandable, is_expanded) {
                (false, _) => "•",
                (true, true) => "▼",
                (true, false) => "▶",
            };
            ui.label(RichText::new(symbol).size(10.0).color(colors.text_dim));
            ui.add(egui::Label::new(RichText::new(heading).strong().color(colors.text_strong)).wrap());
            if let Some(content_type) = node.content_type {
                render_tag(ui, content_type, colors);
            }
        });

        if expandable {
            let id = ui.id().with(("outline_section", &*path));
            let response = ui
                .interact(header.response.rect, id, Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            if response.clicked() {
                interaction = Some(OutlineInteraction::ExpandToggled {
                    path: path.clone(),
                    was_expanded: is_expanded,
                });
            }
        }

        if is_expanded {
            render_content(ui, node, colors);
            if node.has_children() {
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.add_space(NESTED_INDENT);
                    ui.vertical(|ui| {
                        if let Some(child) = render_sections(ui, &node.children, path, tree_state, colors) {
                            interaction = Some(child);
                        }
                    });
                });
            }
        }
    });

    let rect = shown.response.rect;
    let accent = egui::Rect::from_min_max(rect.left_top(), egui::pos2(rect.left() + ACCENT_WIDTH, rect.bottom()));
    ui.painter()
        .rect_filled(accent, 0.0, color_mapping::depth_accent(depth, colors));
    ui.add_space(4.0);

    interaction
}

fn render_tag(ui: &mut egui::Ui, content_type: ContentType, colors: &ThemeColors) {
    egui::Frame::new()
        .fill(color_mapping::tag_fill(content_type, colors))
        .corner_radius(3.0)
        .inner_margin(egui::Margin::symmetric(4, 1))
        .show(ui, |ui| {
            ui.label(
                RichText::new(color_mapping::tag_label(content_type))
                    .small()
                    .strong()
                    .color(color_mapping::tag_color(content_type, colors)),
            );
        });
}

fn render_content(ui: &mut egui::Ui, node: &DocumentNode, colors: &ThemeColors) {
    if !node.has_content() {
        return;
    }
    ui.add_space(2.0);
    match node.content_type {
        Some(ContentType::Table) => {
            egui::Frame::new()
                .fill(colors.extreme_background)
                .inner_margin(egui::Margin::same(4))
                .show(ui, |ui| {
                    for line in &node.content {
                        ui.label(RichText::new(line).monospace().color(colors.text));
                    }
                });
        }
        Some(ContentType::Image) => {
            for line in &node.content {
                ui.label(RichText::new(format!("🖼 {line}")).italics().color(colors.text_dim));
            }
        }
        _ => {
            for line in &node.content {
                ui.add(egui::Label::new(RichText::new(line).color(colors.text)).wrap());
            }
        }
    }
}

/// Placeholder shown when there is nothing to render.
pub fn render_empty(ui: &mut egui::Ui, message: &str, color: Color32) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(message).color(color));
    });
}
