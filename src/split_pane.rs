//! Draggable split between the outline and source panes.
//!
//! The split is a single ratio: the share of the container width given to the
//! left pane. Drags that would push the ratio outside `[MIN_RATIO, MAX_RATIO]`
//! are rejected outright and leave the previous ratio in place.

/// Smallest accepted split ratio.
pub const MIN_RATIO: f32 = 0.20;
/// Largest accepted split ratio.
pub const MAX_RATIO: f32 = 0.80;
/// Ratio of a freshly mounted view.
pub const DEFAULT_RATIO: f32 = 0.50;

/// Horizontal extent of the container holding both panes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerBounds {
    pub left: f32,
    pub width: f32,
}

impl ContainerBounds {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }
}

/// Tracks the split ratio and whether a divider drag is in progress.
#[derive(Debug, Clone)]
pub struct SplitPaneController {
    ratio: f32,
    dragging: bool,
}

impl Default for SplitPaneController {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitPaneController {
    pub fn new() -> Self {
        Self {
            ratio: DEFAULT_RATIO,
            dragging: false,
        }
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Arms the drag (pointer pressed on the divider).
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Applies a pointer position while a drag is armed.
    ///
    /// Returns true if the ratio changed.
    pub fn update_drag(&mut self, pointer_x: f32, bounds: ContainerBounds) -> bool {
        if !self.dragging {
            return false;
        }
        let ratio = (pointer_x - bounds.left) / bounds.width;
        if !ratio.is_finite() || !(MIN_RATIO..=MAX_RATIO).contains(&ratio) {
            return false;
        }
        let changed = ratio != self.ratio;
        self.ratio = ratio;
        changed
    }

    /// Disarms the drag (pointer released anywhere).
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }
}
