//! Presentation layer for visual styling and color mapping.
//!
//! This module contains presentation logic separated from the view core:
//! - Content-type tag colors
//! - Depth accents for nested sections

pub mod color_mapping;
