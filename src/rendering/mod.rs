//! Rendering subsystem for drawing the outline
//!
//! - Outline rendering (nested accordion sections with depth accents and
//!   content-type tags)

pub mod outline_renderer;
