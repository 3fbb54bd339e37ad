//! The paginated source document.
//!
//! Rendering of the source pages is not this crate's business; the viewer
//! only needs the total page count to lay out the page column and drive the
//! "current / total" indicator.

use crate::error::{Result, ViewerError};
use std::path::Path;

/// Something that can open a paginated document and report its page count.
pub trait PageSource: Send + Sync {
    fn load(&self, path: &Path) -> Result<u32>;
}

/// Counts PDF pages with `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfPageSource;

impl PageSource for LopdfPageSource {
    fn load(&self, path: &Path) -> Result<u32> {
        if !path.is_file() {
            return Err(ViewerError::NotFound(format!("source document {}", path.display())));
        }
        let document = lopdf::Document::load(path)
            .map_err(|e| ViewerError::Internal(format!("cannot open {}: {e}", path.display())))?;
        let pages = document.get_pages().len();
        tracing::debug!(path = %path.display(), pages, "counted source pages");
        u32::try_from(pages).map_err(|_| ViewerError::Internal(format!("{pages} pages is too many")))
    }
}

/// "Current page / total pages" indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageIndicator {
    current: u32,
    total: u32,
}

impl PageIndicator {
    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Records a newly loaded page count; the view starts on the first page.
    pub fn set_total(&mut self, total: u32) {
        self.total = total;
        self.current = total.min(1);
    }

    /// Derives the current page from the source pane's scroll fraction.
    pub fn update_from_fraction(&mut self, fraction: f32) {
        if self.total == 0 {
            self.current = 0;
            return;
        }
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let page = (fraction * self.total as f32).floor() as u32 + 1;
        self.current = page.min(self.total);
    }

    pub fn label(&self) -> String {
        format!("{} / {}", self.current, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_tracks_fraction() {
        let mut pages = PageIndicator::default();
        assert_eq!(pages.label(), "0 / 0");

        pages.set_total(10);
        assert_eq!(pages.label(), "1 / 10");

        pages.update_from_fraction(0.55);
        assert_eq!(pages.current(), 6);
        pages.update_from_fraction(1.0);
        assert_eq!(pages.current(), 10);
        pages.update_from_fraction(f32::NAN);
        assert_eq!(pages.current(), 1);
    }

    #[test]
    fn test_indicator_without_pages_stays_zero() {
        let mut pages = PageIndicator::default();
        pages.update_from_fraction(0.7);
        assert_eq!(pages.current(), 0);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let path = std::env::temp_dir().join("outline_viewer_missing_source.pdf");
        let _ = std::fs::remove_file(&path);
        let err = LopdfPageSource.load(&path).unwrap_err();
        assert!(matches!(err, ViewerError::NotFound(_)));
    }

    #[test]
    fn test_garbage_file_is_internal() {
        let path = std::env::temp_dir().join("outline_viewer_garbage_source.pdf");
        std::fs::write(&path, b"definitely not a pdf").unwrap();
        let err = LopdfPageSource.load(&path).unwrap_err();
        assert!(matches!(err, ViewerError::Internal(_)));
        let _ = std::fs::remove_file(&path);
    }
}
