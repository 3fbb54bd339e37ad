//! Bundled sample document.
//!
//! Lets the viewer and the server be exercised without an outputs directory.

use crate::document::{self, DocumentTree};
use crate::error::{Result, ViewerError};
use crate::store::TreeSource;
use once_cell::sync::Lazy;

/// Identifier the sample document is served under.
pub const SAMPLE_DOCUMENT_ID: &str = "sample";

const SAMPLE_JSON: &str = include_str!("../assets/sample_tree.json");

static SAMPLE_TREE: Lazy<Result<DocumentTree>> = Lazy::new(|| document::parse_tree(SAMPLE_JSON));

/// Returns a copy of the sample outline.
pub fn sample_tree() -> Result<DocumentTree> {
    match &*SAMPLE_TREE {
        Ok(tree) => Ok(tree.clone()),
        Err(e) => Err(ViewerError::Internal(format!("bundled sample is invalid: {e}"))),
    }
}

/// Tree source that only knows the sample document.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleTreeSource;

impl TreeSource for SampleTreeSource {
    fn fetch_tree(&self, document_id: &str) -> Result<DocumentTree> {
        if document_id == SAMPLE_DOCUMENT_ID {
            sample_tree()
        } else {
            Err(ViewerError::NotFound(format!("document '{document_id}'")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ContentType;
    use crate::filter::{count_matching, ContentFilter};

    #[test]
    fn test_sample_parses() {
        let tree = sample_tree().unwrap();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree["2. Pipeline"].content_type, None);
    }

    #[test]
    fn test_sample_covers_every_type() {
        let tree = sample_tree().unwrap();
        for ty in ContentType::ALL {
            assert!(count_matching(&tree, ContentFilter::Only(ty)) > 0, "{ty} missing");
        }
    }

    #[test]
    fn test_unknown_id() {
        assert!(matches!(
            SampleTreeSource.fetch_tree("other"),
            Err(ViewerError::NotFound(_))
        ));
    }
}
