//! Filesystem-backed document store.
//!
//! Layout under the store root, one directory per parsed document:
//!
//! ```text
//! <root>/<document id>/output_tree.json
//! <root>/<document id>/images/<image name>
//! ```
//!
//! Identifiers and image names are validated before any path is built from
//! them.

use crate::document::{self, DocumentTree};
use crate::error::{Result, ViewerError};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the outline file inside a document directory.
pub const TREE_FILE_NAME: &str = "output_tree.json";
/// Name of the image directory inside a document directory.
pub const IMAGES_DIR_NAME: &str = "images";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "bmp"];

/// Supplies outline trees by document identifier.
pub trait TreeSource: Send + Sync {
    fn fetch_tree(&self, document_id: &str) -> Result<DocumentTree>;
}

/// One entry of the document listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: String,
    pub has_tree: bool,
    pub image_count: usize,
}

/// Rejects empty values and anything that could escape its directory.
pub fn validate_segment(kind: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ViewerError::InvalidInput(format!("{kind} is required")));
    }
    if value.contains("..") || value.contains('/') || value.contains('\\') {
        return Err(ViewerError::InvalidInput(format!("invalid {kind}")));
    }
    Ok(())
}

/// MIME type for an image file name, by extension.
pub fn image_content_type(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

fn is_image_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Document store rooted at an outputs directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_dir(&self, document_id: &str) -> Result<PathBuf> {
        validate_segment("document id", document_id)?;
        let dir = self.root.join(document_id);
        if !dir.is_dir() {
            return Err(ViewerError::NotFound(format!("document '{document_id}'")));
        }
        Ok(dir)
    }

    /// Lists every document directory, sorted by identifier.
    ///
    /// A missing root is an empty store, not an error.
    pub fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        if !self.root.is_dir() {
            tracing::warn!(root = %self.root.display(), "outputs directory does not exist");
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(id) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            let has_tree = entry.path().join(TREE_FILE_NAME).is_file();
            let image_count = self.list_images(&id).map(|images| images.len()).unwrap_or(0);
            documents.push(DocumentSummary {
                id,
                has_tree,
                image_count,
            });
        }
        documents.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(documents)
    }

    /// Lists the image file names of a document, sorted.
    pub fn list_images(&self, document_id: &str) -> Result<Vec<String>> {
        let images_dir = self.document_dir(document_id)?.join(IMAGES_DIR_NAME);
        if !images_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut images = Vec::new();
        for entry in fs::read_dir(images_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if is_image_name(name) {
                    images.push(name.to_owned());
                }
            }
        }
        images.sort();
        Ok(images)
    }

    /// Resolves the path of one image, checking that it exists.
    pub fn image_path(&self, document_id: &str, image_name: &str) -> Result<PathBuf> {
        validate_segment("image name", image_name)?;
        let path = self
            .document_dir(document_id)?
            .join(IMAGES_DIR_NAME)
            .join(image_name);
        if !path.is_file() {
            return Err(ViewerError::NotFound(format!("image '{image_name}'")));
        }
        Ok(path)
    }

    /// Reads one image, returning its bytes and MIME type.
    pub fn read_image(&self, document_id: &str, image_name: &str) -> Result<(Vec<u8>, &'static str)> {
        let path = self.image_path(document_id, image_name)?;
        Ok((fs::read(path)?, image_content_type(image_name)))
    }
}

impl TreeSource for DocumentStore {
    fn fetch_tree(&self, document_id: &str) -> Result<DocumentTree> {
        let path = self.document_dir(document_id)?.join(TREE_FILE_NAME);
        if !path.is_file() {
            return Err(ViewerError::NotFound(format!("structure of document '{document_id}'")));
        }
        let json = fs::read_to_string(&path)?;
        let tree = document::parse_tree(&json)?;
        tracing::debug!(document_id, sections = tree.len(), "loaded document tree");
        Ok(tree)
    }
}
