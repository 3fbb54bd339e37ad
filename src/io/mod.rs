//! I/O modules for background document loading.

pub mod async_loader;
pub mod file_loader;

// Re-export commonly used types
pub use async_loader::{AsyncLoader, LoadResult, OutlineRequest};
pub use file_loader::{LoadKind, LoadingState};
