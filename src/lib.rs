pub mod cache;
pub mod config;
pub mod document;
pub mod error;
pub mod filter;
pub mod logging;
pub mod sample;
pub mod scroll_sync;
pub mod server;
pub mod shell;
pub mod source;
pub mod split_pane;
pub mod store;
pub mod theme;

// Export the data model
pub use document::{
    export_json, node_at, parse_tree, ContentType, DocumentNode, DocumentTree, NodePath,
    EXPORT_FILE_NAME,
};

// Export error types
pub use error::{Result, ViewerError};

// Export the view core
pub use filter::{filter_tree, ContentFilter};
pub use scroll_sync::{
    Pane, ScrollMetrics, ScrollSynchronizer, ScrollViewport, SyncOutcome, SyncState, TrackedPane,
};
pub use shell::{Listener, SourceStatus, ViewState, ViewerShell};
pub use split_pane::{ContainerBounds, SplitPaneController};

// Export data sources
pub use sample::{sample_tree, SampleTreeSource, SAMPLE_DOCUMENT_ID};
pub use source::{LopdfPageSource, PageIndicator, PageSource};
pub use store::{DocumentStore, DocumentSummary, TreeSource};

// Export theme support
pub use theme::{hex_to_color32, with_alpha, Theme, ThemeColors, ThemeManager};
