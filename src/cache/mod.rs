//! Caching modules for per-frame derivations.

pub mod filter_cache;

// Re-export commonly used types
pub use filter_cache::FilterCache;
