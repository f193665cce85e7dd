//! Storage configuration.

use std::path::PathBuf;

/// Configuration options for opening the store.
///
/// How these values are populated (CLI, file, environment) is up to the
/// embedding process; this struct is the boundary.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory housing the engine's files. Created if absent.
    pub dir: PathBuf,
    /// Engine cache size in bytes. If not set, uses the engine's default.
    pub cache_size: Option<usize>,
}

impl Config {
    /// Create a new configuration with the given data directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), cache_size: None }
    }

    /// Set the engine cache size.
    #[must_use]
    pub const fn cache_size(mut self, size: usize) -> Self {
        self.cache_size = Some(size);
        self
    }
}
