//! Error types for loading and batch parsing.
//!
//! Markup problems never surface here: a page with missing sections still
//! parses. Only failures to read or decompress the source are errors.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to obtain the decoded text of a man page.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to open man page '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid gzip data.
    #[error("failed to decompress man page '{}': {source}", .path.display())]
    Decompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Path of the page that failed to load.
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. } | Self::Decompress { path, .. } => path,
        }
    }
}

/// Errors raised while collecting or scheduling a batch of pages.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Filesystem I/O failure while scanning input directories.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing input (e.g. non-existent path).
    #[error("{0}")]
    InvalidInput(String),

    /// The worker pool could not be created.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Convenience alias for results with [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;
