//! Error types for artifact staging.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while staging an artifact.
///
/// Any of these aborts startup: no run begins with partially staged input.
#[derive(Debug, Error)]
pub enum StageError {
    /// Transport failure while downloading.
    #[error("Download failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Download of '{url}' failed with HTTP {status}")]
    Status { url: String, status: u16 },

    /// Writing a staged file failed.
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `.gz` payload could not be decompressed.
    #[error("Failed to gunzip '{name}': {source}")]
    Gunzip {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A `.tar` payload could not be unpacked.
    #[error("Failed to untar '{name}': {source}")]
    Untar {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A tar archive held no regular files.
    #[error("Archive '{0}' contains no files")]
    EmptyArchive(String),

    /// The blocking unpack task panicked or was cancelled.
    #[error("Unpack task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
