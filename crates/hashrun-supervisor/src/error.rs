//! Error types for attack supervision.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that prevent a run from starting or being observed.
///
/// A hashcat process that starts and then fails is not an error here; its
/// exit code is reported through [`RunOutcome`](crate::RunOutcome).
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// No hash target was given.
    #[error("No hash targets given")]
    NoTargets,

    /// The results file could not be created.
    #[error("Failed to prepare results file '{path}': {source}")]
    Outfile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to spawn the hashcat process.
    #[error("Failed to spawn '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// A standard stream of the child was not captured.
    #[error("Failed to get {0} of hashcat process")]
    MissingPipe(&'static str),

    /// Waiting for the process failed.
    #[error("Failed to wait for hashcat process: {0}")]
    Wait(#[from] std::io::Error),
}
