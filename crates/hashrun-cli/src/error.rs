//! Startup and run errors of the binary.

use hashrun_stager::StageError;
use hashrun_supervisor::SupervisorError;
use thiserror::Error;

/// Process exit status when no hash target was configured.
pub const EXIT_MISSING_TARGET: i32 = 2;

/// Errors that stop a run before or while hashcat is started.
#[derive(Debug, Error)]
pub enum RunError {
    /// Neither a hash argument nor a hashes URL was given.
    #[error("No hash given and HASHES_URL is not set")]
    MissingTarget,

    /// Hashes or wordlists could not be staged.
    #[error("Staging failed: {0}")]
    Stage(#[from] StageError),

    /// hashcat could not be started.
    #[error("Supervisor failed: {0}")]
    Supervisor(#[from] SupervisorError),
}
