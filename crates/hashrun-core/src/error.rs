//! Core domain errors.

use thiserror::Error;

/// Core domain errors for hashrun.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A status line was valid JSON but not a status object.
    #[error("Not a status object: {0}")]
    NotAStatus(String),

    /// A status line could not be decoded.
    #[error("Status decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
