//! hashrun Core Domain Types
//!
//! This crate contains the pure domain of a supervised hashcat run:
//! - Decoding of the machine-readable status stream
//! - Progress summaries built from decoded snapshots
//! - The notification throttle owned by the supervisor
//!
//! Nothing here performs I/O, spawns processes or talks to the network.

pub mod error;
pub mod run_state;
pub mod status;
pub mod summary;

// Re-export commonly used types
pub use error::CoreError;
pub use run_state::RunState;
pub use status::{parse_status_line, DeviceStatus, StatusSnapshot};
pub use summary::{format_elapsed, ProgressSummary};
