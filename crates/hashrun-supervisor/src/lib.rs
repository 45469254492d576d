//! Supervision of a hashcat attack.
//!
//! [`AttackSupervisor`] launches hashcat with a machine-readable status
//! stream, pumps that stream into periodic progress notifications and, on
//! a second task, tails hashcat's results file so every recovered secret is
//! announced as soon as it is written.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use hashrun_notify::LogNotifier;
//! use hashrun_supervisor::{AttackSupervisor, SupervisorConfig};
//!
//! async fn crack() -> Result<i32, Box<dyn std::error::Error>> {
//!     let supervisor =
//!         AttackSupervisor::new(SupervisorConfig::default(), std::sync::Arc::new(LogNotifier));
//!
//!     let outcome = supervisor
//!         .run(
//!             &[PathBuf::from("/tmp/hashes.txt")],
//!             &["-m".to_string(), "0".to_string(), "-a".to_string(), "3".to_string(), "?d?d?d?d".to_string()],
//!         )
//!         .await?;
//!
//!     Ok(outcome.exit_code)
//! }
//! ```

mod command;
mod config;
mod error;
mod supervisor;
mod tailer;

pub use command::AttackCommand;
pub use config::SupervisorConfig;
pub use error::SupervisorError;
pub use supervisor::{AttackSupervisor, RunOutcome, EXIT_CODE_UNKNOWN};
pub use tailer::{ResultTailer, TailerStats};
