//! Notifications for hashrun.
//!
//! A [`Notifier`] delivers short plain-text messages about a run. Delivery
//! is best-effort: implementations log failures and never hand them back to
//! the caller, so a dead endpoint cannot abort or fail a run.
//!
//! # Example
//!
//! ```rust,no_run
//! use hashrun_notify::{build_notifier, NotifyConfig};
//!
//! async fn announce() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NotifyConfig {
//!         topic: Some("my-cracking-box".to_string()),
//!         ..NotifyConfig::default()
//!     };
//!     let notifier = build_notifier(&config)?;
//!     notifier.notify("Attack started").await;
//!     Ok(())
//! }
//! ```

mod channel;
mod config;
mod disabled;
mod error;
mod notifier;
mod ntfy;

pub use channel::ChannelNotifier;
pub use config::NotifyConfig;
pub use disabled::LogNotifier;
pub use error::NotifyError;
pub use notifier::{build_notifier, Notifier};
pub use ntfy::NtfyNotifier;
