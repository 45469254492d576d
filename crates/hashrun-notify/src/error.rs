//! Error types for notification delivery.

use thiserror::Error;

/// Errors that can occur while building or delivering a notification.
///
/// These never escape [`Notifier::notify`](crate::Notifier::notify); they are
/// returned by the lower-level constructors and `publish` calls only.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Notifications are enabled but no topic was configured.
    #[error("ntfy topic is not configured")]
    MissingTopic,

    /// Transport failure: timeout, refused connection, TLS, etc.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("ntfy rejected message with HTTP {status}")]
    Rejected { status: u16 },
}
