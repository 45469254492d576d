//! In-process notifier backed by a channel.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::trace;

use crate::notifier::Notifier;

/// Forwards every message to an unbounded channel.
///
/// Useful for embedding the supervisor in a larger program, or for
/// observing notifications in tests.
///
/// # Example
///
/// ```rust
/// use hashrun_notify::{ChannelNotifier, Notifier};
///
/// # async fn demo() {
/// let (notifier, mut rx) = ChannelNotifier::new();
/// notifier.notify("hello").await;
/// assert_eq!(rx.recv().await.as_deref(), Some("hello"));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    message_tx: mpsc::UnboundedSender<String>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiver for its messages.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { message_tx: tx }, rx)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn notify(&self, message: &str) {
        // Receiver might be dropped
        if self.message_tx.send(message.to_string()).is_err() {
            trace!("Notification receiver dropped");
        }
    }
}
