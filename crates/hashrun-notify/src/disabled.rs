//! Notifier used when delivery is administratively disabled.

use async_trait::async_trait;
use tracing::info;

use crate::notifier::Notifier;

/// Writes every message to the operational log instead of sending it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, message: &str) {
        info!(notification = %message, "NTFY");
    }
}
