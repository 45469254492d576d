//! The notifier seam.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::NotifyConfig;
use crate::error::NotifyError;
use crate::disabled::LogNotifier;
use crate::ntfy::NtfyNotifier;

/// Sink for run notifications.
///
/// `notify` has no error channel on purpose: implementations record their
/// own failures through `tracing` and return normally.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a message, best-effort.
    async fn notify(&self, message: &str);
}

/// Build the notifier selected by `config`.
///
/// Returns a [`LogNotifier`] when notifications are disabled, otherwise an
/// [`NtfyNotifier`] for the configured topic.
pub fn build_notifier(config: &NotifyConfig) -> Result<Arc<dyn Notifier>, NotifyError> {
    if config.disabled {
        info!("Notifications disabled, messages will be logged only");
        return Ok(Arc::new(LogNotifier::new()));
    }

    let notifier = NtfyNotifier::new(config)?;
    info!(url = %notifier.url(), "Notifications enabled");
    Ok(Arc::new(notifier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_builds_without_topic() {
        let config = NotifyConfig {
            disabled: true,
            ..NotifyConfig::default()
        };
        assert!(build_notifier(&config).is_ok());
    }

    #[test]
    fn test_enabled_requires_topic() {
        let result = build_notifier(&NotifyConfig::default());
        assert!(matches!(result, Err(NotifyError::MissingTopic)));
    }
}
