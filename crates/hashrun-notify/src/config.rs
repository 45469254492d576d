//! Notification configuration.

use std::time::Duration;

/// Notification configuration.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Base URL of the ntfy server.
    pub server: String,

    /// Topic to publish to. Required unless `disabled` is set.
    pub topic: Option<String>,

    /// Title header attached to every message.
    pub title: String,

    /// Log messages instead of sending them.
    pub disabled: bool,

    /// Upper bound for a single delivery attempt.
    pub timeout: Duration,
}

impl NotifyConfig {
    /// Full publish URL for the configured topic.
    pub fn topic_url(&self) -> Option<String> {
        self.topic.as_deref().map(|topic| {
            format!(
                "{}/{}",
                self.server.trim_end_matches('/'),
                topic.trim_start_matches('/')
            )
        })
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            server: "https://ntfy.sh".to_string(),
            topic: None,
            title: "Hashcat updates".to_string(),
            disabled: false,
            timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_url() {
        let config = NotifyConfig {
            server: "https://ntfy.example.com/".to_string(),
            topic: Some("cracks".to_string()),
            ..NotifyConfig::default()
        };
        assert_eq!(
            config.topic_url().as_deref(),
            Some("https://ntfy.example.com/cracks")
        );

        assert_eq!(NotifyConfig::default().topic_url(), None);
    }
}
