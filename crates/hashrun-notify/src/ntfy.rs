//! Delivery to an ntfy.sh pub/sub topic.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::config::NotifyConfig;
use crate::error::NotifyError;
use crate::notifier::Notifier;

/// Publishes plain-text messages to an ntfy topic over HTTP.
#[derive(Debug, Clone)]
pub struct NtfyNotifier {
    client: reqwest::Client,
    url: String,
    title: String,
}

impl NtfyNotifier {
    /// Create a notifier for the topic in `config`.
    ///
    /// Every request is bounded by `config.timeout`.
    pub fn new(config: &NotifyConfig) -> Result<Self, NotifyError> {
        let url = config.topic_url().ok_or(NotifyError::MissingTopic)?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            url,
            title: config.title.clone(),
        })
    }

    /// Publish URL of the topic.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one message and report the outcome.
    pub async fn publish(&self, message: &str) -> Result<(), NotifyError> {
        debug!(url = %self.url, len = message.len(), "Publishing notification");

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "text/plain")
            .header("Title", &self.title)
            .body(message.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for NtfyNotifier {
    async fn notify(&self, message: &str) {
        if let Err(e) = self.publish(message).await {
            warn!(error = %e, url = %self.url, "Failed to deliver notification");
        }
    }
}
