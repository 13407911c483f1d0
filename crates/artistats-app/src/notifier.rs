//! ntfy push notifications

use artistats_common::{describe_reqwest_error, ArtistatsError, Result};
use artistats_config::NotifyConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Publishes plain-text messages to one ntfy topic
#[derive(Debug, Clone)]
pub struct Notifier {
    client: Client,
    base_url: String,
    topic: String,
}

impl Notifier {
    /// Create a notifier for `topic` on the relay at `base_url`
    pub fn new(
        base_url: impl Into<String>,
        topic: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ArtistatsError::ConfigParse {
                message: "Failed to create HTTP client".to_string(),
                path: None,
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            topic: topic.into(),
        })
    }

    pub fn from_config(config: &NotifyConfig, timeout_secs: u64) -> Result<Self> {
        Self::new(&config.base_url, &config.topic, timeout_secs)
    }

    /// Topic URL the message is posted to
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, self.topic)
    }

    /// POST `message` as the raw request body
    #[instrument(skip(self, message), fields(topic = %self.topic))]
    pub async fn notify(&self, message: &str) -> Result<()> {
        let url = self.endpoint();
        debug!("Publishing notification to {}", url);

        let response = self
            .client
            .post(&url)
            .body(message.to_owned())
            .send()
            .await
            .map_err(|e| {
                ArtistatsError::notify_with_source(
                    format!("Notification request failed: {}", describe_reqwest_error(&e)),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArtistatsError::notify_with_status(
                format!("Notification relay returned {status}"),
                status.as_u16(),
            ));
        }

        info!("Notification sent");
        Ok(())
    }
}
