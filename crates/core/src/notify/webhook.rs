use crate::config::Settings;
use crate::notify::{Notification, Notifier};
use anyhow::Context;
use std::time::Duration;

/// POSTs each notification as JSON to a configured URL.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    http: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let url = settings.require_notify_webhook_url()?.to_string();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.notify_timeout_secs))
            .build()
            .context("failed to build notification http client")?;
        Ok(Self { http, url })
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    fn channel(&self) -> &'static str {
        "webhook"
    }

    async fn send(&self, notification: &Notification) -> anyhow::Result<bool> {
        let res = self
            .http
            .post(&self.url)
            .json(notification)
            .send()
            .await
            .context("notification webhook request failed")?;

        let status = res.status();
        if !status.is_success() {
            tracing::debug!(
                %status,
                url = %self.url,
                "notification webhook returned non-success"
            );
        }
        Ok(status.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_url() {
        assert!(WebhookNotifier::from_settings(&Settings::default()).is_err());

        let settings = Settings {
            notify_webhook_url: Some("http://127.0.0.1:9/hook".to_string()),
            ..Settings::default()
        };
        let notifier = WebhookNotifier::from_settings(&settings).unwrap();
        assert_eq!(notifier.channel(), "webhook");
    }
}
