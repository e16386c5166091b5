//! Outbound notifications for high-confidence signals and market alerts.
//!
//! Delivery is best effort: [`deliver`] logs failures and never propagates
//! them, so a broken channel cannot abort the operation that triggered it.

pub mod messages;
pub mod webhook;

use crate::config::Settings;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    fn channel(&self) -> &'static str;

    /// `Ok(false)` means the channel answered but did not accept the message.
    async fn send(&self, notification: &Notification) -> anyhow::Result<bool>;
}

/// Sends and swallows any failure, returning whether the message went out.
pub async fn deliver(notifier: &dyn Notifier, notification: Notification) -> bool {
    match notifier.send(&notification).await {
        Ok(true) => true,
        Ok(false) => {
            tracing::warn!(
                channel = notifier.channel(),
                subject = %notification.subject,
                "notification rejected"
            );
            false
        }
        Err(err) => {
            tracing::warn!(
                channel = notifier.channel(),
                subject = %notification.subject,
                error = %format!("{err:#}"),
                "notification failed"
            );
            false
        }
    }
}

/// Picks the webhook channel when one is configured, the log channel otherwise.
pub fn from_settings(settings: &Settings) -> anyhow::Result<Arc<dyn Notifier>> {
    if settings.notify_webhook_url.is_some() {
        let webhook = webhook::WebhookNotifier::from_settings(settings)?;
        return Ok(Arc::new(webhook));
    }
    Ok(Arc::new(LogNotifier))
}

/// Writes notifications to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    fn channel(&self) -> &'static str {
        "log"
    }

    async fn send(&self, notification: &Notification) -> anyhow::Result<bool> {
        tracing::info!(
            subject = %notification.subject,
            body = %notification.body,
            context = ?notification.context,
            "notification"
        );
        Ok(true)
    }
}

/// Keeps every notification in memory; used by the worker report and tests.
#[derive(Debug)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<Notification>>,
    accept: bool,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            accept: true,
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for MemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Notifier for MemoryNotifier {
    fn channel(&self) -> &'static str {
        "memory"
    }

    async fn send(&self, notification: &Notification) -> anyhow::Result<bool> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notification.clone());
        Ok(self.accept)
    }
}
