use futures::{Stream, StreamExt};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

use crate::config::NotificationTexts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A short-lived message with a single dismiss action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub action: String,
    /// Auto-dismiss delay.
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(message: impl Into<String>, texts: &NotificationTexts) -> Self {
        Self::build(message, texts, NotificationLevel::Info)
    }

    pub fn error(message: impl Into<String>, texts: &NotificationTexts) -> Self {
        Self::build(message, texts, NotificationLevel::Error)
    }

    fn build(message: impl Into<String>, texts: &NotificationTexts, level: NotificationLevel) -> Self {
        Self {
            message: message.into(),
            action: texts.action.clone(),
            duration: texts.duration,
            level,
        }
    }
}

/// Presents notifications to the user. Each call is independent: no queuing
/// and no coalescing.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Sink that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, n: Notification) {
        match n.level {
            NotificationLevel::Info => {
                tracing::info!(text = %n.message, duration_ms = n.duration.as_millis() as u64, "notification")
            }
            NotificationLevel::Error => {
                tracing::warn!(text = %n.message, duration_ms = n.duration.as_millis() as u64, "notification")
            }
        }
    }
}

/// Fan-out sink built on `tokio::sync::broadcast`.
/// Bounded: subscribers that lag lose the oldest notifications.
#[derive(Clone)]
pub struct BroadcastNotificationSink {
    tx: broadcast::Sender<Notification>,
}

impl BroadcastNotificationSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Stream of notifications sent after this call; lag errors are skipped.
    pub fn subscribe(&self) -> impl Stream<Item = Notification> {
        BroadcastStream::new(self.tx.subscribe()).filter_map(|res| async move { res.ok() })
    }
}

impl NotificationSink for BroadcastNotificationSink {
    fn notify(&self, notification: Notification) {
        // No subscribers is not an error.
        let _ = self.tx.send(notification);
    }
}
