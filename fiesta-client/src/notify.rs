//! Local notification dispatch
//!
//! Status changes observed through the realtime feed surface as local
//! notifications. The dispatcher is a trait so tests and headless runs
//! can swap in the logging implementation.

use crate::error::ClientResult;
use async_trait::async_trait;

/// A local notification ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Channel/topic the notification is grouped under
    pub channel: String,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            channel: channel.into(),
        }
    }
}

/// Notification dispatcher (platform collaborator, interface only)
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> ClientResult<()>;
}

/// Dispatcher that writes notifications to the log
///
/// Used in tests and on platforms without a notification surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) -> ClientResult<()> {
        tracing::info!(
            channel = %notification.channel,
            title = %notification.title,
            body = %notification.body,
            "notification"
        );
        Ok(())
    }
}
