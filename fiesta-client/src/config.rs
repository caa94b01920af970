//! Client configuration

use std::time::Duration;

/// Configuration for connecting to the hosted backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g. "https://project.example.co/rest/v1")
    pub base_url: String,

    /// Publishable API key sent with every request
    pub api_key: String,

    /// Per-request timeout. The source flows this was ported from had
    /// none at all (a request could hang forever); every outbound call
    /// here is bounded.
    pub request_timeout: Duration,

    /// Device notification channel for status-change notifications
    pub notification_channel: String,
}

impl ClientConfig {
    /// Create a new configuration with defaults
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            request_timeout: Duration::from_secs(10),
            notification_channel: "reservations".to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the notification channel
    pub fn with_notification_channel(mut self, channel: impl Into<String>) -> Self {
        self.notification_channel = channel.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:54321/rest/v1", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.notification_channel, "reservations");
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new("https://api.example.com", "key")
            .with_timeout(Duration::from_secs(3))
            .with_notification_channel("bookings");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.notification_channel, "bookings");
    }
}
