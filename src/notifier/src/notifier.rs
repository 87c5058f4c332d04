use crate::config::NotifierConfig;
use crate::error::Result;
use crate::payload::{Envelope, IssueEvent};
use crate::slack::{SlackClient, SlackMessage};
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// Relays GitHub "issue created" events to a Slack incoming webhook.
///
/// Every successful decode results in exactly one POST; nothing is retried.
#[derive(Debug, Clone)]
pub struct Notifier {
    slack: SlackClient,
    envelope: Envelope,
    timeout: Duration,
}

impl Notifier {
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            slack: SlackClient::new(config.slack_url),
            envelope: config.envelope,
            timeout: config.request_timeout,
        }
    }

    pub fn envelope(&self) -> Envelope {
        self.envelope
    }

    /// Copy of this notifier whose request never outlives `remaining`.
    pub fn bounded(&self, remaining: Duration) -> Self {
        let mut bounded = self.clone();
        bounded.timeout = bounded.timeout.min(remaining);
        bounded
    }

    /// Decodes raw bytes through the configured envelope and notifies Slack.
    pub async fn notify(&self, input: &[u8]) -> Result<String> {
        let event = self.envelope.unwrap_bytes(input)?;
        self.notify_issue(&event).await
    }

    pub async fn notify_value(&self, input: Value) -> Result<String> {
        let event = self.envelope.unwrap_value(input)?;
        self.notify_issue(&event).await
    }

    pub async fn notify_issue(&self, event: &IssueEvent) -> Result<String> {
        event.validate()?;
        let message = SlackMessage::issue_created(event.html_url());
        info!(html_url = %event.html_url(), "Forwarding issue to Slack");
        self.slack.post(&message, Some(self.timeout)).await
    }
}
