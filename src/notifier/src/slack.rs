use crate::error::{NotifierError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SlackMessage {
    pub text: String,
}

impl SlackMessage {
    pub fn issue_created(html_url: &str) -> Self {
        Self {
            text: format!("Issue Created: {}", html_url),
        }
    }
}

/// Posts messages to a Slack incoming webhook.
#[derive(Debug, Clone)]
pub struct SlackClient {
    client: Client,
    webhook_url: String,
}

impl SlackClient {
    pub fn new(webhook_url: String) -> Self {
        Self {
            client: Client::new(),
            webhook_url,
        }
    }

    /// Sends one message and returns Slack's response body.
    ///
    /// Anything other than `200 OK` is a rejection; the body of a rejected
    /// response is not read.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn post(&self, message: &SlackMessage, timeout: Option<Duration>) -> Result<String> {
        let payload =
            serde_json::to_vec(message).map_err(|e| NotifierError::Encode(e.to_string()))?;

        let mut request = self
            .client
            .post(&self.webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NotifierError::Delivery(e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Slack responded");
        if status != StatusCode::OK {
            return Err(NotifierError::Upstream(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| NotifierError::ResponseRead(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_created_text() {
        let message = SlackMessage::issue_created("https://example.com/issue");
        assert_eq!(message.text, "Issue Created: https://example.com/issue");
    }

    #[test]
    fn test_message_wire_format() {
        let message = SlackMessage::issue_created("https://x/y");
        assert_eq!(
            serde_json::to_string(&message).unwrap(),
            r#"{"text":"Issue Created: https://x/y"}"#
        );
    }
}
