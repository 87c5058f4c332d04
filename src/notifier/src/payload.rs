use crate::error::{NotifierError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The part of a GitHub `issues` webhook the notifier cares about.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct IssueEvent {
    pub issue: Issue,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Issue {
    pub html_url: String,
}

impl IssueEvent {
    pub fn html_url(&self) -> &str {
        &self.issue.html_url
    }

    /// Rejects events that carry no usable issue link.
    pub fn validate(&self) -> Result<()> {
        if self.issue.html_url.trim().is_empty() {
            return Err(NotifierError::Decode("issue.html_url is empty".to_string()));
        }
        Ok(())
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}

// API gateway proxy shape: the webhook document arrives as an escaped string.
#[derive(Debug, Deserialize)]
struct GatewayEnvelope {
    body: String,
    #[serde(default, rename = "isBase64Encoded")]
    is_base64_encoded: bool,
}

impl GatewayEnvelope {
    fn into_issue_event(self) -> Result<IssueEvent> {
        let event: IssueEvent = if self.is_base64_encoded {
            let raw = STANDARD
                .decode(self.body.as_bytes())
                .map_err(|e| NotifierError::Decode(format!("invalid base64 body: {}", e)))?;
            serde_json::from_slice(&raw)?
        } else {
            serde_json::from_str(&self.body)?
        };
        event.validated()
    }
}

/// How the inbound document wraps the issue payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Envelope {
    /// `{"issue": {"html_url": ...}}` at the top level.
    #[default]
    Direct,
    /// `{"body": "<escaped issue document>"}` as delivered by an API gateway.
    Body,
}

impl Envelope {
    pub fn unwrap_bytes(&self, input: &[u8]) -> Result<IssueEvent> {
        match self {
            Envelope::Direct => serde_json::from_slice::<IssueEvent>(input)?.validated(),
            Envelope::Body => serde_json::from_slice::<GatewayEnvelope>(input)?.into_issue_event(),
        }
    }

    pub fn unwrap_value(&self, input: Value) -> Result<IssueEvent> {
        match self {
            Envelope::Direct => serde_json::from_value::<IssueEvent>(input)?.validated(),
            Envelope::Body => serde_json::from_value::<GatewayEnvelope>(input)?.into_issue_event(),
        }
    }
}

impl FromStr for Envelope {
    type Err = NotifierError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(Envelope::Direct),
            "body" | "gateway" => Ok(Envelope::Body),
            _ => Err(NotifierError::Config(format!(
                "Unknown envelope: {}. Use: direct or body",
                s
            ))),
        }
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Envelope::Direct => f.write_str("direct"),
            Envelope::Body => f.write_str("body"),
        }
    }
}
