use crate::error::{NotifierError, Result};
use crate::payload::Envelope;
use reqwest::Url;
use std::env;
use std::time::Duration;

pub const SLACK_URL: &str = "SLACK_URL";
pub const NOTIFIER_ENVELOPE: &str = "NOTIFIER_ENVELOPE";
pub const SLACK_TIMEOUT_SECS: &str = "SLACK_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub slack_url: String,
    pub envelope: Envelope,
    pub request_timeout: Duration,
}

impl NotifierConfig {
    pub fn new(slack_url: impl Into<String>) -> Result<Self> {
        let slack_url = slack_url.into().trim().to_string();
        if slack_url.is_empty() {
            return Err(NotifierError::Config(format!(
                "{} environment variable is not set",
                SLACK_URL
            )));
        }

        let parsed = Url::parse(&slack_url)
            .map_err(|e| NotifierError::Config(format!("{}: {}", SLACK_URL, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(NotifierError::Config(format!(
                "{}: unsupported scheme {}",
                SLACK_URL,
                parsed.scheme()
            )));
        }

        Ok(Self {
            slack_url,
            envelope: Envelope::default(),
            request_timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source shaped like the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(lookup(SLACK_URL).unwrap_or_default())?;

        if let Some(envelope) = lookup(NOTIFIER_ENVELOPE) {
            config.envelope = envelope.parse()?;
        }

        if let Some(secs) = lookup(SLACK_TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e| NotifierError::Config(format!("{}: {}", SLACK_TIMEOUT_SECS, e)))?;
            if secs == 0 {
                return Err(NotifierError::Config(format!(
                    "{} must be greater than zero",
                    SLACK_TIMEOUT_SECS
                )));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
