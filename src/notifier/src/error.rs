use thiserror::Error;

pub type Result<T> = std::result::Result<T, NotifierError>;

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("error parsing JSON input: {0}")]
    Decode(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("error encoding Slack payload: {0}")]
    Encode(String),

    #[error("error sending message to Slack: {0}")]
    Delivery(String),

    #[error("unexpected status code from Slack: {0}")]
    Upstream(u16),

    #[error("error reading Slack response body: {0}")]
    ResponseRead(String),
}

impl NotifierError {
    /// Status code returned by Slack, when the webhook rejected the message.
    pub fn status(&self) -> Option<u16> {
        match self {
            NotifierError::Upstream(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for NotifierError {
    fn from(error: serde_json::Error) -> Self {
        NotifierError::Decode(error.to_string())
    }
}
