//! Forwards GitHub "issue created" webhooks to a Slack incoming webhook.
//!
//! The same core serves every deployment: the host adapter picks an
//! [`Envelope`] (or decodes [`IssueEvent`] itself) and injects a
//! [`NotifierConfig`] resolved once at start-up.

pub mod config;
pub mod error;
pub mod notifier;
pub mod payload;
pub mod slack;

pub use config::NotifierConfig;
pub use error::{NotifierError, Result};
pub use notifier::Notifier;
pub use payload::{Envelope, Issue, IssueEvent};
pub use slack::{SlackClient, SlackMessage};
