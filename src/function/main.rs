use issue_notifier::{IssueEvent, Notifier, NotifierConfig, NotifierError};
use lambda_runtime::{run, service_fn, Context, Error, LambdaEvent};
use serde_json::Value;
use std::str::FromStr;
use std::time::{Duration, SystemTime};
use tracing::{error, info};

const NOTIFIER_MODE: &str = "NOTIFIER_MODE";

/// How the runtime hands the event to us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Untyped JSON, unwrapped through the configured envelope.
    Raw,
    /// Decoded straight into `IssueEvent` by the runtime.
    Typed,
}

impl FromStr for Mode {
    type Err = NotifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(Mode::Raw),
            "typed" => Ok(Mode::Typed),
            _ => Err(NotifierError::Config(format!(
                "Unknown mode: {}. Use: raw or typed",
                s
            ))),
        }
    }
}

// Time left before the runtime gives up on this invocation. A zero deadline
// means the runtime supplied none.
fn remaining(context: &Context) -> Option<Duration> {
    if context.deadline == 0 {
        return None;
    }
    Some(
        context
            .deadline()
            .duration_since(SystemTime::now())
            .unwrap_or(Duration::ZERO),
    )
}

fn for_invocation(notifier: &Notifier, context: &Context) -> Notifier {
    match remaining(context) {
        Some(left) => notifier.bounded(left),
        None => notifier.clone(),
    }
}

async fn raw_handler(notifier: &Notifier, event: LambdaEvent<Value>) -> Result<String, Error> {
    let (payload, context) = event.into_parts();
    info!(request_id = %context.request_id, envelope = %notifier.envelope(), "Received issue event");

    let response = for_invocation(notifier, &context)
        .notify_value(payload)
        .await
        .map_err(|e| {
            error!("{}", e);
            e
        })?;

    Ok(response)
}

async fn typed_handler(notifier: &Notifier, event: LambdaEvent<IssueEvent>) -> Result<String, Error> {
    let (payload, context) = event.into_parts();
    info!(request_id = %context.request_id, "Received typed issue event");

    let response = for_invocation(notifier, &context)
        .notify_issue(&payload)
        .await
        .map_err(|e| {
            error!("{}", e);
            e
        })?;

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .without_time()
        .init();

    // Resolved once per cold start and shared by every invocation.
    let config = NotifierConfig::from_env()?;
    let mode = match std::env::var(NOTIFIER_MODE) {
        Ok(mode) => mode.parse()?,
        Err(_) => Mode::Raw,
    };
    let notifier = Notifier::new(config);
    let notifier = &notifier;

    match mode {
        Mode::Raw => {
            run(service_fn(move |event: LambdaEvent<Value>| async move {
                raw_handler(notifier, event).await
            }))
            .await
        }
        Mode::Typed => {
            run(service_fn(move |event: LambdaEvent<IssueEvent>| async move {
                typed_handler(notifier, event).await
            }))
            .await
        }
    }
}
