use clap::Parser;
use issue_notifier::{Envelope, Notifier, NotifierConfig, NotifierError, Result};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::debug;

const SAMPLE_EVENT: &str = r#"{"issue": {"html_url": "https://example.com/issue"}}"#;

/// Send a GitHub "issue created" event to a Slack incoming webhook.
#[derive(Debug, Parser)]
#[command(name = "issue-notifier", version)]
struct Args {
    /// Slack incoming webhook URL
    #[arg(long, env = "SLACK_URL", hide_env_values = true)]
    slack_url: Option<String>,

    /// How the event document wraps the issue: direct or body
    #[arg(long, env = "NOTIFIER_ENVELOPE", default_value = "direct")]
    envelope: Envelope,

    /// Seconds to wait for Slack before giving up
    #[arg(long, env = "SLACK_TIMEOUT_SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Event file to send, or `-` for stdin. Sends a sample event when omitted.
    input: Option<PathBuf>,
}

fn read_input(input: Option<&PathBuf>) -> Result<Vec<u8>> {
    let read_err = |e: std::io::Error| NotifierError::Decode(format!("error reading input: {}", e));
    match input {
        None => Ok(SAMPLE_EVENT.as_bytes().to_vec()),
        Some(path) if path.as_os_str() == "-" => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf).map_err(read_err)?;
            Ok(buf)
        }
        Some(path) => std::fs::read(path).map_err(read_err),
    }
}

async fn execute(args: Args) -> Result<String> {
    let input = read_input(args.input.as_ref())?;
    let mut config = NotifierConfig::new(args.slack_url.unwrap_or_default())?.with_envelope(args.envelope);
    if let Some(secs) = args.timeout_secs {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    debug!(envelope = %config.envelope, "Sending event");
    Notifier::new(config).notify(&input).await
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .without_time()
        .init();

    match execute(Args::parse()).await {
        Ok(body) => {
            println!("Response from Slack: {}", body);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "issue-notifier",
            "--slack-url",
            "https://hooks.slack.com/services/T/B/X",
            "--envelope",
            "body",
            "event.json",
        ])
        .unwrap();
        assert_eq!(args.envelope, Envelope::Body);
        assert_eq!(args.input, Some(PathBuf::from("event.json")));
    }

    #[test]
    fn test_timeout_flag() {
        let args = Args::try_parse_from(["issue-notifier", "--timeout-secs", "3"]).unwrap();
        assert_eq!(args.timeout_secs, Some(3));
        assert!(Args::try_parse_from(["issue-notifier", "--timeout-secs", "0"]).is_err());
        assert!(Args::try_parse_from(["issue-notifier", "--timeout-secs", "soon"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_envelope() {
        assert!(Args::try_parse_from(["issue-notifier", "--envelope", "xml"]).is_err());
    }

    #[test]
    fn test_sample_event_without_input() {
        let input = read_input(None).unwrap();
        let event = Envelope::Direct.unwrap_bytes(&input).unwrap();
        assert_eq!(event.html_url(), "https://example.com/issue");
    }

    #[test]
    fn test_missing_input_file() {
        let missing = PathBuf::from("/nonexistent/issue-event.json");
        assert!(matches!(read_input(Some(&missing)), Err(NotifierError::Decode(_))));
    }
}
