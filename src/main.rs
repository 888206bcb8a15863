//! mailmind - Command-line entry point
//!
//! ```text
//! mailmind ask <query> [--emails FILE] [--events FILE]
//! mailmind reply <email FILE> [--tone TONE] [--context TEXT]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use mailmind::domain::{EventRecord, MessageRecord};
use mailmind::{AssistantSettings, PromptClient};

/// Answers questions about a mailbox and drafts email replies
#[derive(Debug, Parser)]
#[command(name = "mailmind", about, version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Answer a question using recent emails and upcoming events
    Ask {
        /// The question to answer
        query: String,
        /// JSON file with recent messages
        #[arg(long)]
        emails: Option<PathBuf>,
        /// JSON file with upcoming calendar events
        #[arg(long)]
        events: Option<PathBuf>,
    },
    /// Draft a reply to one email
    Reply {
        /// JSON file with the email to answer
        email: PathBuf,
        /// Tone of the reply (default: professional)
        #[arg(long)]
        tone: Option<String>,
        /// Extra context for the reply
        #[arg(long)]
        context: Option<String>,
    },
}

/// A bare JSON array or a Graph list response (`{"value": [...]}`).
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Wrapped { value: Vec<T> },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn read_listing<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    Ok(match read_json::<Listing<T>>(path)? {
        Listing::Bare(items) => items,
        Listing::Wrapped { value } => value,
    })
}

async fn run(command: Command) -> Result<String> {
    let settings = AssistantSettings::load_default()?;
    let client = PromptClient::new(&settings);

    let output = match command {
        Command::Ask {
            query,
            emails,
            events,
        } => {
            let messages: Vec<MessageRecord> = match emails {
                Some(path) => read_listing(&path)?,
                None => Vec::new(),
            };
            let events: Option<Vec<EventRecord>> = events
                .map(|path| read_listing(&path))
                .transpose()?;

            tracing::info!(
                messages = messages.len(),
                events = events.as_ref().map_or(0, Vec::len),
                "Answering query"
            );
            client
                .answer_query(&query, &messages, events.as_deref())
                .await?
        }
        Command::Reply {
            email,
            tone,
            context,
        } => {
            let original: MessageRecord = read_json(&email)?;
            tracing::info!(path = %email.display(), "Drafting reply");
            client
                .draft_reply(&original, context.as_deref(), tone.as_deref())
                .await?
        }
    };
    Ok(output)
}

/// Logs a failed command with its outermost message and full context chain.
fn log_failure(e: &anyhow::Error) {
    tracing::error!(error = %e, chain = %format!("{:#}", e), "Command failed");
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(text) => println!("{text}"),
        Err(e) => {
            log_failure(&e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("mailmind").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    #[test]
    fn parses_ask_with_files() {
        let command =
            parse(&["ask", "what is due?", "--emails", "in.json", "--events", "cal.json"]).unwrap();
        assert_eq!(
            command,
            Command::Ask {
                query: "what is due?".to_string(),
                emails: Some(PathBuf::from("in.json")),
                events: Some(PathBuf::from("cal.json")),
            }
        );
    }

    #[test]
    fn parses_inline_option_values() {
        let command = parse(&["ask", "--emails=in.json", "anything new?"]).unwrap();
        assert_eq!(
            command,
            Command::Ask {
                query: "anything new?".to_string(),
                emails: Some(PathBuf::from("in.json")),
                events: None,
            }
        );
    }

    #[test]
    fn parses_reply_with_defaults() {
        let command = parse(&["reply", "mail.json"]).unwrap();
        assert_eq!(
            command,
            Command::Reply {
                email: PathBuf::from("mail.json"),
                tone: None,
                context: None,
            }
        );
    }

    #[test]
    fn parses_reply_options() {
        let command = parse(&[
            "reply",
            "mail.json",
            "--tone",
            "casual",
            "--context=Running late",
        ])
        .unwrap();
        assert_eq!(
            command,
            Command::Reply {
                email: PathBuf::from("mail.json"),
                tone: Some("casual".to_string()),
                context: Some("Running late".to_string()),
            }
        );
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["summarize", "x"]).is_err());
        assert!(parse(&["ask"]).is_err());
        assert!(parse(&["ask", "q", "--tone", "casual"]).is_err());
        assert!(parse(&["reply", "m.json", "--tone"]).is_err());
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failure_is_logged_with_error_and_chain_fields() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let err = anyhow::anyhow!("connection refused").context("failed to read in.json");
        tracing::subscriber::with_default(subscriber, || log_failure(&err));

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Command failed"));
        assert!(output.contains("error=failed to read in.json"));
        assert!(output.contains("chain=failed to read in.json: connection refused"));
    }

    #[test]
    fn listing_accepts_bare_and_wrapped() {
        let bare: Listing<MessageRecord> = serde_json::from_str(r#"[{"subject": "a"}]"#).unwrap();
        assert!(matches!(bare, Listing::Bare(ref v) if v.len() == 1));

        let wrapped: Listing<EventRecord> =
            serde_json::from_str(r#"{"value": [{"subject": "b"}, {}]}"#).unwrap();
        assert!(matches!(wrapped, Listing::Wrapped { ref value } if value.len() == 2));
    }
}
