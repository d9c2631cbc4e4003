//! Code Meet Hub CLI: validate, submit and list community events.
//!
//! Backend settings come from CODEMEET_BACKEND_URL and CODEMEET_BACKEND_KEY (or a
//! dotenv file passed with --env-file). `validate` and `tags` work offline.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use codemeet_api_client::BackendClient;
use codemeet_cli::{check_draft, init_tracing, load_config, load_draft, print_event_table};
use codemeet_core::validation::process_tags_report;
use codemeet_core::{Identity, StaticAuthContext, ValidationContext};
use codemeet_services::{EventFeed, EventSubmitter, Notification};
use serde::Serialize;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "codemeet", about = "Code Meet Hub event CLI")]
struct Cli {
    /// Dotenv file with backend settings (defaults to .env in the working directory)
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sanitize and validate a draft without contacting the backend
    Validate {
        /// Path to the draft JSON file
        draft: PathBuf,
        /// IANA timezone for the draft's date and time
        #[arg(long, env = "CODEMEET_TIMEZONE", default_value = "UTC")]
        timezone: String,
    },
    /// Submit a draft as the given user
    Submit {
        /// Path to the draft JSON file
        draft: PathBuf,
        /// ID of the signed-in user that will own the event
        #[arg(long, value_name = "UUID")]
        user_id: Uuid,
        /// Email of the signed-in user
        #[arg(long)]
        email: Option<String>,
        /// Access token of the signed-in user; without it the insert runs as the anonymous role
        #[arg(long, env = "CODEMEET_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,
    },
    /// List events ascending by date
    List {
        /// Output format: json or table
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show how a list of tags would be stored
    Tags {
        /// Raw tag values
        tags: Vec<String>,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[derive(Serialize)]
struct SubmitOutput<'a, T: Serialize> {
    notification: &'a Notification,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { draft, timezone } => {
            let timezone: Tz = timezone
                .parse()
                .map_err(|_| anyhow::anyhow!("Unknown timezone '{}'", timezone))?;
            let draft = load_draft(&draft)?;

            let report = check_draft(&draft, &ValidationContext::current(timezone));
            print_json(&report)?;
            if !report.is_valid {
                std::process::exit(1);
            }
        }
        Commands::Submit {
            draft,
            user_id,
            email,
            access_token,
        } => {
            let config = load_config(cli.env_file.as_deref()).context(
                "Failed to load configuration. Set CODEMEET_BACKEND_URL and CODEMEET_BACKEND_KEY",
            )?;
            let draft = load_draft(&draft)?;

            let mut client = BackendClient::from_config(&config)?;
            if let Some(token) = access_token {
                client = client.with_access_token(token);
            }
            let auth = StaticAuthContext::signed_in(Identity::new(user_id, email));
            let submitter = EventSubmitter::new(Arc::new(client), Arc::new(auth))
                .with_timezone(config.timezone);

            match submitter.submit(&draft).await {
                Ok(receipt) => {
                    let notification =
                        Notification::event_created(&receipt.event, &receipt.warnings);
                    print_json(&SubmitOutput {
                        notification: &notification,
                        result: Some(&receipt),
                    })?;
                }
                Err(err) => {
                    let notification = Notification::from_error(&err);
                    print_json(&SubmitOutput::<()> {
                        notification: &notification,
                        result: None,
                    })?;
                    std::process::exit(1);
                }
            }
        }
        Commands::List { format } => {
            let config = load_config(cli.env_file.as_deref()).context(
                "Failed to load configuration. Set CODEMEET_BACKEND_URL and CODEMEET_BACKEND_KEY",
            )?;
            let client = BackendClient::from_config(&config)?;
            let feed = EventFeed::new(Arc::new(client)).load().await;

            if let Some(notification) = &feed.notification {
                eprintln!("{}: {}", notification.title, notification.description);
            }

            match format.as_str() {
                "json" => print_json(&feed.events)?,
                _ => print_event_table(&feed.events, config.timezone),
            }
        }
        Commands::Tags { tags } => {
            let report = process_tags_report(&tags);
            tracing::debug!(
                kept = report.tags.len(),
                rejected = report.rejected.len(),
                duplicates = report.duplicates,
                truncated = report.truncated,
                "Processed tags"
            );
            print_json(&report)?;
        }
    }

    Ok(())
}
