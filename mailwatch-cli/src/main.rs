//! Mailwatch
//!
//! Terminal console for a group-email campaign page.
//!
//! Architecture:
//! - Configuration: command-line flags with environment fallbacks
//! - Scheduler: the send-job status poll loop
//! - View: status rendering, the sortable campaign list, terminal output
//! - Services: persisted key/value state (the remembered sort)
//!
//! Logs go to stderr so the rendered panel owns stdout.

mod commands;
mod config;
mod scheduler;
mod service;
mod view;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::{Config, DEFAULT_STATE_PATH};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mailwatch")]
#[command(about = "Group email campaign console", long_about = None)]
struct Cli {
    /// Campaign page URL
    #[arg(long, env = "MAILWATCH_PAGE_URL")]
    page_url: String,

    /// Campaign list URL (defaults to the folder of the campaign page)
    #[arg(long, env = "MAILWATCH_LIST_URL")]
    list_url: Option<String>,

    /// Delay between two status polls, in milliseconds
    #[arg(long, env = "MAILWATCH_POLL_INTERVAL_MS", default_value_t = 2000)]
    poll_interval_ms: u64,

    /// HTTP request timeout, in seconds
    #[arg(long, env = "MAILWATCH_REQUEST_TIMEOUT", default_value_t = 30)]
    request_timeout: u64,

    /// File holding remembered console state
    #[arg(long, env = "MAILWATCH_STATE_PATH", default_value = DEFAULT_STATE_PATH)]
    state_path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::new(cli.page_url);
    config.list_url = cli.list_url;
    config.poll_interval = Duration::from_millis(cli.poll_interval_ms);
    config.request_timeout = Duration::from_secs(cli.request_timeout);
    config.state_path = cli.state_path;
    config.validate()?;

    info!("Using campaign page {}", config.page_url);

    handle_command(cli.command, &config).await
}
