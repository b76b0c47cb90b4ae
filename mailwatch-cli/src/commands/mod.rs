//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod campaign;
mod group;
mod send;
mod watch;

pub use campaign::CampaignCommands;
pub use group::GroupCommands;

use anyhow::{Context, Result};
use clap::Subcommand;
use mailwatch_client::CampaignClient;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Follow the progress of the send job
    Watch,
    /// Start sending the campaign
    Send {
        /// Keep watching the send job once it has started
        #[arg(short, long)]
        watch: bool,
    },
    /// Recipient group management
    Group {
        #[command(subcommand)]
        command: GroupCommands,
    },
    /// Campaign list and creation
    Campaign {
        #[command(subcommand)]
        command: CampaignCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The console configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = build_client(config)?;

    match command {
        Commands::Watch => watch::handle_watch(client, config).await,
        Commands::Send { watch } => send::handle_send(client, config, watch).await,
        Commands::Group { command } => group::handle_group_command(command, &client).await,
        Commands::Campaign { command } => {
            campaign::handle_campaign_command(command, &client, config).await
        }
    }
}

/// Build the campaign client with the configured request timeout
fn build_client(config: &Config) -> Result<CampaignClient> {
    let http_client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    Ok(CampaignClient::with_client(
        config.page_url.clone(),
        http_client,
    ))
}
