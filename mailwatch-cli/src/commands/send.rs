//! Send command

use anyhow::Result;
use colored::*;
use mailwatch_client::CampaignClient;
use tracing::{error, info};

use super::watch::watch_status;
use crate::config::Config;
use crate::scheduler::StatusPanel;

/// Handle `send`
///
/// Starts the send job; with `--watch` the poll loop takes over once the
/// page accepts the request.
pub async fn handle_send(client: CampaignClient, config: &Config, watch: bool) -> Result<()> {
    if let Err(e) = client.start_send().await {
        error!("Failed to start send job: {:#}", e);
        anyhow::bail!("Failed to start the send job. Please try again: {}", e);
    }

    info!("Send job initiated for {}", client.page_url());
    println!("{}", "✓ Send has been initiated".green());

    if watch {
        watch_status(client, StatusPanel::visible(), config).await;
    } else {
        println!(
            "{}",
            "  Run `mailwatch watch` to follow the progress.".dimmed()
        );
    }

    Ok(())
}
