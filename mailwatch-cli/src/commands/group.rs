//! Recipient group command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use mailwatch_client::CampaignClient;

/// Group subcommands
#[derive(Subcommand)]
pub enum GroupCommands {
    /// Add a group to the campaign recipients
    Add {
        /// Group name
        name: String,
    },
    /// Remove a group from the campaign recipients
    Remove {
        /// Group name
        name: String,
    },
}

/// Handle group commands
///
/// Failures are not retried; the error is reported and the command exits.
pub async fn handle_group_command(command: GroupCommands, client: &CampaignClient) -> Result<()> {
    let (name, is_recip) = match command {
        GroupCommands::Add { name } => (name, true),
        GroupCommands::Remove { name } => (name, false),
    };

    client
        .set_group_recipient(&name, is_recip)
        .await
        .with_context(|| format!("Failed to update recipient group {}", name))?;

    if is_recip {
        println!("{} {}", "✓ Added recipient group".green(), name.cyan());
    } else {
        println!("{} {}", "✓ Removed recipient group".green(), name.cyan());
    }

    Ok(())
}
