//! Watch command
//!
//! Shows the status panel and follows the send job until interrupted.

use anyhow::Result;
use mailwatch_client::CampaignClient;

use crate::config::Config;
use crate::scheduler::{PollerState, StatusPanel, StatusPoller};
use crate::view::TerminalDisplay;

/// Handle `watch`
pub async fn handle_watch(client: CampaignClient, config: &Config) -> Result<()> {
    watch_status(client, StatusPanel::visible(), config).await;
    Ok(())
}

/// Run the poll loop against `client` until the process ends
pub async fn watch_status(client: CampaignClient, panel: StatusPanel, config: &Config) {
    let mut poller = StatusPoller::new(
        client,
        panel,
        TerminalDisplay::new(),
        config.poll_interval,
    );
    let mut state = PollerState::default();

    poller.run(&mut state).await;
}
