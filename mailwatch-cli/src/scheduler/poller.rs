//! Status poller
//!
//! Polls the campaign page for send-job progress at a fixed interval while
//! the status panel is visible. Each request is awaited before the next
//! delay starts, so at most one request is ever in flight. Failures are
//! logged and retried on the next tick, forever.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use mailwatch_client::CampaignClient;
use mailwatch_core::domain::job::JobStatus;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::{self, Duration};
use tracing::{debug, info, warn};

use crate::view::status::{RowSet, StatusSummary, render_status};

/// Source of send-job status
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self) -> Result<JobStatus>;
}

#[async_trait]
impl StatusSource for CampaignClient {
    async fn fetch_status(&self) -> Result<JobStatus> {
        Ok(CampaignClient::fetch_status(self).await?)
    }
}

/// Receives the poller state after every rendered response
pub trait StatusDisplay: Send {
    fn show(&mut self, state: &PollerState);
}

/// Visibility switch of the status panel
///
/// Cloned handles share the same switch.
#[derive(Debug, Clone, Default)]
pub struct StatusPanel {
    visible: Arc<AtomicBool>,
}

impl StatusPanel {
    pub fn visible() -> Self {
        let panel = Self::default();
        panel.show();
        panel
    }

    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn show(&self) {
        self.visible.store(true, Ordering::SeqCst);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

/// Everything the poll loop has rendered so far
#[derive(Debug, Clone, Default)]
pub struct PollerState {
    pub rows: RowSet,
    /// Panel contents from the last successful poll
    pub summary: Option<StatusSummary>,
    pub last_rendered_at: Option<DateTime<Local>>,
    /// Requests issued
    pub requests: u64,
    /// Requests that failed
    pub failures: u64,
}

/// Result of one poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Panel hidden, no request issued
    Idle,
    /// Response rendered
    Rendered,
    /// Request failed
    Failed,
}

/// Poll loop bound to one status source and one panel
pub struct StatusPoller<S, D> {
    source: S,
    panel: StatusPanel,
    display: D,
    interval: Duration,
}

impl<S: StatusSource, D: StatusDisplay> StatusPoller<S, D> {
    /// Creates a new status poller
    pub fn new(source: S, panel: StatusPanel, display: D, interval: Duration) -> Self {
        Self {
            source,
            panel,
            display,
            interval,
        }
    }

    /// Runs the poll loop for the lifetime of the process
    pub async fn run(&mut self, state: &mut PollerState) {
        info!("Starting status poller (interval: {:?})", self.interval);

        loop {
            self.poll_once(state).await;
            time::sleep(self.interval).await;
        }
    }

    /// Performs a single poll cycle
    pub async fn poll_once(&mut self, state: &mut PollerState) -> PollOutcome {
        if !self.panel.is_visible() {
            debug!("Status panel hidden, skipping poll");
            return PollOutcome::Idle;
        }

        state.requests += 1;

        match self.source.fetch_status().await {
            Ok(status) => {
                let summary = render_status(&mut state.rows, &status);
                debug!(
                    "Rendered status: {} ({} rows)",
                    summary.summary,
                    state.rows.len()
                );
                state.summary = Some(summary);
                state.last_rendered_at = Some(Local::now());
                self.display.show(state);
                PollOutcome::Rendered
            }
            Err(e) => {
                state.failures += 1;
                warn!("Status poll failed: {:#}", e);
                PollOutcome::Failed
            }
        }
    }
}
