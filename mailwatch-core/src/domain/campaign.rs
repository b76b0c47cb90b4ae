//! Campaign list entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One campaign (group email job) in the campaign list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CampaignSummary {
    /// Title shown for the campaign, falling back like the page does
    pub fn display_title(&self) -> &str {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title,
            _ => "Untitled email",
        }
    }

    /// Human-readable status; a missing code is a draft
    pub fn display_status(&self) -> String {
        match self.status.as_deref() {
            None | Some("") => "Draft".to_string(),
            Some("c") => "Completed".to_string(),
            Some("p") => "In progress".to_string(),
            Some(other) => format!("Status: {}", other),
        }
    }

    /// Status date as shown in the list, or an empty string
    pub fn display_date(&self) -> String {
        self.status_date
            .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }
}
