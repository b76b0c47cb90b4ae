//! Terminal rendering

use chrono::{DateTime, Local};
use colored::*;
use mailwatch_core::domain::sort::SortField;
use std::io::IsTerminal;

use crate::scheduler::{PollerState, StatusDisplay};
use crate::view::campaigns::{CampaignList, SortControls};
use crate::view::status::{PanelMode, RowSet, StatusLabel, StatusSummary};

const BAR_WIDTH: usize = 40;

/// Prints the status panel to stdout after every rendered poll
pub struct TerminalDisplay {
    /// Redraw in place instead of scrolling
    redraw: bool,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            redraw: std::io::stdout().is_terminal(),
        }
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusDisplay for TerminalDisplay {
    fn show(&mut self, state: &PollerState) {
        let Some(summary) = &state.summary else {
            return;
        };

        if self.redraw {
            print!("\x1B[2J\x1B[H");
        }

        print_status_panel(summary, &state.rows, state.last_rendered_at);
    }
}

/// Print the mode banner, progress bar, counts and the recipient table
pub fn print_status_panel(
    summary: &StatusSummary,
    rows: &RowSet,
    rendered_at: Option<DateTime<Local>>,
) {
    let banner = match summary.mode {
        PanelMode::NotSent => "Not sent".dimmed(),
        PanelMode::Pending => "Sending".yellow().bold(),
        PanelMode::Complete => "Complete".green().bold(),
    };

    match rendered_at {
        Some(at) => println!("{}  {}", banner, at.format("%H:%M:%S").to_string().dimmed()),
        None => println!("{}", banner),
    }

    if let Some(description) = &summary.description {
        println!("  {}", description.dimmed());
    }

    if summary.mode == PanelMode::NotSent {
        println!("{}", "This email has not been sent yet.".yellow());
        return;
    }

    println!("  {} {:>5.1}%", progress_bar(summary.percent), summary.percent);
    println!("  {}", summary.summary);
    println!();

    if rows.is_empty() {
        println!("{}", "No emails waiting.".dimmed());
        return;
    }

    println!(
        "  {:<32} {:<24} {:<12} {}",
        "Email".bold(),
        "Name".bold(),
        "Status".bold(),
        "Attempts".bold()
    );
    for row in rows.rows() {
        println!(
            "  {:<32} {:<24} {:<12} {}",
            row.email,
            row.full_name,
            colorize_label(row.label),
            row.attempts
        );
        if let Some(error) = &row.tooltip {
            println!("    {} {}", "↳".dimmed(), error.red());
        }
    }
}

/// Print the campaign list with its sort controls
pub fn print_campaign_list(list: &CampaignList, controls: &SortControls) {
    if list.is_empty() {
        println!("{}", "No campaigns found.".yellow());
        return;
    }

    let header: Vec<String> = SortField::ALL
        .iter()
        .map(|field| {
            let arrow = if controls.next_direction(*field).is_ascending() {
                "▲"
            } else {
                "▼"
            };
            format!("{} {}", field, arrow)
        })
        .collect();
    println!("{}", format!("Sort: {}", header.join("  ")).dimmed());
    println!();

    println!(
        "  {:<18} {:<36} {:<14} {}",
        "Date".bold(),
        "Name".bold(),
        "Status".bold(),
        "Id".bold()
    );
    for row in list.rows() {
        let line = format!(
            "  {:<18} {:<36} {:<14} {}",
            row.date, row.name, row.status, row.campaign.name
        );
        if row.odd {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "[{}{}]",
        "█".repeat(filled).green(),
        "░".repeat(BAR_WIDTH - filled).dimmed()
    )
}

fn colorize_label(label: Option<StatusLabel>) -> ColoredString {
    match label {
        None => "".normal(),
        Some(StatusLabel::Sending) => label_text(StatusLabel::Sending).cyan(),
        Some(StatusLabel::Retrying) => label_text(StatusLabel::Retrying).yellow(),
        Some(StatusLabel::Failed) => label_text(StatusLabel::Failed).red(),
    }
}

fn label_text(label: StatusLabel) -> String {
    // pad before colouring; escape codes break width formatting
    format!("{:<12}", label.to_string())
}
