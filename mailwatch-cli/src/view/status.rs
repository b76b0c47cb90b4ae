//! Send-job status rendering
//!
//! Applies a [`JobStatus`] response to the rows currently on screen and
//! derives the panel mode and summary line.

use mailwatch_core::domain::email::{EmailId, EmailRecord};
use mailwatch_core::domain::job::JobStatus;
use std::collections::HashSet;
use std::fmt;

/// Visual mode of the status panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    /// The campaign has never been sent
    NotSent,
    /// The send job is queued or running
    Pending,
    /// The send job finished
    Complete,
}

/// Status label of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    Sending,
    Retrying,
    Failed,
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusLabel::Sending => "Sending..",
            StatusLabel::Retrying => "Retrying..",
            StatusLabel::Failed => "Failed",
        })
    }
}

/// One recipient row of the status table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub email_id: EmailId,
    pub email: String,
    pub full_name: String,
    /// Empty until the first update
    pub label: Option<StatusLabel>,
    /// Last delivery error, shown alongside the label
    pub tooltip: Option<String>,
    pub attempts: u32,
}

impl StatusRow {
    fn from_record(record: &EmailRecord) -> Self {
        Self {
            email_id: record.email_id.clone(),
            email: record.email.clone(),
            full_name: record.full_name.clone(),
            label: None,
            tooltip: None,
            attempts: 0,
        }
    }
}

/// Rows of the status table, in display order
///
/// Ids that were reported delivered are remembered; their rows are never
/// created again.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    rows: Vec<StatusRow>,
    delivered: HashSet<EmailId>,
}

impl RowSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[StatusRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: &EmailId) -> Option<&StatusRow> {
        self.rows.iter().find(|row| &row.email_id == id)
    }

    pub fn contains(&self, id: &EmailId) -> bool {
        self.get(id).is_some()
    }

    /// Marks `id` delivered and drops its row; returns whether a row was removed
    pub fn mark_delivered(&mut self, id: &EmailId) -> bool {
        self.delivered.insert(id.clone());
        let removed = self.contains(id);
        self.rows.retain(|row| &row.email_id != id);
        removed
    }

    /// Finds the row for `record`, prepending a new one if needed
    ///
    /// Returns `None` for ids already delivered.
    pub fn get_or_create(&mut self, record: &EmailRecord) -> Option<&mut StatusRow> {
        if self.delivered.contains(&record.email_id) {
            return None;
        }

        let idx = match self.rows.iter().position(|row| row.email_id == record.email_id) {
            Some(idx) => idx,
            None => {
                self.rows.insert(0, StatusRow::from_record(record));
                0
            }
        };

        self.rows.get_mut(idx)
    }

    /// Drops every row; delivered ids stay remembered
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

/// What the panel shows besides the rows
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSummary {
    pub mode: PanelMode,
    /// Progress in percent, clamped to 0..=100
    pub percent: f64,
    /// Counts line, empty when the campaign was never sent
    pub summary: String,
    pub description: Option<String>,
}

/// Maps the job status code to a panel mode
pub fn panel_mode(status: &JobStatus) -> PanelMode {
    match &status.status_code {
        None => PanelMode::NotSent,
        Some(code) if code.is_complete() => PanelMode::Complete,
        Some(_) => PanelMode::Pending,
    }
}

/// Counts line: "3 sent ok, 1 failed, 0 retrying, 10 in total to send"
pub fn summary_line(status: &JobStatus) -> String {
    let mut line = format!(
        "{} sent ok, {} failed, {} retrying",
        status.successful.len(),
        status.failed.len(),
        status.retrying.len()
    );

    if status.total_to_send > 0 {
        line.push_str(&format!(", {} in total to send", status.total_to_send));
    }

    line
}

/// Applies `status` to `rows` and returns what the panel should show
///
/// Delivered ids are removed first; then sending, retrying and failed
/// records update (or prepend) their rows in that order.
pub fn render_status(rows: &mut RowSet, status: &JobStatus) -> StatusSummary {
    let mode = panel_mode(status);

    if mode == PanelMode::NotSent {
        rows.clear();
        return StatusSummary {
            mode,
            percent: 0.0,
            summary: String::new(),
            description: status.status_description.clone(),
        };
    }

    for delivered in &status.successful {
        rows.mark_delivered(delivered.email_id());
    }

    apply_records(rows, &status.sending, StatusLabel::Sending);
    apply_records(rows, &status.retrying, StatusLabel::Retrying);
    apply_records(rows, &status.failed, StatusLabel::Failed);

    StatusSummary {
        mode,
        percent: clamp_percent(status.percent),
        summary: summary_line(status),
        description: status.status_description.clone(),
    }
}

fn apply_records(rows: &mut RowSet, records: &[EmailRecord], label: StatusLabel) {
    for record in records {
        if let Some(row) = rows.get_or_create(record) {
            row.label = Some(label);
            row.tooltip = record.last_error.clone();
            row.attempts = record.retries;
        }
    }
}

fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailwatch_core::domain::email::Delivered;
    use mailwatch_core::domain::job::StatusCode;

    fn record(id: &str, retries: u32) -> EmailRecord {
        EmailRecord {
            email_id: EmailId::from(id),
            email: format!("{}@example.com", id),
            full_name: id.to_uppercase(),
            retries,
            last_error: None,
        }
    }

    fn pending() -> JobStatus {
        JobStatus {
            status_code: Some(StatusCode::Pending),
            ..Default::default()
        }
    }

    fn ids(rows: &RowSet) -> Vec<&str> {
        rows.rows().iter().map(|row| row.email_id.as_str()).collect()
    }

    #[test]
    fn test_successful_row_removed_and_new_retrying_row_prepended() {
        let mut rows = RowSet::new();
        render_status(
            &mut rows,
            &JobStatus {
                sending: vec![record("a", 0), record("c", 0)],
                ..pending()
            },
        );
        assert_eq!(ids(&rows), vec!["c", "a"]);

        let summary = render_status(
            &mut rows,
            &JobStatus {
                successful: vec![Delivered::Record(record("a", 0))],
                retrying: vec![record("b", 2)],
                ..pending()
            },
        );

        assert!(!rows.contains(&EmailId::from("a")));
        assert_eq!(ids(&rows), vec!["b", "c"]);

        let b = rows.get(&EmailId::from("b")).unwrap();
        assert_eq!(b.attempts, 2);
        assert_eq!(b.label, Some(StatusLabel::Retrying));
        assert_eq!(summary.mode, PanelMode::Pending);
    }

    #[test]
    fn test_delivered_rows_never_come_back() {
        let mut rows = RowSet::new();
        render_status(
            &mut rows,
            &JobStatus {
                successful: vec![Delivered::Id(EmailId::from("a"))],
                ..pending()
            },
        );
        render_status(
            &mut rows,
            &JobStatus {
                failed: vec![record("a", 3)],
                ..pending()
            },
        );

        assert!(rows.is_empty());
    }

    #[test]
    fn test_existing_row_updated_in_place() {
        let mut rows = RowSet::new();
        render_status(
            &mut rows,
            &JobStatus {
                sending: vec![record("a", 0), record("b", 0)],
                ..pending()
            },
        );

        let mut failed = record("a", 3);
        failed.last_error = Some("550 mailbox unavailable".to_string());
        render_status(
            &mut rows,
            &JobStatus {
                failed: vec![failed],
                ..pending()
            },
        );

        assert_eq!(ids(&rows), vec!["b", "a"]);
        let a = rows.get(&EmailId::from("a")).unwrap();
        assert_eq!(a.label, Some(StatusLabel::Failed));
        assert_eq!(a.tooltip.as_deref(), Some("550 mailbox unavailable"));
        assert_eq!(a.attempts, 3);
    }

    #[test]
    fn test_lists_applied_in_order_sending_retrying_failed() {
        let mut rows = RowSet::new();
        render_status(
            &mut rows,
            &JobStatus {
                sending: vec![record("s", 0)],
                retrying: vec![record("r", 1)],
                failed: vec![record("f", 3)],
                ..pending()
            },
        );

        assert_eq!(ids(&rows), vec!["f", "r", "s"]);
    }

    #[test]
    fn test_not_sent_clears_rows() {
        let mut rows = RowSet::new();
        render_status(
            &mut rows,
            &JobStatus {
                sending: vec![record("a", 0)],
                ..pending()
            },
        );

        let summary = render_status(&mut rows, &JobStatus::default());
        assert_eq!(summary.mode, PanelMode::NotSent);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_summary_line_and_modes() {
        let status = JobStatus {
            status_code: Some(StatusCode::Complete),
            percent: 140.0,
            successful: vec![Delivered::Id(EmailId::from("1")), Delivered::Id(EmailId::from("2"))],
            failed: vec![record("3", 3)],
            total_to_send: 3,
            ..Default::default()
        };

        assert_eq!(summary_line(&status), "2 sent ok, 1 failed, 0 retrying, 3 in total to send");

        let summary = render_status(&mut RowSet::new(), &status);
        assert_eq!(summary.mode, PanelMode::Complete);
        assert_eq!(summary.percent, 100.0);

        let queued = JobStatus {
            status_code: Some(StatusCode::Queued),
            ..Default::default()
        };
        assert_eq!(panel_mode(&queued), PanelMode::Pending);
        assert_eq!(summary_line(&queued), "0 sent ok, 0 failed, 0 retrying");
    }
}
