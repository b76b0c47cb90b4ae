//! Send-job domain types

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::email::{Delivered, EmailRecord, null_as_default};

/// Progress of a bulk-send job, as returned by the status endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    /// `None` when the job has never been sent
    #[serde(default, deserialize_with = "deserialize_status_code")]
    pub status_code: Option<StatusCode>,
    #[serde(default)]
    pub status_description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub percent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub successful: Vec<Delivered>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub failed: Vec<EmailRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub retrying: Vec<EmailRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sending: Vec<EmailRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_to_send: u64,
}

/// Send-job status code
///
/// On the wire the page uses single letters; the long names are accepted too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCode {
    /// Send requested, not yet picked up ("r")
    Queued,
    /// Sending in progress ("p")
    Pending,
    /// All emails processed ("c")
    Complete,
    /// Any other code the server may report
    Other(String),
}

impl StatusCode {
    /// Parses a wire code, returning `None` for an empty code
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }

        Some(match code {
            "r" | "queued" => StatusCode::Queued,
            "p" | "pending" => StatusCode::Pending,
            "c" | "complete" => StatusCode::Complete,
            other => StatusCode::Other(other.to_string()),
        })
    }

    /// Wire code for this status
    pub fn code(&self) -> &str {
        match self {
            StatusCode::Queued => "r",
            StatusCode::Pending => "p",
            StatusCode::Complete => "c",
            StatusCode::Other(code) => code,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, StatusCode::Complete)
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

fn deserialize_status_code<'de, D>(deserializer: D) -> Result<Option<StatusCode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(StatusCode::from_code))
}
