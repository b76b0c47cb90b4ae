//! Data Transfer Objects for talking to the campaign page
//!
//! Every JSON response is wrapped in a [`JsonResult`] envelope; mutating
//! requests are posted as url-encoded forms.

use serde::{Deserialize, Serialize};

/// Response envelope used by the page for every JSON reply
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonResult<T> {
    /// `false` when the server rejected the request
    pub status: bool,
    #[serde(default)]
    pub next_href: Option<String>,
    #[serde(default, deserialize_with = "crate::domain::email::null_as_default")]
    pub messages: Vec<String>,
    pub data: Option<T>,
}

/// Form body that starts the send job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMailForm {
    pub send_mail: String,
}

impl Default for SendMailForm {
    fn default() -> Self {
        Self {
            send_mail: "true".to_string(),
        }
    }
}

/// Form body that adds or removes a recipient group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecipientForm {
    pub group: String,
    pub is_recip: bool,
}

/// Query flag asking the page for the send-job status
pub const STATUS_QUERY: (&str, &str) = ("status", "true");

/// Query flag asking the list page for the campaign list
pub const LIST_QUERY: (&str, &str) = ("list", "true");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::campaign::CampaignSummary;
    use crate::domain::job::JobStatus;

    #[test]
    fn test_envelope_without_data() {
        let result: JsonResult<JobStatus> = serde_json::from_str(r#"{"status": true}"#).unwrap();
        assert!(result.status);
        assert!(result.data.is_none());
        assert!(result.messages.is_empty());
    }

    #[test]
    fn test_envelope_with_null_messages_and_data() {
        let result: JsonResult<JobStatus> =
            serde_json::from_str(r#"{"status": true, "messages": null, "data": null}"#).unwrap();
        assert!(result.messages.is_empty());
        assert!(result.data.is_none());
    }

    #[test]
    fn test_envelope_data_needs_no_default() {
        let result: JsonResult<CampaignSummary> =
            serde_json::from_str(r#"{"status": true, "data": {"name": "spring"}}"#).unwrap();
        assert_eq!(result.data.unwrap().name, "spring");

        let result: JsonResult<CampaignSummary> =
            serde_json::from_str(r#"{"status": true}"#).unwrap();
        assert!(result.data.is_none());
    }

    #[test]
    fn test_rejected_envelope_keeps_messages() {
        let result: JsonResult<JobStatus> =
            serde_json::from_str(r#"{"status": false, "messages": ["not allowed"]}"#).unwrap();
        assert!(!result.status);
        assert_eq!(result.messages, vec!["not allowed".to_string()]);
    }

    #[test]
    fn test_group_form_field_names() {
        let form = GroupRecipientForm {
            group: "staff".to_string(),
            is_recip: true,
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["group"], "staff");
        assert_eq!(json["isRecip"], true);
    }
}
