//! Recipient-group endpoints

use crate::CampaignClient;
use crate::error::{ClientError, Result};
use mailwatch_core::dto::GroupRecipientForm;
use tracing::debug;

impl CampaignClient {
    /// Add or remove a recipient group for this campaign
    ///
    /// Issues `POST <page>` with `group=<name>&isRecip=<bool>`. The page
    /// ignores adding a group twice, so repeating a call is harmless.
    pub async fn set_group_recipient(&self, group: &str, is_recip: bool) -> Result<()> {
        let group = group.trim();
        if group.is_empty() {
            return Err(ClientError::InvalidRequest(
                "group name cannot be empty".to_string(),
            ));
        }

        debug!("Setting group {} recipient={}", group, is_recip);

        let response = self
            .client
            .post(&self.page_url)
            .form(&GroupRecipientForm {
                group: group.to_string(),
                is_recip,
            })
            .send()
            .await?;

        self.handle_action(response).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::serve;
    use crate::{CampaignClient, ClientError};
    use axum::extract::{Form, State};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Posted = Arc<Mutex<Vec<HashMap<String, String>>>>;

    async fn record(State(posted): State<Posted>, Form(form): Form<HashMap<String, String>>) -> Json<Value> {
        posted.lock().unwrap().push(form);
        Json(json!({ "status": true }))
    }

    #[tokio::test]
    async fn test_set_group_recipient_posts_form() {
        let posted: Posted = Arc::default();
        let app = Router::new()
            .route("/emails/spring", post(record))
            .with_state(Arc::clone(&posted));
        let client = CampaignClient::new(serve(app).await);

        client.set_group_recipient("staff", true).await.unwrap();
        client.set_group_recipient("staff", false).await.unwrap();

        let posted = posted.lock().unwrap();
        assert_eq!(posted.len(), 2);
        assert_eq!(posted[0]["group"], "staff");
        assert_eq!(posted[0]["isRecip"], "true");
        assert_eq!(posted[1]["isRecip"], "false");
    }

    #[tokio::test]
    async fn test_empty_group_is_invalid() {
        let client = CampaignClient::new("http://127.0.0.1:9/emails/spring");
        let err = client.set_group_recipient("  ", true).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }
}
