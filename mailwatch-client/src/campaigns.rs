//! Campaign list and job creation endpoints

use crate::CampaignClient;
use crate::error::{ClientError, Result};
use mailwatch_core::domain::campaign::CampaignSummary;
use mailwatch_core::dto::LIST_QUERY;
use reqwest::Url;

impl CampaignClient {
    /// List the campaigns shown on a campaign-list page
    ///
    /// Issues `GET <list_url>?list=true`.
    pub async fn list_campaigns(&self, list_url: &str) -> Result<Vec<CampaignSummary>> {
        let response = self
            .client
            .get(list_url)
            .query(&[LIST_QUERY])
            .send()
            .await?;

        self.handle_data(response).await
    }

    /// Create a new campaign job by posting a form to `action`
    ///
    /// `action` may be absolute or relative to the campaign page, like the
    /// `action` attribute of an HTML form.
    pub async fn create_job(&self, action: &str, fields: &[(String, String)]) -> Result<()> {
        let url = self.resolve(action)?;

        let response = self.client.post(url).form(fields).send().await?;

        self.handle_action(response).await
    }

    /// Resolve a link against the campaign page URL
    fn resolve(&self, link: &str) -> Result<Url> {
        let base = Url::parse(&self.page_url)
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid page URL: {}", e)))?;

        base.join(link)
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid action {:?}: {}", link, e)))
    }
}

#[cfg(test)]
mod tests {
    use crate::CampaignClient;
    use crate::test_support::serve;
    use axum::extract::{Form, Query};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::collections::HashMap;

    #[test]
    fn test_resolve_relative_action() {
        let client = CampaignClient::new("http://localhost:8080/emails/spring");
        assert_eq!(
            client.resolve("new").unwrap().as_str(),
            "http://localhost:8080/emails/new"
        );
        assert_eq!(
            client.resolve("/jobs/create").unwrap().as_str(),
            "http://localhost:8080/jobs/create"
        );
        assert_eq!(
            client.resolve("http://other/x").unwrap().as_str(),
            "http://other/x"
        );
    }

    #[tokio::test]
    async fn test_list_campaigns() {
        async fn list(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
            assert_eq!(query.get("list").map(String::as_str), Some("true"));
            Json(json!({
                "status": true,
                "data": [
                    { "name": "spring", "title": "Spring news", "statusDate": "2020-03-01T00:00:00Z", "status": "c" },
                    { "name": "draft" }
                ]
            }))
        }

        let page = serve(Router::new().route("/emails", get(list))).await;
        let list_url = page.trim_end_matches("/spring").to_string();
        let client = CampaignClient::new(page);

        let campaigns = client.list_campaigns(&list_url).await.unwrap();
        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns[0].display_title(), "Spring news");
        assert_eq!(campaigns[1].display_status(), "Draft");
    }

    #[tokio::test]
    async fn test_missing_list_is_not_found() {
        let page = serve(Router::new()).await;
        let list_url = page.trim_end_matches("/spring").to_string();
        let client = CampaignClient::new(page);

        let err = client.list_campaigns(&list_url).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_create_job_posts_fields() {
        async fn create(Form(form): Form<HashMap<String, String>>) -> Json<Value> {
            let ok = form.get("title").map(String::as_str) == Some("Autumn");
            Json(json!({ "status": ok }))
        }

        let client = CampaignClient::new(serve(Router::new().route("/emails/new", post(create))).await);

        client
            .create_job("new", &[("title".to_string(), "Autumn".to_string())])
            .await
            .unwrap();
        assert!(
            client
                .create_job("new", &[("title".to_string(), "Winter".to_string())])
                .await
                .is_err()
        );
    }
}
