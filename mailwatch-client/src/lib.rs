//! Mailwatch HTTP Client
//!
//! A small, typed client for the group-email campaign page.
//!
//! The page is a single URL: a `GET` with `?status=true` reports the progress
//! of the bulk-send job, and form `POST`s start the send or change the
//! recipient groups. Every JSON reply is wrapped in a
//! [`JsonResult`](mailwatch_core::dto::JsonResult) envelope.
//!
//! # Example
//!
//! ```no_run
//! use mailwatch_client::CampaignClient;
//!
//! #[tokio::main]
//! async fn main() -> mailwatch_client::Result<()> {
//!     let client = CampaignClient::new("http://localhost:8080/emails/spring-newsletter");
//!
//!     let status = client.fetch_status().await?;
//!     println!("{} of {} sent", status.successful.len(), status.total_to_send);
//!     Ok(())
//! }
//! ```

pub mod error;
mod campaigns;
mod groups;
mod status;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use mailwatch_core::domain::job::JobStatus;

use mailwatch_core::dto::JsonResult;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for one campaign page
///
/// Methods are grouped by concern:
/// - Send-job status and start (`status`)
/// - Recipient groups (`groups`)
/// - Campaign list and job creation (`campaigns`)
#[derive(Debug, Clone)]
pub struct CampaignClient {
    /// URL of the campaign page (e.g., "http://localhost:8080/emails/spring")
    page_url: String,
    /// HTTP client instance
    client: Client,
}

impl CampaignClient {
    /// Create a new campaign client
    ///
    /// # Arguments
    /// * `page_url` - The URL of the campaign page
    ///
    /// # Example
    /// ```
    /// use mailwatch_client::CampaignClient;
    ///
    /// let client = CampaignClient::new("http://localhost:8080/emails/spring");
    /// ```
    pub fn new(page_url: impl Into<String>) -> Self {
        Self::with_client(page_url, Client::new())
    }

    /// Create a new campaign client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use mailwatch_client::CampaignClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = CampaignClient::with_client("http://localhost:8080/emails/spring", http_client);
    /// ```
    pub fn with_client(page_url: impl Into<String>, client: Client) -> Self {
        let page_url = page_url.into();
        Self {
            page_url: page_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the campaign page URL
    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and unwrap the JSON envelope
    ///
    /// An envelope with `status: false` becomes [`ClientError::Rejected`].
    async fn handle_envelope<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<JsonResult<T>> {
        let response = Self::check_status(response).await?;

        let envelope: JsonResult<T> = response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))?;

        if !envelope.status {
            return Err(ClientError::Rejected(rejection_message(&envelope.messages)));
        }

        Ok(envelope)
    }

    /// Like [`Self::handle_envelope`], but the envelope must carry data
    async fn handle_data<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        self.handle_envelope(response)
            .await?
            .data
            .ok_or_else(|| ClientError::ParseError("Response carried no data".to_string()))
    }

    /// Handle the reply to a form post
    ///
    /// The body is optional; when it is a JSON envelope its `status` flag
    /// is honoured.
    async fn handle_action(&self, response: reqwest::Response) -> Result<()> {
        let response = Self::check_status(response).await?;
        let body = response.text().await?;

        if body.trim().is_empty() {
            return Ok(());
        }

        match serde_json::from_str::<JsonResult<serde_json::Value>>(&body) {
            Ok(envelope) if !envelope.status => Err(ClientError::Rejected(rejection_message(
                &envelope.messages,
            ))),
            Ok(_) => Ok(()),
            Err(_) => {
                debug!("Form post answered with a non-JSON body ({} bytes)", body.len());
                Ok(())
            }
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }
}

fn rejection_message(messages: &[String]) -> String {
    if messages.is_empty() {
        "no reason given".to_string()
    } else {
        messages.join("; ")
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;

    /// Serves `app` on an ephemeral port and returns the campaign page URL
    pub async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/emails/spring", addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CampaignClient::new("http://localhost:8080/emails/spring");
        assert_eq!(client.page_url(), "http://localhost:8080/emails/spring");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = CampaignClient::new("http://localhost:8080/emails/spring/");
        assert_eq!(client.page_url(), "http://localhost:8080/emails/spring");
    }

    #[test]
    fn test_rejection_message() {
        assert_eq!(rejection_message(&[]), "no reason given");
        assert_eq!(
            rejection_message(&["a".to_string(), "b".to_string()]),
            "a; b"
        );
    }
}
