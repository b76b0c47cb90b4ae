//! Send-job endpoints

use crate::CampaignClient;
use crate::error::Result;
use mailwatch_core::domain::job::JobStatus;
use mailwatch_core::dto::{STATUS_QUERY, SendMailForm};

impl CampaignClient {
    /// Fetch the current progress of the send job
    ///
    /// Issues `GET <page>?status=true`.
    pub async fn fetch_status(&self) -> Result<JobStatus> {
        let response = self
            .client
            .get(&self.page_url)
            .query(&[STATUS_QUERY])
            .send()
            .await?;

        self.handle_data(response).await
    }

    /// Ask the page to start sending the campaign
    ///
    /// Issues `POST <page>` with `sendMail=true`. The job runs server-side;
    /// use [`Self::fetch_status`] to follow it.
    pub async fn start_send(&self) -> Result<()> {
        let response = self
            .client
            .post(&self.page_url)
            .form(&SendMailForm::default())
            .send()
            .await?;

        self.handle_action(response).await
    }
}
