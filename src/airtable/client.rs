use reqwest::Url;

use super::models::{LIST_FIELDS, PENDING_WITH_OTP, RecordsEnvelope, UpdatePayload, Verification};
use super::UpstreamError;
use crate::config::AirtableConfig;

/// Thin client for the submissions table. Each call makes exactly one request
/// and never retries.
pub struct AirtableClient {
    client: reqwest::Client,
    config: AirtableConfig,
}

impl AirtableClient {
    pub fn new(config: AirtableConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// `{api_url}/{base}/{table}`, plus `/{record_id}` as a single encoded
    /// segment when given.
    pub fn table_url(&self, record_id: Option<&str>) -> Result<Url, UpstreamError> {
        let mut url = self.config.api_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| UpstreamError::InvalidUrl(self.config.api_url.to_string()))?;
            segments
                .pop_if_empty()
                .push(&self.config.base_id)
                .push(&self.config.table);
            if let Some(id) = record_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// Fetch pending submissions that still hold a one-time code.
    ///
    /// The upstream status is not checked: whatever JSON comes back is
    /// returned, and bodies without `records` are the caller's to pass on.
    pub async fn list_pending(&self, api_key: &str) -> Result<RecordsEnvelope, UpstreamError> {
        let mut url = self.table_url(None)?;
        {
            let mut query = url.query_pairs_mut();
            for field in LIST_FIELDS {
                query.append_pair("fields[]", field);
            }
            query.append_pair("filterByFormula", PENDING_WITH_OTP);
        }

        let resp = self.client.get(url).bearer_auth(api_key).send().await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%status, "Airtable listing returned a non-success status");
        }

        let body = resp.text().await?;
        RecordsEnvelope::from_body(&body).map_err(UpstreamError::Decode)
    }

    pub async fn update_verification(
        &self,
        api_key: &str,
        record_id: &str,
        verification: Verification,
    ) -> Result<(), UpstreamError> {
        let url = self.table_url(Some(record_id))?;
        let payload = UpdatePayload {
            fields: verification.into(),
        };

        let resp = self
            .client
            .patch(url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        Ok(())
    }
}
