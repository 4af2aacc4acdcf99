//! reqwest-backed client for the recruitment service's REST endpoints.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

use crate::models::applicant::{Applicant, ApplicantStatus};
use crate::store::{ApplicantStore, StoreError};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the remote recruitment data store.
#[derive(Clone)]
pub struct HttpApplicantStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpApplicantStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        HttpApplicantStore {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Turns a non-success response into `StoreError::Api` with the body as
    /// the message.
    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ApplicantStore for HttpApplicantStore {
    async fn list_applicants(&self) -> Result<Vec<Applicant>, StoreError> {
        let response = self
            .client
            .get(self.url("/api/applicants"))
            .header("x-api-key", &self.api_key)
            .send()
            .await?;
        let applicants: Vec<Applicant> = Self::check(response).await?.json().await?;
        debug!("fetched {} applicants", applicants.len());
        Ok(applicants)
    }

    async fn fetch_analysis(&self, id: &str) -> Result<Option<Value>, StoreError> {
        let response = self
            .client
            .get(self.url(&format!("/api/applicants/{id}/analysis")))
            .header("x-api-key", &self.api_key)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let payload: Value = Self::check(response).await?.json().await?;
        Ok(Some(payload))
    }

    async fn update_status(&self, id: &str, status: ApplicantStatus) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(self.url(&format!("/api/applicants/{id}/status")))
            .header("x-api-key", &self.api_key)
            .json(&json!({ "status": status.as_raw() }))
            .send()
            .await?;
        Self::check(response).await?;
        debug!("status of {id} set to {}", status.as_raw());
        Ok(())
    }

    async fn request_reanalysis(&self, id: &str, engine: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.url(&format!("/api/applicants/{id}/reanalyze")))
            .header("x-api-key", &self.api_key)
            .json(&json!({ "analysis_type": engine }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
