//! Boundary to the remote recruitment data store.
//!
//! ARCHITECTURAL RULE: no other module may talk to the recruitment service
//! directly. Everything goes through `ApplicantStore`, carried in `AppState`
//! as `Arc<dyn ApplicantStore>` so tests can substitute a mock.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::applicant::{Applicant, ApplicantStatus};

pub mod http;

pub use http::HttpApplicantStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("recruitment service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The remote store's operations, as the pipeline needs them.
#[async_trait]
pub trait ApplicantStore: Send + Sync {
    /// Fetches the full applicant collection.
    async fn list_applicants(&self) -> Result<Vec<Applicant>, StoreError>;

    /// Fetches the raw analysis payload for one applicant. `None` when no
    /// analysis exists yet; the payload shape is the normalizer's problem.
    async fn fetch_analysis(&self, id: &str) -> Result<Option<Value>, StoreError>;

    /// Requests a status change for one applicant. The raw vocabulary form
    /// is sent over the wire.
    async fn update_status(&self, id: &str, status: ApplicantStatus) -> Result<(), StoreError>;

    /// Requests a fresh analysis for one applicant with the given engine.
    async fn request_reanalysis(&self, id: &str, engine: &str) -> Result<(), StoreError>;
}
