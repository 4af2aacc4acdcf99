use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::store::ApplicantStore;
use crate::triage::pipeline::TriagePipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Boundary to the remote recruitment data store. Swapped for a mock in
    /// handler tests.
    pub store: Arc<dyn ApplicantStore>,
    /// The single triage pipeline this (single-viewer) service orchestrates.
    /// The lock exists because Axum handlers run concurrently; the pipeline
    /// itself is synchronous and lock-free.
    pub pipeline: Arc<RwLock<TriagePipeline>>,
    pub config: Config,
}
