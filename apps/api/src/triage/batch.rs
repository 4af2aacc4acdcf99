//! Batch dispatch — one independent request per selected applicant.
//!
//! Per-identifier requests run concurrently with no ordering guarantee
//! between them, and the aggregate is a partition into succeeded/failed
//! with per-item error detail. There is no rollback: one applicant's
//! failure never aborts its siblings.

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::models::applicant::ApplicantStatus;
use crate::store::ApplicantStore;

/// A batch action kind, applied uniformly to every selected id.
#[derive(Debug, Clone)]
pub enum BatchAction {
    StatusChange { status: ApplicantStatus },
    Reanalyze { engine: String },
}

/// One failed item with its preserved error detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchFailure {
    pub id: String,
    pub error_message: String,
}

/// Partition of a batch dispatch. Never an all-or-nothing transaction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<BatchFailure>,
}

impl BatchOutcome {
    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

/// Dispatches `action` for every id concurrently and partitions the
/// per-item results.
pub async fn dispatch(
    store: &dyn ApplicantStore,
    ids: &[String],
    action: &BatchAction,
) -> BatchOutcome {
    let requests = ids.iter().map(|id| async move {
        let result = match action {
            BatchAction::StatusChange { status } => store.update_status(id, *status).await,
            BatchAction::Reanalyze { engine } => store.request_reanalysis(id, engine).await,
        };
        (id.clone(), result)
    });

    let mut outcome = BatchOutcome::default();
    for (id, result) in join_all(requests).await {
        match result {
            Ok(()) => outcome.succeeded.push(id),
            Err(e) => {
                warn!("batch item {id} failed: {e}");
                outcome.failed.push(BatchFailure {
                    id,
                    error_message: e.to_string(),
                });
            }
        }
    }

    info!(
        "batch dispatch done: {} succeeded, {} failed",
        outcome.succeeded_count(),
        outcome.failed_count()
    );
    outcome
}
