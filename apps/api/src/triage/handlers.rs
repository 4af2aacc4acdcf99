//! HTTP handlers for the applicant-list screen.
//!
//! Handlers stay thin: translate the request, take the pipeline lock, call
//! into the pure components, serialize the result. Async work (store
//! fetches, batch dispatch) happens outside the lock; fetched collections
//! re-enter through the pipeline's epoch guard.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::normalizer::normalize;
use crate::errors::AppError;
use crate::models::analysis::AnalysisSummary;
use crate::models::applicant::ApplicantStatus;
use crate::state::AppState;
use crate::triage::batch::{self, BatchAction, BatchFailure, BatchOutcome};
use crate::triage::filter::{ExperienceBucket, FilterCriteria};
use crate::triage::pipeline::{LoadState, TriageView};

// ────────────────────────────────────────────────────────────────────────────
// Request/response shapes
// ────────────────────────────────────────────────────────────────────────────

/// Query string of the list endpoint. Tag parameters are comma-separated;
/// unknown tag values are dropped rather than rejected — an unrecognized
/// constraint is no constraint.
#[derive(Debug, Default, Deserialize)]
pub struct ApplicantListQuery {
    pub search: Option<String>,
    pub job_tags: Option<String>,
    pub experience_tags: Option<String>,
    pub status_tags: Option<String>,
    pub job_posting_id: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ApplicantListQuery {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search_text: self.search.clone().unwrap_or_default(),
            job_tags: split_csv(self.job_tags.as_deref()),
            experience_tags: split_csv(self.experience_tags.as_deref())
                .iter()
                .filter_map(|tag| ExperienceBucket::parse_label(tag))
                .collect(),
            status_tags: split_csv(self.status_tags.as_deref())
                .iter()
                .filter_map(|tag| ApplicantStatus::parse_label(tag))
                .collect(),
            job_posting_id: self.job_posting_id.clone(),
        }
    }
}

fn split_csv(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    /// False when this reload was superseded by a newer one or failed.
    pub installed: bool,
    pub total_applicants: usize,
    pub load_state: LoadState,
}

#[derive(Debug, Deserialize)]
pub struct SelectionToggleRequest {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub ids: Vec<String>,
    pub count: usize,
    pub all_visible_selected: bool,
}

#[derive(Debug, Deserialize)]
pub struct BatchStatusRequest {
    pub status: ApplicantStatus,
}

#[derive(Debug, Deserialize)]
pub struct BatchReanalyzeRequest {
    pub engine: String,
}

/// Aggregate of a batch dispatch, as reported to the screen.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub succeeded_count: usize,
    pub failed_count: usize,
    pub succeeded: Vec<String>,
    pub failed: Vec<BatchFailure>,
}

impl From<BatchOutcome> for BatchSummary {
    fn from(outcome: BatchOutcome) -> Self {
        BatchSummary {
            succeeded_count: outcome.succeeded_count(),
            failed_count: outcome.failed_count(),
            succeeded: outcome.succeeded,
            failed: outcome.failed,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Applicant list + loading
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/applicants
pub async fn handle_list_applicants(
    State(state): State<AppState>,
    Query(query): Query<ApplicantListQuery>,
) -> Json<TriageView> {
    let mut pipeline = state.pipeline.write().await;
    // A changed criteria resets the page; an explicit page param then wins.
    pipeline.apply_criteria(query.criteria());
    if let Some(page_size) = query.page_size {
        pipeline.set_page_size(page_size);
    }
    if let Some(page) = query.page {
        pipeline.set_page(page);
    }
    Json(pipeline.view())
}

/// POST /api/v1/applicants/reload
///
/// Fetches the collection from the store and installs it last-write-wins.
/// A fetch failure leaves the previous view intact and is reported through
/// `load_state`, not as an error response.
pub async fn handle_reload(State(state): State<AppState>) -> Json<ReloadResponse> {
    let epoch = state.pipeline.write().await.begin_load();

    let fetched = state.store.list_applicants().await;

    let mut pipeline = state.pipeline.write().await;
    let installed = match fetched {
        Ok(applicants) => {
            let installed = pipeline.complete_load(epoch, applicants);
            if !installed {
                info!("applicant reload superseded (epoch {epoch})");
            }
            installed
        }
        Err(e) => {
            warn!("applicant reload failed: {e}");
            pipeline.fail_load(epoch, e.to_string());
            false
        }
    };

    Json(ReloadResponse {
        installed,
        total_applicants: pipeline.applicant_count(),
        load_state: pipeline.load_state().clone(),
    })
}

/// POST /api/v1/applicants/:id/analysis
///
/// Fetches the raw analysis payload, normalizes it, and attaches the
/// summary — the pipeline's only applicant-adjacent mutation.
pub async fn handle_fetch_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisSummary>, AppError> {
    let payload = state.store.fetch_analysis(&id).await?;
    match normalize(payload.as_ref()) {
        Some(summary) => {
            state
                .pipeline
                .write()
                .await
                .merge_analysis(&id, summary.clone());
            Ok(Json(summary))
        }
        None => Err(AppError::NotFound(format!(
            "No analysis exists for applicant {id}"
        ))),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Selection
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/selection/toggle
pub async fn handle_toggle_selection(
    State(state): State<AppState>,
    Json(req): Json<SelectionToggleRequest>,
) -> Json<SelectionResponse> {
    let mut pipeline = state.pipeline.write().await;
    pipeline.toggle_selection(req.id);
    Json(selection_response(&pipeline))
}

/// POST /api/v1/selection/all — selects the current filtered view.
pub async fn handle_select_all(State(state): State<AppState>) -> Json<SelectionResponse> {
    let mut pipeline = state.pipeline.write().await;
    pipeline.select_all_visible();
    Json(selection_response(&pipeline))
}

/// DELETE /api/v1/selection
pub async fn handle_clear_selection(State(state): State<AppState>) -> Json<SelectionResponse> {
    let mut pipeline = state.pipeline.write().await;
    pipeline.clear_selection();
    Json(selection_response(&pipeline))
}

/// GET /api/v1/selection
pub async fn handle_get_selection(State(state): State<AppState>) -> Json<SelectionResponse> {
    let pipeline = state.pipeline.read().await;
    Json(selection_response(&pipeline))
}

fn selection_response(pipeline: &crate::triage::pipeline::TriagePipeline) -> SelectionResponse {
    let ids = pipeline.selection_ids();
    let visible = pipeline.visible_ids();
    SelectionResponse {
        count: ids.len(),
        all_visible_selected: pipeline
            .selection()
            .is_all_selected(visible.iter().map(String::as_str)),
        ids,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Batch actions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/batch/status
pub async fn handle_batch_status(
    State(state): State<AppState>,
    Json(req): Json<BatchStatusRequest>,
) -> Result<Json<BatchSummary>, AppError> {
    run_batch(&state, BatchAction::StatusChange { status: req.status }).await
}

/// POST /api/v1/batch/reanalyze
pub async fn handle_batch_reanalyze(
    State(state): State<AppState>,
    Json(req): Json<BatchReanalyzeRequest>,
) -> Result<Json<BatchSummary>, AppError> {
    run_batch(&state, BatchAction::Reanalyze { engine: req.engine }).await
}

/// Dispatches a batch action over the current selection. Local applicants
/// are never mutated here — the screen reloads after a batch lands.
async fn run_batch(state: &AppState, action: BatchAction) -> Result<Json<BatchSummary>, AppError> {
    let ids = state.pipeline.read().await.selection_ids();
    if ids.is_empty() {
        return Err(AppError::Validation(
            "No applicants selected for batch action".to_string(),
        ));
    }
    let outcome = batch::dispatch(state.store.as_ref(), &ids, &action).await;
    Ok(Json(BatchSummary::from(outcome)))
}
