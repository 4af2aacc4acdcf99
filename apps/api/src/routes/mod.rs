pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;
use crate::triage::handlers;

/// Batch export is dispatched by the screen straight against the
/// recruitment service; the pipeline has no part in it.
async fn not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Applicant list view
        .route("/api/v1/applicants", get(handlers::handle_list_applicants))
        .route(
            "/api/v1/applicants/reload",
            post(handlers::handle_reload),
        )
        .route(
            "/api/v1/applicants/:id/analysis",
            post(handlers::handle_fetch_analysis),
        )
        // Batch selection
        .route(
            "/api/v1/selection",
            get(handlers::handle_get_selection).delete(handlers::handle_clear_selection),
        )
        .route(
            "/api/v1/selection/toggle",
            post(handlers::handle_toggle_selection),
        )
        .route("/api/v1/selection/all", post(handlers::handle_select_all))
        // Batch actions over the current selection
        .route("/api/v1/batch/status", post(handlers::handle_batch_status))
        .route(
            "/api/v1/batch/reanalyze",
            post(handlers::handle_batch_reanalyze),
        )
        .route("/api/v1/batch/export", post(not_implemented))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::applicant::{Applicant, ApplicantStatus};
    use crate::store::{ApplicantStore, StoreError};
    use crate::triage::pipeline::TriagePipeline;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    struct EmptyStore;

    #[async_trait]
    impl ApplicantStore for EmptyStore {
        async fn list_applicants(&self) -> Result<Vec<Applicant>, StoreError> {
            Ok(Vec::new())
        }

        async fn fetch_analysis(&self, _id: &str) -> Result<Option<Value>, StoreError> {
            Ok(None)
        }

        async fn update_status(
            &self,
            _id: &str,
            _status: ApplicantStatus,
        ) -> Result<(), StoreError> {
            Ok(())
        }

        async fn request_reanalysis(&self, _id: &str, _engine: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn test_router() -> Router {
        build_router(AppState {
            store: Arc::new(EmptyStore),
            pipeline: Arc::new(RwLock::new(TriagePipeline::new(10))),
            config: Config {
                ats_base_url: "http://ats.test".to_string(),
                ats_api_key: "key".to_string(),
                port: 0,
                page_size: 10,
                rust_log: "info".to_string(),
            },
        })
    }

    #[tokio::test]
    async fn test_health_answers_ok() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_applicants_route_wired() {
        let response = test_router()
            .oneshot(
                Request::get("/api/v1/applicants?search=kim")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_export_is_not_implemented() {
        let response = test_router()
            .oneshot(
                Request::post("/api/v1/batch/export")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }
}
