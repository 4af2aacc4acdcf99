mod analysis;
mod config;
mod errors;
mod models;
mod routes;
mod state;
mod store;
mod triage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{ApplicantStore, HttpApplicantStore};
use crate::triage::pipeline::TriagePipeline;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (errors on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hirelens API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the recruitment-store client
    let store: Arc<dyn ApplicantStore> = Arc::new(HttpApplicantStore::new(
        config.ats_base_url.clone(),
        config.ats_api_key.clone(),
    ));
    info!("Recruitment store client initialized ({})", config.ats_base_url);

    // Initialize the triage pipeline and warm it with an initial load.
    // A failed initial load is not fatal: the screen starts on an empty
    // view with the failure recorded in its load state.
    let mut pipeline = TriagePipeline::new(config.page_size);
    let epoch = pipeline.begin_load();
    match store.list_applicants().await {
        Ok(applicants) => {
            info!("Loaded {} applicants", applicants.len());
            pipeline.complete_load(epoch, applicants);
        }
        Err(e) => {
            warn!("Initial applicant load failed: {e}");
            pipeline.fail_load(epoch, e.to_string());
        }
    }

    // Build app state
    let state = AppState {
        store,
        pipeline: Arc::new(RwLock::new(pipeline)),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
