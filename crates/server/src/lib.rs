//! REST API surface over the investigation core.
//!
//! Exposes the orchestration facade through a small set of JSON
//! endpoints. All domain logic stays in `inq-core`; this crate only
//! translates HTTP to facade calls and errors to status codes.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::Semaphore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use inq_core::investigate::Investigator;
use inq_core::state::RunRegistry;

pub mod error;
pub mod handlers;

pub use error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Orchestration facade. Stateless per run, shared across requests.
    pub investigator: Arc<Investigator>,

    /// Run progress registry, shared with the investigator.
    pub registry: RunRegistry,

    /// Bounds the number of pipelines running at once.
    pub permits: Arc<Semaphore>,
}

impl AppState {
    pub fn new(investigator: Arc<Investigator>, registry: RunRegistry, max_runs: usize) -> Self {
        Self {
            investigator,
            registry,
            permits: Arc::new(Semaphore::new(max_runs)),
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/api/investigate", post(handlers::investigate))
        .route("/api/status/{run_id}", get(handlers::run_status))
        .route("/api/recent", get(handlers::recent_reports))
        .route("/api/report/{filename}", get(handlers::report_content))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve the API until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "API server listening");
    axum::serve(listener, router(state)).await
}
