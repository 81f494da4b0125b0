//! HTTP handlers for the investigation API.

use axum::extract::{Path, State};
use axum::Json;
use tracing::info;
use uuid::Uuid;

use inq_protocol::{
    InvestigateRequest, InvestigateResponse, RecentReports, ReportContent, RunStatusResponse,
};

use crate::error::ApiError;
use crate::AppState;

/// `GET /` - service health.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "inquest",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `POST /api/investigate` - run a full investigation synchronously.
///
/// Concurrency is bounded by the server's permit pool; requests beyond
/// the limit wait their turn rather than being rejected.
pub async fn investigate(
    State(state): State<AppState>,
    Json(request): Json<InvestigateRequest>,
) -> Result<Json<InvestigateResponse>, ApiError> {
    let _permit = state
        .permits
        .acquire()
        .await
        .map_err(|e| ApiError::Internal(format!("Server shutting down: {e}")))?;

    info!(topic = %request.topic, depth = %request.depth, "Investigation requested");

    let result = state
        .investigator
        .investigate(&request.topic, &request.depth)
        .await?;

    let run = result.run;
    let completed_at = run.completed_at.unwrap_or(run.started_at);
    let duration_seconds =
        (completed_at - run.started_at).num_milliseconds().max(0) as f64 / 1000.0;

    Ok(Json(InvestigateResponse {
        report: result.report,
        topic: run.topic,
        depth: run.depth,
        run_id: run.id,
        started_at: run.started_at,
        completed_at,
        duration_seconds,
        status: run.status,
    }))
}

/// `GET /api/status/{run_id}` - progress of one run.
pub async fn run_status(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Result<Json<RunStatusResponse>, ApiError> {
    let run_id: Uuid = run_id
        .parse()
        .map_err(|_| ApiError::InvalidArgument(format!("Invalid run id: {run_id}")))?;

    let progress = state
        .registry
        .get(run_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Unknown run: {run_id}")))?;

    Ok(Json(RunStatusResponse {
        run_id,
        topic: progress.topic,
        status: progress.status,
        phase: progress.phase,
        message: progress.message,
    }))
}

/// `GET /api/recent` - newest report artifacts.
pub async fn recent_reports(
    State(state): State<AppState>,
) -> Result<Json<RecentReports>, ApiError> {
    let reports = state.investigator.reports().list_recent(10)?;
    Ok(Json(RecentReports { reports }))
}

/// `GET /api/report/{filename}` - full text of one report.
pub async fn report_content(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<ReportContent>, ApiError> {
    let content = state.investigator.reports().read(&filename)?;
    Ok(Json(ReportContent { filename, content }))
}
