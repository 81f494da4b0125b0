//! REST API request and response payloads.
//!
//! These mirror the JSON contract of the HTTP surface exposed by
//! `inq-server`. Field names are part of the wire format; changing them is
//! a breaking change for API consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::run_models::RunStatus;
use crate::stage_models::Depth;

/// Request body for `POST /api/investigate`.
///
/// `depth` is carried as a raw string so that an invalid value can be
/// rejected with a 400 and a helpful message rather than a serde
/// deserialization error.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InvestigateRequest {
    /// Investigation topic. Must be non-empty after trimming.
    pub topic: String,

    /// Requested depth. Defaults to "comprehensive" when omitted.
    #[serde(default = "default_depth")]
    pub depth: String,
}

fn default_depth() -> String {
    Depth::Comprehensive.as_str().to_string()
}

/// Response body for a completed `POST /api/investigate`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InvestigateResponse {
    /// Final report text.
    pub report: String,

    /// Echo of the requested topic.
    pub topic: String,

    /// Echo of the requested depth.
    pub depth: Depth,

    /// Generated run identifier, usable with `GET /api/status/{run_id}`.
    pub run_id: Uuid,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run reached its terminal state.
    pub completed_at: DateTime<Utc>,

    /// Total run duration in seconds.
    pub duration_seconds: f64,

    /// Terminal run status.
    pub status: RunStatus,
}

/// Response body for `GET /api/status/{run_id}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunStatusResponse {
    /// The queried run id.
    pub run_id: Uuid,

    /// Topic the run is investigating.
    pub topic: String,

    /// Current run status.
    pub status: RunStatus,

    /// Coarse phase label (e.g., the currently executing stage name).
    pub phase: String,

    /// Human-readable progress message.
    pub message: String,
}

/// Metadata about one persisted report artifact.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecentReport {
    /// Topic reconstructed from the artifact filename.
    pub topic: String,

    /// Artifact filename inside the report sink.
    pub filename: String,

    /// Last modification time of the artifact.
    pub timestamp: DateTime<Utc>,

    /// Artifact size in kilobytes, rounded to one decimal.
    pub size_kb: f64,
}

/// Response body for `GET /api/recent`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RecentReports {
    /// Newest-first report metadata.
    pub reports: Vec<RecentReport>,
}

/// Response body for `GET /api/report/{filename}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReportContent {
    /// The requested filename.
    pub filename: String,

    /// Full report text.
    pub content: String,
}

/// Structured error payload returned by every failing endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorBody {
    /// Human-readable failure detail.
    pub error: String,
}
