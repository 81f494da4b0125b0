//! Session log event models.
//!
//! A session log is an append-only trail of structured events scoped to one
//! run, used for audit and debugging. Events are never mutated or removed
//! once appended, and are ordered by timestamp within a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of a session log event.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionEventType {
    /// The run has started; metadata carries topic and depth.
    RunStart,

    /// A stage is about to execute; metadata carries stage name and role.
    StageStart,

    /// A stage has produced its output; metadata carries the output text
    /// and its length.
    StageOutput,

    /// Data is being handed from one stage to the next; metadata carries a
    /// bounded-length excerpt of the forwarded text.
    StageTransition,

    /// The run has reached its terminal state; metadata carries `success`
    /// and, on success, the saved report filename.
    RunComplete,
}

impl SessionEventType {
    /// Wire name of the event kind, matching its serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionEventType::RunStart => "run_start",
            SessionEventType::StageStart => "stage_start",
            SessionEventType::StageOutput => "stage_output",
            SessionEventType::StageTransition => "stage_transition",
            SessionEventType::RunComplete => "run_complete",
        }
    }
}

impl std::fmt::Display for SessionEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable record in a session log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionEvent {
    /// When the event was appended.
    pub timestamp: DateTime<Utc>,

    /// Session this event belongs to.
    pub session_id: String,

    /// Event kind.
    pub event_type: SessionEventType,

    /// Human-readable event message.
    pub message: String,

    /// Free-form structured metadata.
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Summary of one session, written alongside the exported events.
///
/// `duration_seconds` is derived from the recorded event timestamps rather
/// than the wall clock, so repeated exports of an unchanged session are
/// byte-identical.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// Opaque session identifier.
    pub session_id: String,

    /// When the session was created.
    pub started_at: DateTime<Utc>,

    /// Seconds between session start and the last appended event.
    pub duration_seconds: f64,

    /// Number of events appended so far.
    pub event_count: usize,

    /// Path of the plain-text session log file.
    pub log_file: String,
}
