//! Runtime run state models.
//!
//! This module defines the structures for tracking the state of one
//! end-to-end pipeline execution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stage_models::Depth;

/// Represents the current lifecycle status of a run.
///
/// The status progresses through these states during normal execution:
/// Pending -> Running -> Completed
///
/// A run that encounters a stage failure transitions to Failed instead.
/// There is exactly one terminal transition per run and no way back out of
/// a terminal state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Run has been created but not started yet.
    Pending,

    /// Run is actively executing stages.
    Running,

    /// Run has completed successfully.
    Completed,

    /// Run has failed due to a stage execution error.
    Failed,
}

impl RunStatus {
    /// Whether this status is terminal (Completed or Failed).
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }
}

/// One execution of the full pipeline for a given `(topic, depth)` pair.
///
/// Invariant: `completed_at` is `Some` if and only if `status` is terminal.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Run {
    /// Unique identifier for this run.
    pub id: Uuid,

    /// User-supplied investigation topic. Never empty.
    pub topic: String,

    /// Requested investigation depth.
    pub depth: Depth,

    /// Opaque identifier correlating all session log events for this run.
    pub session_id: String,

    /// When the run was created.
    pub started_at: DateTime<Utc>,

    /// Set exactly once, on the terminal status transition.
    pub completed_at: Option<DateTime<Utc>>,

    /// Current lifecycle status.
    pub status: RunStatus,
}

/// The textual result produced by executing one stage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    /// Name of the stage that produced this output.
    pub stage_name: String,

    /// Full output text.
    pub text: String,

    /// When the output was produced.
    pub produced_at: DateTime<Utc>,
}
