//! Run lifecycle transitions.
//!
//! A run moves Pending -> Running -> (Completed | Failed). The terminal
//! states are absorbing: once a run is completed or failed no transition
//! changes it again, so these functions are safe to call from cleanup
//! paths without checking first.

use chrono::Utc;
use inq_protocol::{Depth, Run, RunStatus};
use uuid::Uuid;

/// Create a new Run with Pending status.
///
/// The run is bound at birth to the session that will record its events.
pub fn create_run(topic: &str, depth: Depth, session_id: &str) -> Run {
    Run {
        id: Uuid::new_v4(),
        topic: topic.to_string(),
        depth,
        session_id: session_id.to_string(),
        started_at: Utc::now(),
        completed_at: None,
        status: RunStatus::Pending,
    }
}

/// Transition the run to Running.
///
/// No-op if the run is already in a terminal state.
pub fn start_run(run: &mut Run) {
    if run.status.is_terminal() {
        return;
    }
    run.status = RunStatus::Running;
}

/// Mark the run as completed and stamp its completion time.
///
/// No-op if the run is already in a terminal state.
pub fn complete_run(run: &mut Run) {
    if run.status.is_terminal() {
        return;
    }
    run.status = RunStatus::Completed;
    run.completed_at = Some(Utc::now());
}

/// Mark the run as failed and stamp its completion time.
///
/// No-op if the run is already in a terminal state, so a failure path
/// that also runs on success-after-cleanup cannot downgrade a completed
/// run.
pub fn fail_run(run: &mut Run) {
    if run.status.is_terminal() {
        return;
    }
    run.status = RunStatus::Failed;
    run.completed_at = Some(Utc::now());
}
