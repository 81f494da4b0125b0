//! Registry of investigation runs, keyed by run id.
//!
//! The registry is the shared source of truth for run progress across
//! async tasks: the orchestrator writes to it as a run advances and the
//! HTTP status endpoint reads from it. Keying by run id means two
//! concurrent runs on the same topic never collide.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use inq_protocol::RunStatus;

/// Progress snapshot for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunProgress {
    /// Topic under investigation.
    pub topic: String,

    /// Lifecycle status of the run.
    pub status: RunStatus,

    /// Coarse phase label ("initializing", "finished", "error").
    pub phase: String,

    /// Human-readable progress message.
    pub message: String,
}

/// Thread-safe registry of all runs this process knows about.
///
/// Cloning is cheap: clones share the same underlying map.
#[derive(Clone, Default)]
pub struct RunRegistry {
    runs: Arc<Mutex<HashMap<Uuid, RunProgress>>>,
}

impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a run, replacing any previous entry for the same id.
    pub async fn insert(&self, run_id: Uuid, progress: RunProgress) {
        let mut runs = self.runs.lock().await;
        runs.insert(run_id, progress);
    }

    /// Update an existing run's progress. Unknown ids are ignored.
    pub async fn update(&self, run_id: Uuid, status: RunStatus, phase: &str, message: &str) {
        let mut runs = self.runs.lock().await;
        if let Some(progress) = runs.get_mut(&run_id) {
            progress.status = status;
            progress.phase = phase.to_string();
            progress.message = message.to_string();
        }
    }

    /// Snapshot of one run's progress, or None for an unknown id.
    pub async fn get(&self, run_id: Uuid) -> Option<RunProgress> {
        let runs = self.runs.lock().await;
        runs.get(&run_id).cloned()
    }

    /// Number of registered runs.
    pub async fn len(&self) -> usize {
        let runs = self.runs.lock().await;
        runs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
