//! Append-only session log.
//!
//! A `SessionLog` accumulates structured events for exactly one run.
//! Appending is an in-memory push: O(1), infallible, no I/O. Export
//! serializes the accumulated events plus a summary to the logs directory
//! and is the only fallible operation.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use inq_protocol::{SessionEvent, SessionEventType, SessionSummary};

/// Errors surfaced by the session log.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The log sink was unwritable. Surfaced to the caller, never
    /// swallowed and never retried.
    #[error("Failed to write session log to {path}: {source}")]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Locations of the two files written by [`SessionLog::export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionExport {
    /// Plain-text log: `session_<id>_<YYYYMMDD_HHMMSS>.log`.
    pub log_file: PathBuf,

    /// Structured export: `session_<id>_events.json`.
    pub events_file: PathBuf,
}

/// Event trail scoped to one run.
pub struct SessionLog {
    session_id: String,
    started_at: DateTime<Utc>,
    logs_dir: PathBuf,
    events: Vec<SessionEvent>,
}

impl SessionLog {
    /// Create a fresh session with a generated opaque 8-character id.
    pub fn new(logs_dir: &Path) -> Self {
        let id = Uuid::new_v4().simple().to_string();
        Self::with_session_id(logs_dir, &id[..8])
    }

    /// Create a session with a caller-chosen id (used by tests).
    pub fn with_session_id(logs_dir: &Path, session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            started_at: Utc::now(),
            logs_dir: logs_dir.to_path_buf(),
            events: Vec::new(),
        }
    }

    /// Opaque identifier correlating all events of this session.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// When the session was created.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Append one event. In-memory only; never fails, never blocks on I/O.
    pub fn append(
        &mut self,
        event_type: SessionEventType,
        message: impl Into<String>,
        metadata: serde_json::Map<String, serde_json::Value>,
    ) {
        self.events.push(SessionEvent {
            timestamp: Utc::now(),
            session_id: self.session_id.clone(),
            event_type,
            message: message.into(),
            metadata,
        });
    }

    /// All events appended so far, in call order.
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Summary of the session derived entirely from recorded state, so
    /// that repeated exports of an unchanged session are byte-identical.
    pub fn summary(&self) -> SessionSummary {
        let duration_seconds = self
            .events
            .last()
            .map(|event| {
                (event.timestamp - self.started_at)
                    .num_milliseconds()
                    .max(0) as f64
                    / 1000.0
            })
            .unwrap_or(0.0);

        SessionSummary {
            session_id: self.session_id.clone(),
            started_at: self.started_at,
            duration_seconds,
            event_count: self.events.len(),
            log_file: self.log_file_path().display().to_string(),
        }
    }

    fn log_file_path(&self) -> PathBuf {
        self.logs_dir.join(format!(
            "session_{}_{}.log",
            self.session_id,
            self.started_at.format("%Y%m%d_%H%M%S")
        ))
    }

    fn events_file_path(&self) -> PathBuf {
        self.logs_dir
            .join(format!("session_{}_events.json", self.session_id))
    }

    /// Serialize all accumulated events plus the summary to the logs
    /// directory.
    ///
    /// Export is read-only over the accumulated state: it neither mutates
    /// nor consumes events, and exporting twice with no interleaved
    /// `append` yields byte-identical files.
    ///
    /// # Errors
    ///
    /// `SessionError::Persistence` if the directory or either file cannot
    /// be written.
    pub fn export(&self) -> Result<SessionExport, SessionError> {
        std::fs::create_dir_all(&self.logs_dir).map_err(|source| SessionError::Persistence {
            path: self.logs_dir.clone(),
            source,
        })?;

        let log_file = self.log_file_path();
        let mut text = String::new();
        for event in &self.events {
            let metadata = serde_json::Value::Object(event.metadata.clone());
            text.push_str(&format!(
                "[{}] [SESSION:{}] [{}] {} | Metadata: {}\n",
                event.timestamp.format("%Y-%m-%d %H:%M:%S"),
                event.session_id,
                event.event_type,
                event.message,
                metadata
            ));
        }
        std::fs::write(&log_file, text).map_err(|source| SessionError::Persistence {
            path: log_file.clone(),
            source,
        })?;

        let events_file = self.events_file_path();
        let export = serde_json::json!({
            "session_summary": self.summary(),
            "events": self.events,
        });
        let json = serde_json::to_string_pretty(&export).map_err(|source| {
            SessionError::Persistence {
                path: events_file.clone(),
                source: std::io::Error::other(source),
            }
        })?;
        std::fs::write(&events_file, json).map_err(|source| SessionError::Persistence {
            path: events_file.clone(),
            source,
        })?;

        Ok(SessionExport {
            log_file,
            events_file,
        })
    }
}
