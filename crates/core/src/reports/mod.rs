//! Report persistence and retrieval.
//!
//! Reports are markdown files written to a flat reports directory with
//! names derived from the investigated topic. The filename encodes the
//! topic (sanitized) and a timestamp, so the directory doubles as the
//! run history.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use inq_protocol::RecentReport;

/// Errors surfaced by the report sink.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The reports directory or a report file could not be written or read.
    #[error("Report storage error at {path}: {source}")]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The requested report does not exist (or the name was not a plain
    /// filename).
    #[error("Report not found: {0}")]
    NotFound(String),
}

/// A report written by [`ReportSink::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedReport {
    /// Filename within the reports directory.
    pub filename: String,

    /// Absolute path of the written file.
    pub path: PathBuf,
}

/// Writes and reads investigation reports under one directory.
#[derive(Debug, Clone)]
pub struct ReportSink {
    reports_dir: PathBuf,
    stem_limit: usize,
}

/// Reduce an arbitrary topic to a safe filename stem.
///
/// Keeps alphanumerics, spaces, hyphens, and underscores; everything else
/// becomes an underscore. Spaces become underscores, runs of underscores
/// collapse to one, and leading/trailing underscores are trimmed. The
/// result is truncated to `limit` characters. A topic that sanitizes to
/// nothing falls back to the stem `topic` so the filename stays parseable.
pub fn sanitize_topic(topic: &str, limit: usize) -> String {
    let replaced: String = topic
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let underscored = replaced.trim().replace(' ', "_");

    let mut collapsed = String::with_capacity(underscored.len());
    let mut last_was_underscore = false;
    for c in underscored.chars() {
        if c == '_' {
            if !last_was_underscore {
                collapsed.push(c);
            }
            last_was_underscore = true;
        } else {
            collapsed.push(c);
            last_was_underscore = false;
        }
    }

    let stem: String = collapsed.trim_matches('_').chars().take(limit).collect();
    if stem.is_empty() {
        "topic".to_string()
    } else {
        stem
    }
}

impl ReportSink {
    pub fn new(reports_dir: &Path, stem_limit: usize) -> Self {
        Self {
            reports_dir: reports_dir.to_path_buf(),
            stem_limit,
        }
    }

    /// Write a report for `topic`, returning where it landed.
    ///
    /// The filename is `investigation_<sanitized topic>_<YYYYMMDD_HHMMSS>.md`.
    ///
    /// # Errors
    ///
    /// `ReportError::Persistence` if the directory or file cannot be
    /// written.
    pub fn save(&self, topic: &str, content: &str) -> Result<SavedReport, ReportError> {
        std::fs::create_dir_all(&self.reports_dir).map_err(|source| ReportError::Persistence {
            path: self.reports_dir.clone(),
            source,
        })?;

        let stem = sanitize_topic(topic, self.stem_limit);
        let filename = format!(
            "investigation_{}_{}.md",
            stem,
            Utc::now().format("%Y%m%d_%H%M%S")
        );
        let path = self.reports_dir.join(&filename);

        std::fs::write(&path, content).map_err(|source| ReportError::Persistence {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), "Saved investigation report");

        Ok(SavedReport { filename, path })
    }

    /// List reports, newest first, up to `limit` entries.
    ///
    /// A missing reports directory is an empty history, not an error.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<RecentReport>, ReportError> {
        let entries = match std::fs::read_dir(&self.reports_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ReportError::Persistence {
                    path: self.reports_dir.clone(),
                    source,
                })
            }
        };

        let mut reports = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ReportError::Persistence {
                path: self.reports_dir.clone(),
                source,
            })?;
            let filename = entry.file_name().to_string_lossy().to_string();
            if !filename.starts_with("investigation_") || !filename.ends_with(".md") {
                continue;
            }

            let metadata = entry.metadata().map_err(|source| ReportError::Persistence {
                path: entry.path(),
                source,
            })?;
            let modified: DateTime<Utc> = metadata
                .modified()
                .map_err(|source| ReportError::Persistence {
                    path: entry.path(),
                    source,
                })?
                .into();

            reports.push(RecentReport {
                topic: topic_from_filename(&filename),
                filename,
                timestamp: modified,
                size_kb: metadata.len() as f64 / 1024.0,
            });
        }

        reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        reports.truncate(limit);
        Ok(reports)
    }

    /// Read a report by its exact filename.
    ///
    /// # Errors
    ///
    /// `ReportError::NotFound` if the file does not exist, or if the name
    /// contains a path separator or parent-directory component (only plain
    /// filenames inside the reports directory are addressable).
    pub fn read(&self, filename: &str) -> Result<String, ReportError> {
        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            return Err(ReportError::NotFound(filename.to_string()));
        }

        let path = self.reports_dir.join(filename);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ReportError::NotFound(filename.to_string()))
            }
            Err(source) => Err(ReportError::Persistence { path, source }),
        }
    }
}

/// Best-effort topic reconstruction from a report filename.
///
/// Strips the `investigation_` prefix, the trailing `_YYYYMMDD_HHMMSS`
/// timestamp, and the `.md` extension, then turns underscores back into
/// spaces.
fn topic_from_filename(filename: &str) -> String {
    let stem = filename
        .strip_prefix("investigation_")
        .unwrap_or(filename)
        .strip_suffix(".md")
        .unwrap_or(filename);

    let parts: Vec<&str> = stem.split('_').collect();
    let topic_parts = if parts.len() >= 2
        && parts[parts.len() - 2].len() == 8
        && parts[parts.len() - 2].chars().all(|c| c.is_ascii_digit())
        && parts[parts.len() - 1].len() == 6
        && parts[parts.len() - 1].chars().all(|c| c.is_ascii_digit())
    {
        &parts[..parts.len() - 2]
    } else {
        &parts[..]
    };

    topic_parts.join(" ")
}
