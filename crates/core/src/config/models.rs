//! Configuration models.
//!
//! `AppConfig` aggregates every tunable of the system. It is deserialized
//! from `inquest.toml` when present and falls back to defaults otherwise;
//! every field can also be overridden through the environment (see
//! [`super::loader`]).

use serde::Deserialize;
use std::path::PathBuf;

/// How the external agent-execution collaborator is invoked.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Executable that runs one stage (receives the prompt on stdin and
    /// writes the stage output to stdout).
    pub command: String,

    /// Extra arguments passed before the model flag.
    pub args: Vec<String>,

    /// Model identifier forwarded to the executable via `--model`.
    /// Empty means the executable's default.
    pub model: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            command: "inquest-agent".to_string(),
            args: Vec::new(),
            model: String::new(),
        }
    }
}

/// Unified application configuration.
///
/// Constructed once at process start and passed by value or reference into
/// the facade, the report sink, and the server.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory where final report artifacts are written.
    pub reports_dir: PathBuf,

    /// Directory where session logs are exported.
    pub logs_dir: PathBuf,

    /// External stage executor invocation.
    pub executor: ExecutorConfig,

    /// Maximum number of characters of forwarded data recorded in a
    /// `stage_transition` event. Exists purely to bound log size.
    pub transition_excerpt_limit: usize,

    /// Maximum length of the sanitized topic stem in report filenames.
    pub report_stem_limit: usize,

    /// Upper bound on concurrently executing pipeline runs in the server.
    pub max_concurrent_runs: usize,

    /// Address the REST server binds to.
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("outputs"),
            logs_dir: PathBuf::from("logs"),
            executor: ExecutorConfig::default(),
            transition_excerpt_limit: 500,
            report_stem_limit: 50,
            max_concurrent_runs: 3,
            bind_addr: "0.0.0.0:8000".to_string(),
        }
    }
}
