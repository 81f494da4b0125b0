//! Investigation orchestration facade.
//!
//! `Investigator` is the single entry point the HTTP server and CLI call.
//! It owns the wiring: it validates input, creates the run and its session
//! log, builds the stage catalog for the requested depth, drives the
//! pipeline runner, persists the report, and exports the session trail.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use inq_protocol::{Depth, Run, RunStatus, SessionEventType, SessionSummary};

use crate::config::AppConfig;
use crate::engine::{EngineError, PipelineRunner};
use crate::executor::StageExecutor;
use crate::reports::{ReportError, ReportSink};
use crate::session::{SessionError, SessionLog};
use crate::stages::investigation_stages;
use crate::state::run::{complete_run, create_run, fail_run, start_run};
use crate::state::{RunProgress, RunRegistry};

/// Errors surfaced by [`Investigator::investigate`].
#[derive(Error, Debug)]
pub enum InvestigateError {
    /// The topic or depth was rejected before any stage ran.
    #[error("{0}")]
    InvalidArgument(String),

    /// The pipeline aborted on a stage failure.
    #[error(transparent)]
    StageExecutionFailure(#[from] EngineError),

    /// The session trail could not be exported.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The report could not be persisted.
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Everything a completed investigation produced.
#[derive(Debug, Clone)]
pub struct Investigation {
    /// Final state of the run (always Completed here).
    pub run: Run,

    /// Full report text.
    pub report: String,

    /// Where the report was persisted.
    pub report_file: PathBuf,

    /// Summary of the exported session trail.
    pub session: SessionSummary,
}

/// Orchestrates complete investigation runs.
pub struct Investigator {
    config: AppConfig,
    sink: ReportSink,
    runner: PipelineRunner,
    registry: Option<RunRegistry>,
}

impl Investigator {
    /// Build an investigator from configuration and an executor.
    pub fn new(config: AppConfig, executor: Arc<dyn StageExecutor>) -> Self {
        let sink = ReportSink::new(&config.reports_dir, config.report_stem_limit);
        let runner = PipelineRunner::new(
            executor,
            config.transition_excerpt_limit,
            config.executor.model.clone(),
        );
        Self {
            config,
            sink,
            runner,
            registry: None,
        }
    }

    /// Publish run progress to `registry` so it can be queried while the
    /// run is in flight.
    pub fn with_registry(mut self, registry: RunRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// The report sink this investigator persists to.
    pub fn reports(&self) -> &ReportSink {
        &self.sink
    }

    /// Run a full investigation of `topic` at `depth`.
    ///
    /// The happy path produces exactly one report artifact, a completed
    /// run, and an exported session trail whose last event is a
    /// `run_complete` with `success: true`. On failure no report is
    /// written, the run is marked failed, and the session trail is still
    /// exported on a best-effort basis.
    ///
    /// # Errors
    ///
    /// `InvestigateError::InvalidArgument` for an empty topic or unknown
    /// depth, `StageExecutionFailure` when a stage aborts the pipeline,
    /// and `Report`/`Session` when persistence fails after a successful
    /// pipeline.
    pub async fn investigate(
        &self,
        topic: &str,
        depth: &str,
    ) -> Result<Investigation, InvestigateError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(InvestigateError::InvalidArgument(
                "Topic is required".to_string(),
            ));
        }
        let depth: Depth = depth
            .parse()
            .map_err(|e: inq_protocol::ParseDepthError| {
                InvestigateError::InvalidArgument(e.to_string())
            })?;

        let mut session = SessionLog::new(&self.config.logs_dir);
        let mut run = create_run(topic, depth, session.session_id());

        if let Some(registry) = &self.registry {
            registry
                .insert(
                    run.id,
                    RunProgress {
                        topic: topic.to_string(),
                        status: RunStatus::Pending,
                        phase: "initializing".to_string(),
                        message: "Investigation accepted".to_string(),
                    },
                )
                .await;
        }

        session.append(
            SessionEventType::RunStart,
            format!("Starting investigation: {topic}"),
            metadata(&[
                ("topic", serde_json::json!(topic)),
                ("depth", serde_json::json!(depth.as_str())),
                ("run_id", serde_json::json!(run.id)),
            ]),
        );

        start_run(&mut run);
        if let Some(registry) = &self.registry {
            registry
                .update(run.id, RunStatus::Running, "running", "Pipeline executing")
                .await;
        }

        info!(topic = %topic, depth = %depth, run_id = %run.id, "Starting investigation");

        let outcome = match investigation_stages(depth) {
            Ok(stages) => self.runner.run(&stages, topic, &mut session).await,
            Err(e) => Err(EngineError::from(e)),
        };

        match outcome {
            Ok(outcome) => {
                let saved = self.sink.save(topic, &outcome.final_output)?;

                session.append(
                    SessionEventType::RunComplete,
                    format!("Investigation completed: {topic}"),
                    metadata(&[
                        ("success", serde_json::json!(true)),
                        ("report_file", serde_json::json!(saved.filename)),
                        ("stages", serde_json::json!(outcome.all_outputs.len())),
                    ]),
                );
                complete_run(&mut run);

                session.export()?;
                let summary = session.summary();

                if let Some(registry) = &self.registry {
                    registry
                        .update(
                            run.id,
                            RunStatus::Completed,
                            "finished",
                            &format!("Report saved to {}", saved.filename),
                        )
                        .await;
                }

                info!(run_id = %run.id, report = %saved.filename, "Investigation completed");

                Ok(Investigation {
                    run,
                    report: outcome.final_output,
                    report_file: saved.path,
                    session: summary,
                })
            }
            Err(e) => {
                session.append(
                    SessionEventType::RunComplete,
                    format!("Investigation failed: {topic}"),
                    metadata(&[
                        ("success", serde_json::json!(false)),
                        ("error", serde_json::json!(e.to_string())),
                    ]),
                );
                fail_run(&mut run);

                // The pipeline error is the one worth reporting; a broken
                // log sink only gets a warning.
                if let Err(export_err) = session.export() {
                    warn!(error = %export_err, "Failed to export session trail for failed run");
                }

                if let Some(registry) = &self.registry {
                    registry
                        .update(run.id, RunStatus::Failed, "error", &e.to_string())
                        .await;
                }

                error!(run_id = %run.id, error = %e, "Investigation failed");
                Err(e.into())
            }
        }
    }
}

fn metadata(
    pairs: &[(&str, serde_json::Value)],
) -> serde_json::Map<String, serde_json::Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}
