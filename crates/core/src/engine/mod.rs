//! Pipeline execution engine.
//!
//! The PipelineRunner executes investigation stages strictly sequentially,
//! feeding each stage the accumulated outputs of its dependencies and
//! recording stage lifecycle events on the run's session log.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use inq_protocol::{SessionEventType, StageOutput};

use crate::executor::{collect_output, ExecutionRequest, ExecutorError, StageExecutor};
use crate::session::SessionLog;
use crate::stages::{Stage, StageError};

/// Errors surfaced by pipeline execution.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Prompt resolution failed (e.g., a dependency output was missing).
    #[error(transparent)]
    Stage(#[from] StageError),

    /// A stage's executor failed; later stages were not attempted.
    #[error("Stage '{stage}' failed: {source}")]
    Execution {
        stage: String,
        source: ExecutorError,
    },

    /// The runner was handed an empty stage list.
    #[error("Pipeline contains no stages")]
    EmptyPipeline,
}

/// Result of a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Output of the last stage. This is the investigation report.
    pub final_output: String,

    /// Outputs of every stage, keyed by stage name.
    pub all_outputs: HashMap<String, StageOutput>,
}

/// Executes a fixed sequence of stages against one executor.
///
/// The runner holds no per-run state: each call to [`run`](Self::run)
/// is independent, so one runner can serve many concurrent runs.
pub struct PipelineRunner {
    executor: Arc<dyn StageExecutor>,
    transition_excerpt_limit: usize,
    model: String,
}

impl PipelineRunner {
    pub fn new(
        executor: Arc<dyn StageExecutor>,
        transition_excerpt_limit: usize,
        model: String,
    ) -> Self {
        Self {
            executor,
            transition_excerpt_limit,
            model,
        }
    }

    /// Execute `stages` in order for `topic`, recording events on `session`.
    ///
    /// Each stage sees the full outputs of the stages it declares as
    /// dependencies. The first failing stage aborts the run; stages after
    /// it are not attempted and no partial report is produced.
    ///
    /// # Errors
    ///
    /// `EngineError::EmptyPipeline` for an empty stage list,
    /// `EngineError::Stage` if a prompt cannot be resolved, and
    /// `EngineError::Execution` when an executor fails a stage.
    pub async fn run(
        &self,
        stages: &[Stage],
        topic: &str,
        session: &mut SessionLog,
    ) -> Result<PipelineOutcome, EngineError> {
        if stages.is_empty() {
            return Err(EngineError::EmptyPipeline);
        }

        let mut outputs: HashMap<String, StageOutput> = HashMap::new();
        let mut final_output = String::new();

        for (index, stage) in stages.iter().enumerate() {
            let name = stage.spec.name.clone();

            session.append(
                SessionEventType::StageStart,
                format!("Starting stage: {name}"),
                metadata(&[
                    ("stage", serde_json::json!(name)),
                    ("role", serde_json::json!(stage.spec.role)),
                    ("position", serde_json::json!(index + 1)),
                    ("total", serde_json::json!(stages.len())),
                ]),
            );

            let prompt = stage.render_prompt(topic, &outputs)?;
            let request = ExecutionRequest {
                stage: name.clone(),
                role: stage.spec.role.clone(),
                prompt,
                expected_output: stage.spec.expected_output.clone(),
                model: self.model.clone(),
            };

            info!(stage = %name, "Executing pipeline stage");

            let text = match self.executor.execute(&request).await {
                Ok(stream) => collect_output(stream, &name).await,
                Err(e) => Err(e),
            };

            let text = match text {
                Ok(text) => text,
                Err(source) => {
                    warn!(stage = %name, error = %source, "Stage failed; aborting pipeline");
                    return Err(EngineError::Execution {
                        stage: name,
                        source,
                    });
                }
            };

            session.append(
                SessionEventType::StageOutput,
                format!("Stage completed: {name}"),
                metadata(&[
                    ("stage", serde_json::json!(name)),
                    ("output_length", serde_json::json!(text.len())),
                ]),
            );

            if let Some(next) = stages.get(index + 1) {
                let excerpt: String = text.chars().take(self.transition_excerpt_limit).collect();
                session.append(
                    SessionEventType::StageTransition,
                    format!("Passing output from {name} to {}", next.spec.name),
                    metadata(&[
                        ("from", serde_json::json!(name)),
                        ("to", serde_json::json!(next.spec.name)),
                        ("data_passed", serde_json::json!(excerpt)),
                    ]),
                );
            }

            final_output = text.clone();
            outputs.insert(
                name.clone(),
                StageOutput {
                    stage_name: name,
                    text,
                    produced_at: Utc::now(),
                },
            );
        }

        Ok(PipelineOutcome {
            final_output,
            all_outputs: outputs,
        })
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
