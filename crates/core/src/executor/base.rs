//! Base StageExecutor trait and supporting types.

use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio_stream::{Stream, StreamExt};

/// Everything an executor needs to run one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    /// Name of the stage being executed (for logging and scripted mocks).
    pub stage: String,

    /// Semantic role label (e.g., "MCP Protocol Researcher").
    pub role: String,

    /// Fully-resolved prompt text.
    pub prompt: String,

    /// Declared output contract, documentation-level only.
    pub expected_output: String,

    /// Model identifier, empty for the executor's default.
    pub model: String,
}

/// Incremental output from a running stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorEvent {
    /// A chunk of stage output text.
    Chunk(String),

    /// The stage finished successfully.
    Completed,
}

/// Errors surfaced by a stage executor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    /// The executor cannot run at all (e.g., binary not on PATH).
    #[error("Executor not available: {0}")]
    NotAvailable(String),

    /// The underlying execution failed or exited abnormally.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// The execution completed but produced no output text.
    #[error("Executor produced no output: {0}")]
    EmptyOutput(String),
}

/// Stream of executor events for one stage execution.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<ExecutorEvent, ExecutorError>> + Send>>;

/// The agent-execution collaborator seam.
///
/// Implementations may be arbitrarily slow and may fail; the pipeline
/// runner only observes eventual success or failure of the whole stage.
/// No retry or timeout policy lives behind this trait.
#[async_trait]
pub trait StageExecutor: Send + Sync {
    /// Whether this executor can run at all in the current environment.
    async fn check_availability(&self) -> bool;

    /// Execute one stage, streaming its output.
    async fn execute(&self, request: &ExecutionRequest) -> Result<EventStream, ExecutorError>;
}

/// Drain an event stream into the stage's full output text.
///
/// Chunks are concatenated in order. The first error aborts collection and
/// is returned as-is. An execution that completes without producing any
/// text yields `ExecutorError::EmptyOutput`.
pub async fn collect_output(
    mut stream: EventStream,
    stage: &str,
) -> Result<String, ExecutorError> {
    let mut text = String::new();

    while let Some(event) = stream.next().await {
        match event? {
            ExecutorEvent::Chunk(chunk) => text.push_str(&chunk),
            ExecutorEvent::Completed => break,
        }
    }

    if text.trim().is_empty() {
        return Err(ExecutorError::EmptyOutput(format!(
            "stage '{stage}' completed without output"
        )));
    }

    Ok(text)
}
