//! Subprocess-backed stage executor.
//!
//! Spawns a configured external command for each stage execution, writes
//! the resolved prompt (plus the declared output contract) to its stdin,
//! and streams stdout back as output chunks. A non-zero exit status fails
//! the stage. No retries, no timeout: the child's fate is the stage's fate.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::debug;

use crate::config::ExecutorConfig;
use crate::executor::base::{
    EventStream, ExecutionRequest, ExecutorError, ExecutorEvent, StageExecutor,
};

/// Executes stages by invoking an external CLI.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    command: String,
    args: Vec<String>,
    model: String,
}

impl CommandExecutor {
    /// Create an executor from the application's executor configuration.
    pub fn new(config: &ExecutorConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            model: config.model.clone(),
        }
    }

    /// Full text written to the child's stdin for one request.
    fn stdin_payload(request: &ExecutionRequest) -> String {
        format!(
            "{}\n\n# Expected output\n\n{}\n",
            request.prompt, request.expected_output
        )
    }

    fn build_args(&self, request: &ExecutionRequest) -> Vec<String> {
        let mut args = self.args.clone();
        let model = if request.model.is_empty() {
            &self.model
        } else {
            &request.model
        };
        if !model.is_empty() {
            args.push("--model".to_string());
            args.push(model.clone());
        }
        args
    }
}

#[async_trait]
impl StageExecutor for CommandExecutor {
    async fn check_availability(&self) -> bool {
        which::which(&self.command).is_ok()
    }

    async fn execute(&self, request: &ExecutionRequest) -> Result<EventStream, ExecutorError> {
        let command = self.command.clone();
        let args = self.build_args(request);
        let payload = Self::stdin_payload(request);
        let stage = request.stage.clone();

        debug!(stage = %stage, command = %command, "Spawning stage executor");

        let stream = async_stream::stream! {
            let mut cmd = Command::new(&command);
            cmd.args(&args);
            cmd.stdin(Stdio::piped());
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());

            let mut child = match cmd.spawn() {
                Ok(child) => child,
                Err(e) => {
                    yield Err(ExecutorError::ExecutionFailed(format!(
                        "Failed to spawn command '{command}': {e}"
                    )));
                    return;
                }
            };

            // Feed the prompt from its own task so the stdout drain below
            // runs while the child is still consuming stdin. Writing the
            // whole prompt first would deadlock once both pipes are full.
            // Dropping stdin at the end of the task gives the child EOF.
            let writer = child.stdin.take().map(|mut stdin| {
                tokio::spawn(async move { stdin.write_all(payload.as_bytes()).await })
            });

            let stdout = match child.stdout.take() {
                Some(stdout) => stdout,
                None => {
                    yield Err(ExecutorError::ExecutionFailed(
                        "Failed to capture stdout".to_string(),
                    ));
                    return;
                }
            };

            let reader = BufReader::new(stdout);
            let mut lines = reader.lines();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => yield Ok(ExecutorEvent::Chunk(format!("{line}\n"))),
                    Ok(None) => break,
                    Err(e) => {
                        yield Err(ExecutorError::ExecutionFailed(format!(
                            "Failed to read output from '{command}': {e}"
                        )));
                        return;
                    }
                }
            }

            if let Some(writer) = writer {
                match writer.await {
                    Ok(Ok(())) => {}
                    // The child may exit without draining stdin; a closed
                    // pipe is its choice, not a stage failure.
                    Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                    Ok(Err(e)) => {
                        yield Err(ExecutorError::ExecutionFailed(format!(
                            "Failed to write prompt to '{command}': {e}"
                        )));
                        return;
                    }
                    Err(e) => {
                        yield Err(ExecutorError::ExecutionFailed(format!(
                            "Prompt writer for '{command}' panicked: {e}"
                        )));
                        return;
                    }
                }
            }

            match child.wait().await {
                Ok(status) if status.success() => {
                    yield Ok(ExecutorEvent::Completed);
                }
                Ok(status) => {
                    yield Err(ExecutorError::ExecutionFailed(format!(
                        "Stage '{stage}' executor exited with {status}"
                    )));
                }
                Err(e) => {
                    yield Err(ExecutorError::ExecutionFailed(format!(
                        "Failed to wait for '{command}': {e}"
                    )));
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
