//! Mock stage executor for deterministic testing.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::executor::base::{
    EventStream, ExecutionRequest, ExecutorError, ExecutorEvent, StageExecutor,
};

/// A scriptable executor used throughout the test suites.
///
/// Responds per stage name when a scripted response exists, otherwise with
/// the default response. Can be configured to be unavailable or to fail a
/// specific stage.
#[derive(Debug, Clone)]
pub struct MockExecutor {
    available: bool,
    default_response: String,
    responses: HashMap<String, String>,
    fail_on: Option<String>,
}

impl MockExecutor {
    /// An executor that answers every stage with a fixed response.
    pub fn success() -> Self {
        Self {
            available: true,
            default_response: "Mock stage output".to_string(),
            responses: HashMap::new(),
            fail_on: None,
        }
    }

    /// An executor whose availability probe fails.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            default_response: String::new(),
            responses: HashMap::new(),
            fail_on: None,
        }
    }

    /// An executor that fails every stage it is asked to run.
    pub fn failing() -> Self {
        Self::success().with_failure_on("")
    }

    /// Script a response for a specific stage name.
    pub fn with_response(mut self, stage: &str, response: &str) -> Self {
        self.responses
            .insert(stage.to_string(), response.to_string());
        self
    }

    /// Fail when asked to execute `stage`. The empty string fails every
    /// stage.
    pub fn with_failure_on(mut self, stage: &str) -> Self {
        self.fail_on = Some(stage.to_string());
        self
    }

    fn response_for(&self, stage: &str) -> String {
        self.responses
            .get(stage)
            .cloned()
            .unwrap_or_else(|| self.default_response.clone())
    }
}

#[async_trait]
impl StageExecutor for MockExecutor {
    async fn check_availability(&self) -> bool {
        self.available
    }

    async fn execute(&self, request: &ExecutionRequest) -> Result<EventStream, ExecutorError> {
        if !self.available {
            return Err(ExecutorError::NotAvailable(
                "Mock executor not available".to_string(),
            ));
        }

        let should_fail = self
            .fail_on
            .as_deref()
            .is_some_and(|fail| fail.is_empty() || fail == request.stage);

        let events: Vec<Result<ExecutorEvent, ExecutorError>> = if should_fail {
            vec![Err(ExecutorError::ExecutionFailed(format!(
                "Mock failure in stage '{}'",
                request.stage
            )))]
        } else {
            vec![
                Ok(ExecutorEvent::Chunk(self.response_for(&request.stage))),
                Ok(ExecutorEvent::Completed),
            ]
        };

        Ok(Box::pin(tokio_stream::iter(events)))
    }
}
