//! Scripted executors for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use inq_core::executor::{
    EventStream, ExecutionRequest, ExecutorError, ExecutorEvent, StageExecutor,
};

/// Wraps another executor and records every request it receives.
///
/// Used to assert on the prompts stages actually see, in particular that
/// upstream outputs are chained into downstream prompts.
pub struct RecordingExecutor<E> {
    inner: E,
    requests: Arc<Mutex<Vec<ExecutionRequest>>>,
}

impl<E: StageExecutor> RecordingExecutor<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All requests seen so far, in execution order.
    pub fn requests(&self) -> Vec<ExecutionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Handle for reading requests after the executor has been moved
    /// into an `Arc<dyn StageExecutor>`.
    pub fn request_log(&self) -> Arc<Mutex<Vec<ExecutionRequest>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl<E: StageExecutor> StageExecutor for RecordingExecutor<E> {
    async fn check_availability(&self) -> bool {
        self.inner.check_availability().await
    }

    async fn execute(&self, request: &ExecutionRequest) -> Result<EventStream, ExecutorError> {
        self.requests.lock().unwrap().push(request.clone());
        self.inner.execute(request).await
    }
}

/// An executor that streams its response in fixed-size chunks, exercising
/// the chunk-concatenation path the mocks normally bypass.
pub struct ChunkingExecutor {
    pub response: String,
    pub chunk_size: usize,
}

#[async_trait]
impl StageExecutor for ChunkingExecutor {
    async fn check_availability(&self) -> bool {
        true
    }

    async fn execute(&self, _request: &ExecutionRequest) -> Result<EventStream, ExecutorError> {
        let chunks: Vec<Result<ExecutorEvent, ExecutorError>> = self
            .response
            .as_bytes()
            .chunks(self.chunk_size)
            .map(|c| {
                Ok(ExecutorEvent::Chunk(
                    String::from_utf8_lossy(c).to_string(),
                ))
            })
            .chain(std::iter::once(Ok(ExecutorEvent::Completed)))
            .collect();
        Ok(Box::pin(tokio_stream::iter(chunks)))
    }
}
