//! Stage executor abstraction.
//!
//! The core treats agent execution as an opaque, possibly slow, possibly
//! failing collaborator. This module defines the seam ([`StageExecutor`])
//! plus two implementations: a subprocess-backed adapter for real use and
//! a mock for deterministic tests.

pub mod base;
pub mod command;
pub mod mock;

pub use base::{
    collect_output, EventStream, ExecutionRequest, ExecutorError, ExecutorEvent, StageExecutor,
};
pub use command::CommandExecutor;
pub use mock::MockExecutor;
