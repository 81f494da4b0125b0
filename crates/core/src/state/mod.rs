//! State management for investigation runs.
//!
//! This module provides:
//! - Run lifecycle transition logic
//! - RunRegistry for tracking in-flight and finished runs

pub mod registry;
pub mod run;

pub use registry::{RunProgress, RunRegistry};
pub use run::{complete_run, create_run, fail_run, start_run};
