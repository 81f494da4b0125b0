//! Common test utilities and helpers for the core integration tests.
//!
//! This module provides shared functionality across the suites:
//! - Test fixtures (temp workspaces, configs)
//! - Custom assertions over session event trails
//! - Scripted executors

pub mod assertions;
pub mod fixtures;
pub mod mock_executors;

pub use assertions::*;
pub use fixtures::*;
#[allow(unused_imports)]
pub use mock_executors::*;
