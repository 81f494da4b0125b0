//! Configuration loading and management.
//!
//! This module provides the explicit configuration struct constructed once
//! at process start and passed into the orchestration facade and the report
//! sink. There is no ambient global settings object.

pub mod error;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use loader::load_config;
pub use models::{AppConfig, ExecutorConfig};
