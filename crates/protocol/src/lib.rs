//! # inq-protocol
//!
//! Core protocol definitions and data models for inquest.
//!
//! This crate defines all shared data structures used for:
//! - Stage definitions and investigation depth levels
//! - Runtime run state and stage outputs
//! - Session log events and summaries
//! - REST API request/response payloads
//!
//! ## Modules
//!
//! - [`stage_models`]: Stage specifications and depth levels
//! - [`run_models`]: Runtime run state and stage outputs
//! - [`session_models`]: Append-only session log events
//! - [`api_models`]: REST API payloads
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, uuid, and chrono
//! - Independent compilation: No dependencies on other inquest crates

pub mod api_models;
pub mod run_models;
pub mod session_models;
pub mod stage_models;

// Re-export all public types for convenience
pub use api_models::*;
pub use run_models::*;
pub use session_models::*;
pub use stage_models::*;
