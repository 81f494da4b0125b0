//! # inq-core
//!
//! Core investigation pipeline engine for inquest.
//!
//! This crate provides:
//! - Configuration loading from `inquest.toml` and the environment
//! - The stage catalog: a fixed four-stage investigation chain
//! - Stage executor abstraction and adapter implementations
//! - Sequential pipeline runner with session-scoped event logging
//! - Durable report sink and run registry
//! - The orchestration facade tying all of the above together
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`stages`]: Stage definitions and prompt templating
//! - [`executor`]: Stage executor trait and adapters
//! - [`engine`]: Sequential pipeline runner
//! - [`session`]: Append-only session log
//! - [`reports`]: Report sink persistence
//! - [`state`]: Run lifecycle transitions and the run registry
//! - [`investigate`]: Orchestration facade

pub mod config;
pub mod engine;
pub mod executor;
pub mod investigate;
pub mod reports;
pub mod session;
pub mod stages;
pub mod state;
