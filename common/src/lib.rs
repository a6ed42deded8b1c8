//! Shared utilities for the infra toolbelt binaries
//!
//! This crate provides common functionality used across all components:
//! - Structured logging initialization
//! - Environment variable parsing helpers
//! - Command execution utilities

pub mod command;
pub mod config;
pub mod logging;

pub use command::{run_checked, Invocation};
pub use config::ConfigExt;
pub use logging::init_logging;
