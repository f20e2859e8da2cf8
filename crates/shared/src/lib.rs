//! Shared errors, configuration and logging setup for the pricing workspace.
//!
//! This crate provides:
//! - Application-wide error types
//! - Configuration management
//! - Tracing subscriber initialisation

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
