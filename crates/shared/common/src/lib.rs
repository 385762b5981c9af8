//! Common utilities shared by identity binaries.
//!
//! This crate provides:
//! - Application error wrapping with stable error codes
//! - Environment configuration
//! - Tracing initialisation

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{GeneratorConfig, IdentityConfig};
pub use error::{AppError, AppResult};
pub use telemetry::init_tracing;
