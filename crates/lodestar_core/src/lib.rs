//! Shared infrastructure for Lodestar crates.
//!
//! Currently this is logging setup: [`TracingConfig`] describes a
//! `tracing-subscriber` installation and [`TracingConfig::init`] installs it.

pub mod logging;

pub use logging::{LOG_ENV_VAR, TracingConfig, TracingFormat};
