//! Core building blocks shared by all commands
//!
//! - **config**: gate.toml parsing and validation
//! - **error**: error types with exit codes and contextual help messages
//! - **logging**: tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;
