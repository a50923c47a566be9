//! Launch readiness gate
//!
//! Registers readiness checks for a deployment environment, runs them in
//! order with per-check fault isolation and turns the outcome into a single
//! go/no-go verdict.

pub mod checks;
pub mod commands;
pub mod core;
pub mod probes;
pub mod ui;
