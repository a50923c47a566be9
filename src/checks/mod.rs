//! Readiness check engine
//!
//! Checks are registered in a [`CheckRegistry`] and executed by a
//! [`CheckRunner`] against one environment. Every check yields exactly one
//! [`CheckResult`]: probes that return an error or panic are recorded as
//! failures, and the run always continues to the next check.
//!
//! # Example
//!
//! ```rust,ignore
//! use readiness_gate::checks::{CheckRegistry, CheckResult, CheckRunner};
//!
//! let environment = "staging".to_string();
//! let mut registry = CheckRegistry::new();
//!
//! let env = environment.clone();
//! registry.add_check("Health Endpoint", move || {
//!   Ok(CheckResult::pass(format!("{} is healthy", env)))
//! });
//!
//! let mut runner = CheckRunner::new(environment, registry);
//! let ready = runner.run_all_checks();
//! std::process::exit(if ready { 0 } else { 1 });
//! ```

mod registry;
mod runner;
mod trait_def;

pub use registry::{Check, CheckRegistry};
pub use runner::{CheckRecord, CheckRunner, RunState, RunSummary};
pub use trait_def::{CheckResult, Outcome, Probe};
