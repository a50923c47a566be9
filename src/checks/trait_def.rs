//! Probe trait and result types for readiness checks
//!
//! A probe verifies one aspect of deployment readiness and reports a
//! [`CheckResult`]. Returning `Err` (or panicking) is a fault; the runner
//! converts faults into failing results so they never abort a run.
//!
//! Any `Fn() -> GateResult<CheckResult>` closure is a probe, so ad-hoc
//! checks need no extra type:
//!
//! ```rust,ignore
//! registry.add_check("Feature Flags", || Ok(CheckResult::pass("flags synced")));
//! ```

use crate::core::error::GateResult;
use serde::Serialize;
use std::fmt;

/// Outcome of a single probe invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
  /// Whether the check passed
  pub passed: bool,
  /// Human-readable description of the outcome or cause of failure
  pub message: String,
}

impl CheckResult {
  /// Create a passing check result
  pub fn pass(message: impl Into<String>) -> Self {
    Self {
      passed: true,
      message: message.into(),
    }
  }

  /// Create a failing check result
  pub fn fail(message: impl Into<String>) -> Self {
    Self {
      passed: false,
      message: message.into(),
    }
  }
}

/// How a check ended, as shown in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
  /// Probe returned `passed = true`
  Passed,
  /// Probe returned `passed = false`
  Failed,
  /// Probe returned an error or panicked
  Faulted,
}

impl fmt::Display for Outcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Outcome::Passed => write!(f, "PASSED"),
      Outcome::Failed => write!(f, "FAILED"),
      Outcome::Faulted => write!(f, "ERROR"),
    }
  }
}

/// Readiness probe
///
/// # Example
///
/// ```rust,ignore
/// struct CacheWarmProbe { environment: String }
///
/// impl Probe for CacheWarmProbe {
///   fn run(&self) -> GateResult<CheckResult> {
///     if cache_is_warm(&self.environment)? {
///       Ok(CheckResult::pass("Cache warmed"))
///     } else {
///       Ok(CheckResult::fail("Cache still cold"))
///     }
///   }
/// }
/// ```
pub trait Probe: Send + Sync {
  /// Run the probe once
  fn run(&self) -> GateResult<CheckResult>;

  /// What this probe verifies, shown by `--list`
  fn description(&self) -> Option<&str> {
    None
  }
}

impl<F> Probe for F
where
  F: Fn() -> GateResult<CheckResult> + Send + Sync,
{
  fn run(&self) -> GateResult<CheckResult> {
    self()
  }
}
