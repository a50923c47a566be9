//! Ordered registry of named checks

use super::trait_def::{CheckResult, Probe};
use crate::core::error::GateResult;
use std::fmt;

/// A named probe
pub struct Check {
  name: String,
  probe: Box<dyn Probe>,
}

impl Check {
  /// Create a check
  pub fn new<P: Probe + 'static>(name: impl Into<String>, probe: P) -> Self {
    Self {
      name: name.into(),
      probe: Box::new(probe),
    }
  }

  /// Check name; also the key of its result
  pub fn name(&self) -> &str {
    &self.name
  }

  /// The probe behind this check
  pub fn probe(&self) -> &dyn Probe {
    self.probe.as_ref()
  }
}

impl fmt::Debug for Check {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Check").field("name", &self.name).finish_non_exhaustive()
  }
}

/// Checks in registration order
///
/// Names are not required to be unique. Registration order is execution order.
#[derive(Debug, Default)]
pub struct CheckRegistry {
  checks: Vec<Check>,
}

impl CheckRegistry {
  /// Create an empty registry
  pub fn new() -> Self {
    Self { checks: Vec::new() }
  }

  /// Register a closure check at the end of the sequence
  pub fn add_check<F>(&mut self, name: impl Into<String>, probe: F)
  where
    F: Fn() -> GateResult<CheckResult> + Send + Sync + 'static,
  {
    self.checks.push(Check::new(name, probe));
  }

  /// Register a typed probe at the end of the sequence
  pub fn add_probe(&mut self, name: impl Into<String>, probe: impl Probe + 'static) {
    self.checks.push(Check::new(name, probe));
  }

  /// Registered checks, in order
  pub fn checks(&self) -> &[Check] {
    &self.checks
  }

  /// Registered names, in order
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.checks.iter().map(Check::name)
  }

  pub fn len(&self) -> usize {
    self.checks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.checks.is_empty()
  }

  /// Keep only checks matching the predicate, preserving order
  pub fn retain(&mut self, mut keep: impl FnMut(&Check) -> bool) {
    self.checks.retain(|check| keep(check));
  }
}
