//! Resource utilization probe
//!
//! Reads a metrics snapshot exported by the environment's monitoring and
//! compares CPU and memory usage against thresholds.

use super::read_json;
use crate::checks::{CheckResult, Probe};
use crate::core::config::{ResourcesConfig, expand};
use crate::core::error::GateResult;
use serde::Deserialize;
use std::path::PathBuf;

/// Metrics snapshot file contents
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ResourceSnapshot {
  pub cpu_percent: f64,
  pub memory_percent: f64,
}

pub struct ResourceProbe {
  metrics_file: Option<PathBuf>,
  cpu_threshold: f64,
  memory_threshold: f64,
}

impl ResourceProbe {
  pub fn new(environment: &str, config: &ResourcesConfig) -> Self {
    Self {
      metrics_file: config
        .metrics_file
        .as_deref()
        .map(|path| PathBuf::from(expand(path, environment))),
      cpu_threshold: config.cpu_threshold,
      memory_threshold: config.memory_threshold,
    }
  }

  /// Judge a snapshot against the thresholds
  pub fn evaluate(&self, snapshot: ResourceSnapshot) -> CheckResult {
    let ResourceSnapshot {
      cpu_percent: cpu,
      memory_percent: memory,
    } = snapshot;

    if cpu < self.cpu_threshold && memory < self.memory_threshold {
      CheckResult::pass(format!("Resources healthy: CPU {}%, Memory {}%", cpu, memory))
    } else {
      CheckResult::fail(format!("High resource usage: CPU {}%, Memory {}%", cpu, memory))
    }
  }
}

impl Probe for ResourceProbe {
  fn run(&self) -> GateResult<CheckResult> {
    let Some(path) = &self.metrics_file else {
      return Ok(CheckResult::pass("No metrics snapshot configured (skipped)"));
    };

    let snapshot: ResourceSnapshot = read_json(path)?;
    Ok(self.evaluate(snapshot))
  }

  fn description(&self) -> Option<&str> {
    Some("Compare CPU and memory usage against thresholds")
  }
}
