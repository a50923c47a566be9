//! Built-in readiness probes
//!
//! - **Health Endpoint**: HTTP health of the environment's app
//! - **Database Connection**: TCP reachability of the database
//! - **Resource Utilization**: CPU/memory against thresholds
//! - **Security Scans**: critical findings in the latest scan report
//!
//! Each probe is built with the environment name passed in explicitly; none
//! of them read ambient state at run time.

mod database;
mod health;
mod resources;
mod security;

pub use database::DatabaseProbe;
pub use health::HealthEndpointProbe;
pub use resources::{ResourceProbe, ResourceSnapshot};
pub use security::{Finding, ScanReport, SecurityScanProbe};

use crate::checks::CheckRegistry;
use crate::core::config::GateConfig;
use crate::core::error::{GateResult, ProbeError};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub const HEALTH_ENDPOINT: &str = "Health Endpoint";
pub const DATABASE_CONNECTION: &str = "Database Connection";
pub const RESOURCE_UTILIZATION: &str = "Resource Utilization";
pub const SECURITY_SCANS: &str = "Security Scans";

/// Registry with all built-in probes, minus any disabled in config
pub fn default_registry(environment: &str, config: &GateConfig) -> GateResult<CheckRegistry> {
  let mut registry = CheckRegistry::new();

  registry.add_probe(HEALTH_ENDPOINT, HealthEndpointProbe::new(environment, &config.health)?);
  registry.add_probe(DATABASE_CONNECTION, DatabaseProbe::new(environment, &config.database));
  registry.add_probe(RESOURCE_UTILIZATION, ResourceProbe::new(environment, &config.resources));
  registry.add_probe(SECURITY_SCANS, SecurityScanProbe::new(environment, &config.security));

  let disabled = &config.checks.disabled;
  if !disabled.is_empty() {
    for name in disabled {
      if !registry.names().any(|n| n == name) {
        tracing::warn!(check = %name, "disabled check is not registered");
      }
    }
    registry.retain(|check| !disabled.iter().any(|d| d == check.name()));
  }

  Ok(registry)
}

/// Read and deserialize a JSON input file for a probe
fn read_json<T: DeserializeOwned>(path: &Path) -> GateResult<T> {
  let content = fs::read_to_string(path).map_err(|e| ProbeError::InputUnreadable {
    path: path.to_path_buf(),
    reason: e.to_string(),
  })?;

  let value = serde_json::from_str(&content).map_err(|e| ProbeError::InputInvalid {
    path: path.to_path_buf(),
    reason: e.to_string(),
  })?;

  Ok(value)
}
