//! `readiness-gate [ENVIRONMENT]` - Run all readiness checks
//!
//! Loads configuration, registers the built-in probes for the environment and
//! runs them in order. The verdict becomes the process exit code.

use crate::checks::{CheckRegistry, CheckRunner};
use crate::core::config::GateConfig;
use crate::core::error::{ExitCode, GateResult, ResultExt};
use crate::probes::default_registry;
use crate::ui::report::JsonReporter;
use std::env;
use std::path::PathBuf;

/// Resolve the environment and build its registry
pub fn prepare(environment: Option<String>, config_path: Option<PathBuf>) -> GateResult<(String, CheckRegistry)> {
  let current_dir = env::current_dir()?;
  let config = GateConfig::load(&current_dir, config_path.as_deref())?;

  let environment = environment.unwrap_or_else(|| config.gate.default_environment.clone());
  let registry =
    default_registry(&environment, &config).with_context(|| format!("Failed to set up checks for '{}'", environment))?;

  Ok((environment, registry))
}

/// Run the readiness gate
pub fn run_gate(environment: Option<String>, config_path: Option<PathBuf>, json: bool) -> GateResult<ExitCode> {
  let (environment, registry) = prepare(environment, config_path)?;
  let mut runner = CheckRunner::new(environment, registry);

  let all_passed = if json {
    runner.run_with(&mut JsonReporter::stdout())
  } else {
    runner.run_all_checks()
  };

  Ok(ExitCode::from_verdict(all_passed))
}
