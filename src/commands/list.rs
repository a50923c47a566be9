//! `readiness-gate --list` - Show registered checks without running them

use super::run::prepare;
use crate::core::error::{ExitCode, GateResult};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct ListedCheck<'a> {
  name: &'a str,
  description: Option<&'a str>,
}

/// Print the checks that would run for the environment
pub fn run_list(environment: Option<String>, config_path: Option<PathBuf>, json: bool) -> GateResult<ExitCode> {
  let (environment, registry) = prepare(environment, config_path)?;

  let listed: Vec<ListedCheck> = registry
    .checks()
    .iter()
    .map(|check| ListedCheck {
      name: check.name(),
      description: check.probe().description(),
    })
    .collect();

  if json {
    println!("{}", serde_json::to_string_pretty(&listed)?);
  } else {
    println!("📋 Registered checks for {}:", environment);
    for check in &listed {
      match check.description {
        Some(description) => println!("   • {}: {}", check.name, description),
        None => println!("   • {}", check.name),
      }
    }
  }

  Ok(ExitCode::Ready)
}
