//! Integration tests for `readiness-gate --list`

use crate::helpers::{TestGate, run_readiness_gate, stdout};
use anyhow::Result;

#[test]
fn test_list_shows_checks_in_order_without_running() -> Result<()> {
  let gate = TestGate::new()?;

  let output = run_readiness_gate(&gate.path, &["--list", "qa"])?;
  let out = stdout(&output);

  assert_eq!(output.status.code(), Some(0));
  assert!(out.contains("Registered checks for qa"));
  assert!(!out.contains("Running check"));

  let positions: Vec<_> = ["Health Endpoint", "Database Connection", "Resource Utilization", "Security Scans"]
    .iter()
    .map(|name| out.find(name).unwrap())
    .collect();
  assert!(positions.windows(2).all(|w| w[0] < w[1]));

  Ok(())
}

#[test]
fn test_list_json() -> Result<()> {
  let gate = TestGate::new()?;
  gate.write_config("[gate]\ndefault_environment = \"preprod\"\n\n[checks]\ndisabled = [\"Security Scans\"]\n")?;

  let output = run_readiness_gate(&gate.path, &["--list", "--json"])?;
  assert_eq!(output.status.code(), Some(0));

  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  let listed = json.as_array().unwrap();
  assert_eq!(listed.len(), 3);
  assert_eq!(listed[0]["name"], "Health Endpoint");
  assert!(listed[0]["description"].is_string());

  Ok(())
}
