//! Integration tests for running the readiness gate

use crate::helpers::{TestGate, closed_port, run_readiness_gate, serve_health, stdout};
use anyhow::Result;
use mockito::{Mock, ServerGuard};
use std::net::TcpListener;

/// A gate directory plus the health server it points at
struct HealthyGate {
  gate: TestGate,
  _server: ServerGuard,
  health: Mock,
}

/// Config where every probe has a healthy local target
fn healthy_gate(db_port: u16) -> Result<HealthyGate> {
  let gate = TestGate::new()?;
  let (server, health) = serve_health(200, r#"{"status":"ok"}"#);
  let health_url = format!("{}/health", server.url());

  gate.write_file("metrics/staging.json", r#"{ "cpu_percent": 45, "memory_percent": 60 }"#)?;
  gate.write_file(
    "scans/staging.json",
    r#"{ "findings": [ { "id": "CVE-2024-0001", "severity": "low" } ] }"#,
  )?;
  gate.write_config(&format!(
    r#"
[health]
url = "{health_url}"
timeout_secs = 5

[database]
host = "127.0.0.1"
port = {db_port}
timeout_secs = 2

[resources]
metrics_file = "metrics/{{environment}}.json"

[security]
report_file = "scans/{{environment}}.json"
"#
  ))?;

  Ok(HealthyGate {
    gate,
    _server: server,
    health,
  })
}

#[test]
fn test_all_checks_pass_exit_zero() -> Result<()> {
  let db = TcpListener::bind("127.0.0.1:0")?;
  let healthy = healthy_gate(db.local_addr()?.port())?;

  let output = run_readiness_gate(&healthy.gate.path, &[])?;
  let out = stdout(&output);

  assert_eq!(output.status.code(), Some(0), "stdout: {}", out);
  healthy.health.assert();
  assert!(out.contains("Launch Readiness Check for STAGING"));
  assert!(out.contains("✅ PASSED: Health endpoint is healthy"));
  assert!(out.contains("✅ PASSED: Database connection successful"));
  assert!(out.contains("✅ PASSED: Resources healthy: CPU 45%, Memory 60%"));
  assert!(out.contains("✅ PASSED: No critical security vulnerabilities found"));
  assert!(out.contains("ALL CHECKS PASSED"));

  Ok(())
}

#[test]
fn test_refused_database_fails_gate_but_later_checks_run() -> Result<()> {
  let healthy = healthy_gate(closed_port()?)?;

  let output = run_readiness_gate(&healthy.gate.path, &["staging"])?;
  let out = stdout(&output);

  assert_eq!(output.status.code(), Some(1), "stdout: {}", out);
  assert!(out.contains("❌ FAILED: Database connection to 127.0.0.1:"));

  let db = out.find("Running check: Database Connection").unwrap();
  let resources = out.find("Running check: Resource Utilization").unwrap();
  let security = out.find("Running check: Security Scans").unwrap();
  assert!(db < resources && resources < security);
  assert!(out.contains("✅ PASSED: No critical security vulnerabilities found"));
  assert!(out.contains("SOME CHECKS FAILED"));

  Ok(())
}

#[test]
fn test_missing_probe_input_is_reported_as_error() -> Result<()> {
  let db = TcpListener::bind("127.0.0.1:0")?;
  let healthy = healthy_gate(db.local_addr()?.port())?;

  // Only staging inputs exist
  let output = run_readiness_gate(&healthy.gate.path, &["--json", "prod"])?;
  assert_eq!(output.status.code(), Some(1));

  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(json["summary"]["environment"], "prod");
  assert_eq!(json["summary"]["all_passed"], false);

  let checks = json["checks"].as_array().unwrap();
  assert_eq!(checks.len(), 4);
  assert_eq!(checks[2]["name"], "Resource Utilization");
  assert_eq!(checks[2]["outcome"], "faulted");
  assert!(checks[2]["message"].as_str().unwrap().contains("metrics/prod.json"));
  assert_eq!(checks[3]["outcome"], "faulted");

  Ok(())
}

#[test]
fn test_disabled_checks_do_not_run() -> Result<()> {
  let gate = TestGate::new()?;
  gate.write_config(
    r#"
[checks]
disabled = ["Health Endpoint"]
"#,
  )?;

  let output = run_readiness_gate(&gate.path, &["--json"])?;
  assert_eq!(output.status.code(), Some(0));

  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  let names: Vec<_> = json["checks"]
    .as_array()
    .unwrap()
    .iter()
    .map(|c| c["name"].as_str().unwrap().to_string())
    .collect();
  assert_eq!(names, vec!["Database Connection", "Resource Utilization", "Security Scans"]);
  assert_eq!(json["summary"]["environment"], "staging");

  Ok(())
}

#[test]
fn test_malformed_config_exits_two() -> Result<()> {
  let gate = TestGate::new()?;
  gate.write_config("[health\nurl = ")?;

  let output = run_readiness_gate(&gate.path, &[])?;
  assert_eq!(output.status.code(), Some(2));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Failed to parse"));
  assert!(!stdout(&output).contains("Running check"));

  Ok(())
}

#[test]
fn test_explicit_missing_config_exits_two() -> Result<()> {
  let gate = TestGate::new()?;

  let output = run_readiness_gate(&gate.path, &["--config", "missing.toml"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Config file not found"));

  Ok(())
}

#[test]
fn test_unhealthy_endpoint_fails_gate() -> Result<()> {
  let (server, health) = serve_health(503, r#"{"status":"down"}"#);
  let gate = TestGate::new()?;
  gate.write_config(&format!(
    r#"
[health]
url = "{}/health"
"#,
    server.url()
  ))?;

  let output = run_readiness_gate(&gate.path, &[])?;
  let out = stdout(&output);

  assert_eq!(output.status.code(), Some(1), "stdout: {}", out);
  health.assert();
  assert!(out.contains("❌ FAILED: Health endpoint returned 503"));
  assert!(out.contains("SOME CHECKS FAILED"));

  Ok(())
}
