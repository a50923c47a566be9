//! Health endpoint probe
//!
//! GETs the environment's health URL and expects `200` with a JSON body whose
//! `status` field matches the configured value. Transport errors are reported
//! as a failing result, not a fault.

use crate::checks::{CheckResult, Probe};
use crate::core::config::{HealthConfig, expand};
use crate::core::error::GateResult;
use reqwest::StatusCode;
use reqwest::blocking::Client;

/// User agent sent with health requests
pub const USER_AGENT: &str = concat!("readiness-gate/", env!("CARGO_PKG_VERSION"));

pub struct HealthEndpointProbe {
  url: String,
  expected_status: String,
  client: Client,
}

impl HealthEndpointProbe {
  pub fn new(environment: &str, config: &HealthConfig) -> GateResult<Self> {
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .timeout(config.timeout())
      .build()?;

    Ok(Self {
      url: expand(&config.url, environment),
      expected_status: config.expected_status.clone(),
      client,
    })
  }

  pub fn url(&self) -> &str {
    &self.url
  }

  fn probe(&self) -> Result<CheckResult, reqwest::Error> {
    tracing::debug!(url = %self.url, "requesting health endpoint");
    let response = self.client.get(&self.url).send()?;
    let status = response.status();

    if status != StatusCode::OK {
      return Ok(CheckResult::fail(format!("Health endpoint returned {}", status.as_u16())));
    }

    let body: serde_json::Value = response.json()?;
    let reported = body.get("status").and_then(|s| s.as_str());
    if reported == Some(self.expected_status.as_str()) {
      return Ok(CheckResult::pass("Health endpoint is healthy"));
    }

    tracing::debug!(
      reported = reported.unwrap_or("<missing>"),
      expected = %self.expected_status,
      "health status mismatch"
    );
    Ok(CheckResult::fail(format!("Health endpoint returned {}", status.as_u16())))
  }
}

impl Probe for HealthEndpointProbe {
  fn run(&self) -> GateResult<CheckResult> {
    match self.probe() {
      Ok(result) => Ok(result),
      Err(e) => Ok(CheckResult::fail(format!("Health check failed: {}", e))),
    }
  }

  fn description(&self) -> Option<&str> {
    Some("GET the health endpoint and expect a healthy status")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use mockito::{Mock, Server, ServerGuard};
  use std::net::TcpListener;

  fn mock_health(server: &mut ServerGuard, status: usize, body: &str) -> Mock {
    server
      .mock("GET", "/health")
      .match_header("user-agent", USER_AGENT)
      .with_status(status)
      .with_header("content-type", "application/json")
      .with_body(body)
      .create()
  }

  fn config_for(url: String) -> HealthConfig {
    HealthConfig {
      url,
      timeout_secs: 5,
      ..HealthConfig::default()
    }
  }

  #[test]
  fn test_url_expansion() {
    let probe = HealthEndpointProbe::new("staging", &HealthConfig::default()).unwrap();
    assert_eq!(probe.url(), "https://staging-app.example.com/health");
    assert!(probe.description().is_some());
  }

  #[test]
  fn test_healthy_endpoint() {
    let mut server = Server::new();
    let mock = mock_health(&mut server, 200, r#"{"status":"ok"}"#);
    let probe = HealthEndpointProbe::new("staging", &config_for(format!("{}/health", server.url()))).unwrap();

    let result = probe.run().unwrap();
    mock.assert();
    assert_eq!(result, CheckResult::pass("Health endpoint is healthy"));
  }

  #[test]
  fn test_non_200_status() {
    let mut server = Server::new();
    let mock = mock_health(&mut server, 503, r#"{"status":"down"}"#);
    let probe = HealthEndpointProbe::new("staging", &config_for(format!("{}/health", server.url()))).unwrap();

    let result = probe.run().unwrap();
    mock.assert();
    assert_eq!(result, CheckResult::fail("Health endpoint returned 503"));
  }

  #[test]
  fn test_unexpected_status_field_reports_code() {
    let mut server = Server::new();
    let mock = mock_health(&mut server, 200, r#"{"status":"degraded"}"#);
    let probe = HealthEndpointProbe::new("staging", &config_for(format!("{}/health", server.url()))).unwrap();

    let result = probe.run().unwrap();
    mock.assert();
    assert_eq!(result, CheckResult::fail("Health endpoint returned 200"));
  }

  #[test]
  fn test_missing_status_field_fails() {
    let mut server = Server::new();
    let _mock = mock_health(&mut server, 200, r#"{"uptime":42}"#);
    let probe = HealthEndpointProbe::new("staging", &config_for(format!("{}/health", server.url()))).unwrap();

    assert_eq!(probe.run().unwrap(), CheckResult::fail("Health endpoint returned 200"));
  }

  #[test]
  fn test_custom_expected_status() {
    let mut server = Server::new();
    let _mock = mock_health(&mut server, 200, r#"{"status":"healthy"}"#);
    let config = HealthConfig {
      expected_status: "healthy".to_string(),
      ..config_for(format!("{}/health", server.url()))
    };
    let probe = HealthEndpointProbe::new("staging", &config).unwrap();

    assert!(probe.run().unwrap().passed);
  }

  #[test]
  fn test_connection_failure_is_a_failing_result() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let probe = HealthEndpointProbe::new("staging", &config_for(format!("http://{}/health", addr))).unwrap();
    let result = probe.run().unwrap();
    assert!(!result.passed);
    assert!(result.message.starts_with("Health check failed:"));
  }
}
