//! Security scan probe
//!
//! Looks up the latest scan report for the environment and gates on the
//! number of critical findings.

use super::read_json;
use crate::checks::{CheckResult, Probe};
use crate::core::config::{SecurityConfig, expand};
use crate::core::error::GateResult;
use serde::Deserialize;
use std::path::PathBuf;

/// Scan report file contents
#[derive(Debug, Clone, Deserialize)]
pub struct ScanReport {
  #[serde(default)]
  pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Finding {
  pub id: String,
  pub severity: String,
  #[serde(default)]
  pub title: Option<String>,
}

impl Finding {
  pub fn is_critical(&self) -> bool {
    self.severity.eq_ignore_ascii_case("critical")
  }
}

pub struct SecurityScanProbe {
  report_file: Option<PathBuf>,
  max_critical: usize,
}

impl SecurityScanProbe {
  pub fn new(environment: &str, config: &SecurityConfig) -> Self {
    Self {
      report_file: config
        .report_file
        .as_deref()
        .map(|path| PathBuf::from(expand(path, environment))),
      max_critical: config.max_critical,
    }
  }

  pub fn evaluate(&self, report: &ScanReport) -> CheckResult {
    let critical: Vec<&Finding> = report.findings.iter().filter(|f| f.is_critical()).collect();

    if critical.is_empty() {
      return CheckResult::pass("No critical security vulnerabilities found");
    }

    if critical.len() <= self.max_critical {
      return CheckResult::pass(format!(
        "{} critical finding(s) within allowance of {}",
        critical.len(),
        self.max_critical
      ));
    }

    let ids: Vec<&str> = critical.iter().map(|f| f.id.as_str()).collect();
    let noun = if critical.len() == 1 { "vulnerability" } else { "vulnerabilities" };
    CheckResult::fail(format!(
      "{} critical security {} found: {}",
      critical.len(),
      noun,
      ids.join(", ")
    ))
  }
}

impl Probe for SecurityScanProbe {
  fn run(&self) -> GateResult<CheckResult> {
    let Some(path) = &self.report_file else {
      return Ok(CheckResult::pass("No scan report configured (skipped)"));
    };

    let report: ScanReport = read_json(path)?;
    for finding in report.findings.iter().filter(|f| f.is_critical()) {
      tracing::info!(
        id = %finding.id,
        title = finding.title.as_deref().unwrap_or(""),
        "critical finding"
      );
    }
    Ok(self.evaluate(&report))
  }

  fn description(&self) -> Option<&str> {
    Some("Fail on critical findings in the latest security scan")
  }
}
