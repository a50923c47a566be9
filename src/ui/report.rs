//! Run reporters
//!
//! The runner calls a [`Reporter`] as it goes. Output is advisory; the exit
//! code is the only machine contract, so write failures on the sink are
//! ignored rather than turned into faults.

use crate::checks::{CheckRecord, Outcome, RunSummary};
use serde::Serialize;
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;

/// Receives progress events from a run
pub trait Reporter {
  fn run_started(&mut self, environment: &str, total: usize);

  fn check_started(&mut self, name: &str);

  fn check_finished(&mut self, record: &CheckRecord);

  fn run_finished(&mut self, summary: &RunSummary, records: &[CheckRecord]);
}

/// Human-readable report, written as the run progresses
pub struct ConsoleReporter<W: Write> {
  out: W,
}

impl ConsoleReporter<io::Stdout> {
  pub fn stdout() -> Self {
    Self::new(io::stdout())
  }
}

impl<W: Write> ConsoleReporter<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }

  pub fn into_inner(self) -> W {
    self.out
  }

  fn rule(&mut self) {
    let _ = writeln!(self.out, "{}", "=".repeat(RULE_WIDTH));
  }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
  fn run_started(&mut self, environment: &str, _total: usize) {
    let _ = writeln!(self.out, "🚀 Launch Readiness Check for {}", environment.to_uppercase());
    self.rule();
  }

  fn check_started(&mut self, name: &str) {
    let _ = writeln!(self.out, "\n🔍 Running check: {}", name);
    let _ = self.out.flush();
  }

  fn check_finished(&mut self, record: &CheckRecord) {
    let icon = match record.outcome {
      Outcome::Passed => "✅",
      Outcome::Failed | Outcome::Faulted => "❌",
    };
    let _ = writeln!(self.out, "  {} {}: {}", icon, record.outcome, record.result.message);
  }

  fn run_finished(&mut self, summary: &RunSummary, _records: &[CheckRecord]) {
    let _ = writeln!(self.out);
    self.rule();
    let _ = writeln!(self.out, "Summary: {}/{} checks passed", summary.passed, summary.total);
    let verdict = if summary.all_passed {
      "🟢 ALL CHECKS PASSED"
    } else {
      "🔴 SOME CHECKS FAILED"
    };
    let _ = writeln!(self.out, "🎯 Final Status: {}", verdict);
    let _ = self.out.flush();
  }
}

/// Machine-readable report, written once when the run finishes
pub struct JsonReporter<W: Write> {
  out: W,
}

#[derive(Serialize)]
struct JsonReport<'a> {
  summary: &'a RunSummary,
  checks: &'a [CheckRecord],
}

impl JsonReporter<io::Stdout> {
  pub fn stdout() -> Self {
    Self::new(io::stdout())
  }
}

impl<W: Write> JsonReporter<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }

  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: Write> Reporter for JsonReporter<W> {
  fn run_started(&mut self, _environment: &str, _total: usize) {}

  fn check_started(&mut self, _name: &str) {}

  fn check_finished(&mut self, _record: &CheckRecord) {}

  fn run_finished(&mut self, summary: &RunSummary, records: &[CheckRecord]) {
    let report = JsonReport {
      summary,
      checks: records,
    };
    match serde_json::to_string_pretty(&report) {
      Ok(json) => {
        let _ = writeln!(self.out, "{}", json);
        let _ = self.out.flush();
      }
      Err(e) => tracing::error!(error = %e, "failed to serialize JSON report"),
    }
  }
}

/// Discards all events
pub struct SilentReporter;

impl Reporter for SilentReporter {
  fn run_started(&mut self, _environment: &str, _total: usize) {}

  fn check_started(&mut self, _name: &str) {}

  fn check_finished(&mut self, _record: &CheckRecord) {}

  fn run_finished(&mut self, _summary: &RunSummary, _records: &[CheckRecord]) {}
}
