//! Check runner for executing readiness checks
//!
//! Checks run one at a time in registration order. Each probe invocation is
//! a fault boundary: a returned error or a panic becomes a failing
//! [`CheckResult`] for that check and the run moves on to the next one.
//!
//! There is no timeout here. A probe that never returns blocks the run;
//! probes doing I/O carry their own timeouts.

use super::registry::{Check, CheckRegistry};
use super::trait_def::{CheckResult, Outcome};
use crate::ui::report::{ConsoleReporter, Reporter};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
  NotStarted,
  Running,
  Completed,
}

/// One executed check, as reported
#[derive(Debug, Clone, Serialize)]
pub struct CheckRecord {
  pub name: String,
  #[serde(flatten)]
  pub result: CheckResult,
  pub outcome: Outcome,
  #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
  pub duration: Duration,
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_u64(duration.as_millis() as u64)
}

/// Aggregate view of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
  pub environment: String,
  pub started_at: DateTime<Utc>,
  pub total: usize,
  pub passed: usize,
  pub failed: usize,
  pub faulted: usize,
  pub all_passed: bool,
}

/// Runs the checks of a registry against one environment
pub struct CheckRunner {
  environment: String,
  registry: CheckRegistry,
  state: RunState,
  started_at: Option<DateTime<Utc>>,
  results: HashMap<String, CheckResult>,
  records: Vec<CheckRecord>,
  all_passed: bool,
}

impl CheckRunner {
  /// Create a runner for an environment
  pub fn new(environment: impl Into<String>, registry: CheckRegistry) -> Self {
    Self {
      environment: environment.into(),
      registry,
      state: RunState::NotStarted,
      started_at: None,
      results: HashMap::new(),
      records: Vec::new(),
      all_passed: false,
    }
  }

  pub fn environment(&self) -> &str {
    &self.environment
  }

  /// Run all checks, reporting to stdout
  pub fn run_all_checks(&mut self) -> bool {
    let mut reporter = ConsoleReporter::stdout();
    self.run_with(&mut reporter)
  }

  /// Run all checks with the given reporter
  ///
  /// Returns true iff every check passed and none faulted. Running again
  /// discards the previous results and executes every check once more.
  pub fn run_with(&mut self, reporter: &mut dyn Reporter) -> bool {
    self.state = RunState::Running;
    self.started_at = Some(Utc::now());
    self.results.clear();
    self.records.clear();
    self.all_passed = true;

    tracing::info!(
      environment = %self.environment,
      checks = self.registry.len(),
      "readiness run started"
    );
    reporter.run_started(&self.environment, self.registry.len());

    for check in self.registry.checks() {
      reporter.check_started(check.name());

      let record = execute(check);
      if record.outcome != Outcome::Passed {
        self.all_passed = false;
      }

      reporter.check_finished(&record);
      self.results.insert(record.name.clone(), record.result.clone());
      self.records.push(record);
    }

    self.state = RunState::Completed;

    let summary = self.summary();
    tracing::info!(
      environment = %summary.environment,
      passed = summary.passed,
      failed = summary.failed,
      faulted = summary.faulted,
      all_passed = summary.all_passed,
      "readiness run completed"
    );
    reporter.run_finished(&summary, &self.records);

    self.all_passed
  }

  pub fn state(&self) -> RunState {
    self.state
  }

  /// Aggregate verdict; false until a run has completed
  pub fn all_passed(&self) -> bool {
    self.state == RunState::Completed && self.all_passed
  }

  /// Results keyed by check name (later duplicates overwrite earlier ones)
  pub fn results(&self) -> &HashMap<String, CheckResult> {
    &self.results
  }

  pub fn result(&self, name: &str) -> Option<&CheckResult> {
    self.results.get(name)
  }

  /// Executed checks in registration order
  pub fn records(&self) -> &[CheckRecord] {
    &self.records
  }

  pub fn summary(&self) -> RunSummary {
    let count = |outcome: Outcome| self.records.iter().filter(|r| r.outcome == outcome).count();

    RunSummary {
      environment: self.environment.clone(),
      started_at: self.started_at.unwrap_or_else(Utc::now),
      total: self.records.len(),
      passed: count(Outcome::Passed),
      failed: count(Outcome::Failed),
      faulted: count(Outcome::Faulted),
      all_passed: self.all_passed(),
    }
  }
}

/// Invoke one probe behind the fault boundary
fn execute(check: &Check) -> CheckRecord {
  let started = Instant::now();
  let invocation = panic::catch_unwind(AssertUnwindSafe(|| check.probe().run()));
  let duration = started.elapsed();

  let (result, outcome) = match invocation {
    Ok(Ok(result)) => {
      let outcome = if result.passed { Outcome::Passed } else { Outcome::Failed };
      tracing::debug!(check = check.name(), passed = result.passed, "check finished");
      (result, outcome)
    }
    Ok(Err(err)) => {
      tracing::warn!(check = check.name(), error = %err, "check faulted");
      (CheckResult::fail(err.to_string()), Outcome::Faulted)
    }
    Err(payload) => {
      let reason = panic_message(payload.as_ref());
      tracing::warn!(check = check.name(), panic = %reason, "check panicked");
      (CheckResult::fail(format!("probe panicked: {}", reason)), Outcome::Faulted)
    }
  };

  CheckRecord {
    name: check.name().to_string(),
    result,
    outcome,
    duration,
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(msg) = payload.downcast_ref::<&str>() {
    (*msg).to_string()
  } else if let Some(msg) = payload.downcast_ref::<String>() {
    msg.clone()
  } else {
    "unknown panic payload".to_string()
  }
}
