//! Error types for readiness-gate with contextual messages and exit codes
//!
//! Errors here describe problems that stop the gate before (or instead of)
//! running checks: a broken config file, unreadable probe inputs, I/O. A
//! failing check is NOT an error; it is a `CheckResult` with `passed = false`.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for readiness-gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Every check passed
  Ready = 0,
  /// At least one check failed or faulted
  NotReady = 1,
  /// User error (config, invalid args, missing files)
  User = 2,
  /// System error (I/O, HTTP client setup)
  System = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }

  /// Exit code for a run verdict
  pub fn from_verdict(all_passed: bool) -> Self {
    if all_passed { ExitCode::Ready } else { ExitCode::NotReady }
  }
}

/// Main error type for readiness-gate
#[derive(Debug)]
pub enum GateError {
  /// Configuration errors
  Config(ConfigError),

  /// Errors raised by built-in probes (surface as check faults)
  Probe(ProbeError),

  /// HTTP client could not be constructed
  Http(reqwest::Error),

  /// I/O errors
  Io(io::Error),

  /// Generic error message
  Message(String),

  /// Another error with a line describing what was being attempted
  Context { context: String, source: Box<GateError> },
}

impl GateError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    GateError::Message(msg.into())
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    GateError::Context {
      context: ctx.into(),
      source: Box::new(self),
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      GateError::Config(_) => ExitCode::User,
      GateError::Probe(_) => ExitCode::NotReady,
      GateError::Http(_) | GateError::Io(_) => ExitCode::System,
      GateError::Message(_) => ExitCode::User,
      GateError::Context { source, .. } => source.exit_code(),
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      GateError::Config(e) => e.help_message(),
      GateError::Probe(e) => e.help_message(),
      GateError::Http(_) => Some("The HTTP client could not start; check the TLS setup of this host.".to_string()),
      GateError::Io(_) | GateError::Message(_) => None,
      GateError::Context { source, .. } => source.help_message(),
    }
  }
}

impl fmt::Display for GateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GateError::Config(e) => write!(f, "{}", e),
      GateError::Probe(e) => write!(f, "{}", e),
      GateError::Http(e) => write!(f, "HTTP client error: {}", e),
      GateError::Io(e) => write!(f, "I/O error: {}", e),
      GateError::Message(message) => write!(f, "{}", message),
      GateError::Context { context, source } => write!(f, "{}\n{}", context, source),
    }
  }
}

impl std::error::Error for GateError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      GateError::Http(e) => Some(e),
      GateError::Io(e) => Some(e),
      GateError::Context { source, .. } => Some(source.as_ref()),
      _ => None,
    }
  }
}

impl From<io::Error> for GateError {
  fn from(err: io::Error) -> Self {
    GateError::Io(err)
  }
}

impl From<ConfigError> for GateError {
  fn from(err: ConfigError) -> Self {
    GateError::Config(err)
  }
}

impl From<ProbeError> for GateError {
  fn from(err: ProbeError) -> Self {
    GateError::Probe(err)
  }
}

impl From<serde_json::Error> for GateError {
  fn from(err: serde_json::Error) -> Self {
    GateError::message(format!("JSON error: {}", err))
  }
}

impl From<reqwest::Error> for GateError {
  fn from(err: reqwest::Error) -> Self {
    GateError::Http(err)
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicitly requested config file does not exist
  NotFound { path: PathBuf },

  /// Config file is not valid TOML or does not match the schema
  Parse { path: PathBuf, reason: String },

  /// A field has a value outside its allowed range
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Omit --config to use gate.toml from the current directory, or defaults if none exists.".to_string())
      }
      ConfigError::Parse { .. } => {
        Some("Known tables are [gate], [checks], [health], [database], [resources] and [security].".to_string())
      }
      ConfigError::InvalidField { field, .. } => Some(format!("Fix or remove '{}' in gate.toml", field)),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Config file not found: {}", path.display())
      }
      ConfigError::Parse { path, reason } => {
        write!(f, "Failed to parse {}: {}", path.display(), reason)
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid config value for '{}': {}", field, reason)
      }
    }
  }
}

/// Probe input errors
///
/// Returned by built-in probes when their inputs cannot be read. The runner
/// turns these into failing results; they never abort a run.
#[derive(Debug)]
pub enum ProbeError {
  /// Input file could not be read
  InputUnreadable { path: PathBuf, reason: String },

  /// Input file was read but has the wrong shape
  InputInvalid { path: PathBuf, reason: String },
}

impl ProbeError {
  fn help_message(&self) -> Option<String> {
    match self {
      ProbeError::InputUnreadable { path, .. } => Some(format!(
        "Make sure {} exists for this environment, or unset the path in gate.toml to skip the check.",
        path.display()
      )),
      ProbeError::InputInvalid { .. } => None,
    }
  }
}

impl fmt::Display for ProbeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ProbeError::InputUnreadable { path, reason } => {
        write!(f, "Cannot read {}: {}", path.display(), reason)
      }
      ProbeError::InputInvalid { path, reason } => {
        write!(f, "Invalid contents in {}: {}", path.display(), reason)
      }
    }
  }
}

/// Result type alias for readiness-gate
pub type GateResult<T> = Result<T, GateError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> GateResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<GateError>,
{
  fn context(self, ctx: impl Into<String>) -> GateResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &GateError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
