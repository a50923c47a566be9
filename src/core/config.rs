use crate::core::error::{ConfigError, GateResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file names, searched in order relative to the working directory
pub const CONFIG_CANDIDATES: [&str; 3] = ["gate.toml", ".gate.toml", ".config/gate.toml"];

/// Placeholder substituted with the environment name in string settings
pub const ENVIRONMENT_PLACEHOLDER: &str = "{environment}";

/// Configuration for readiness-gate
///
/// Every table is optional; an empty file (or no file) yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
  #[serde(default)]
  pub gate: GateSettings,
  #[serde(default)]
  pub checks: ChecksConfig,
  #[serde(default)]
  pub health: HealthConfig,
  #[serde(default)]
  pub database: DatabaseConfig,
  #[serde(default)]
  pub resources: ResourcesConfig,
  #[serde(default)]
  pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSettings {
  /// Environment used when none is given on the command line
  #[serde(default = "default_environment")]
  pub default_environment: String,
}

fn default_environment() -> String {
  "staging".to_string()
}

impl Default for GateSettings {
  fn default() -> Self {
    Self {
      default_environment: default_environment(),
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecksConfig {
  /// Check names removed from the registry before the run
  #[serde(default)]
  pub disabled: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
  /// Health endpoint URL template
  #[serde(default = "default_health_url")]
  pub url: String,

  /// Request timeout in seconds
  #[serde(default = "default_health_timeout")]
  pub timeout_secs: u64,

  /// Value the endpoint must report in its JSON `status` field
  #[serde(default = "default_expected_status")]
  pub expected_status: String,
}

fn default_health_url() -> String {
  "https://{environment}-app.example.com/health".to_string()
}

fn default_health_timeout() -> u64 {
  10
}

fn default_expected_status() -> String {
  "ok".to_string()
}

impl Default for HealthConfig {
  fn default() -> Self {
    Self {
      url: default_health_url(),
      timeout_secs: default_health_timeout(),
      expected_status: default_expected_status(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
  /// Database host template (unset = check skipped)
  #[serde(default)]
  pub host: Option<String>,

  #[serde(default = "default_database_port")]
  pub port: u16,

  /// Connect timeout in seconds
  #[serde(default = "default_database_timeout")]
  pub timeout_secs: u64,
}

fn default_database_port() -> u16 {
  5432
}

fn default_database_timeout() -> u64 {
  5
}

impl Default for DatabaseConfig {
  fn default() -> Self {
    Self {
      host: None,
      port: default_database_port(),
      timeout_secs: default_database_timeout(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
  /// Metrics snapshot path template (unset = check skipped)
  #[serde(default)]
  pub metrics_file: Option<String>,

  /// CPU usage must stay strictly below this percentage
  #[serde(default = "default_cpu_threshold")]
  pub cpu_threshold: f64,

  /// Memory usage must stay strictly below this percentage
  #[serde(default = "default_memory_threshold")]
  pub memory_threshold: f64,
}

fn default_cpu_threshold() -> f64 {
  80.0
}

fn default_memory_threshold() -> f64 {
  85.0
}

impl Default for ResourcesConfig {
  fn default() -> Self {
    Self {
      metrics_file: None,
      cpu_threshold: default_cpu_threshold(),
      memory_threshold: default_memory_threshold(),
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
  /// Scan report path template (unset = check skipped)
  #[serde(default)]
  pub report_file: Option<String>,

  /// Number of critical findings tolerated
  #[serde(default)]
  pub max_critical: usize,
}

impl GateConfig {
  /// Load configuration
  ///
  /// An explicit path must exist. Without one, the first of
  /// [`CONFIG_CANDIDATES`] found under `dir` is used, falling back to defaults.
  pub fn load(dir: &Path, explicit: Option<&Path>) -> GateResult<Self> {
    let path = match explicit {
      Some(path) => {
        if !path.exists() {
          return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
          }
          .into());
        }
        path.to_path_buf()
      }
      None => match Self::find(dir) {
        Some(path) => path,
        None => {
          tracing::debug!(dir = %dir.display(), "no config file found, using defaults");
          return Ok(Self::default());
        }
      },
    };

    let content = fs::read_to_string(&path)?;
    let config = Self::parse(&path, &content)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
  }

  /// Locate the first existing config candidate under `dir`
  pub fn find(dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
      .iter()
      .map(|name| dir.join(name))
      .find(|candidate| candidate.is_file())
  }

  /// Parse and validate config text; `path` is only used in error messages
  pub fn parse(path: &Path, content: &str) -> GateResult<Self> {
    let config: GateConfig = toml_edit::de::from_str(content).map_err(|e| ConfigError::Parse {
      path: path.to_path_buf(),
      reason: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
  }

  /// Validate value ranges
  pub fn validate(&self) -> GateResult<()> {
    if self.gate.default_environment.trim().is_empty() {
      return Err(invalid("gate.default_environment", "must not be empty"));
    }

    if self.health.timeout_secs == 0 {
      return Err(invalid("health.timeout_secs", "must be greater than zero"));
    }

    if self.database.timeout_secs == 0 {
      return Err(invalid("database.timeout_secs", "must be greater than zero"));
    }

    if self.database.port == 0 {
      return Err(invalid("database.port", "must be a non-zero port number"));
    }

    for (field, value) in [
      ("resources.cpu_threshold", self.resources.cpu_threshold),
      ("resources.memory_threshold", self.resources.memory_threshold),
    ] {
      if !(value > 0.0 && value <= 100.0) {
        return Err(invalid(field, &format!("{} is not a percentage in (0, 100]", value)));
      }
    }

    Ok(())
  }
}

impl HealthConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }
}

impl DatabaseConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }
}

fn invalid(field: &str, reason: &str) -> crate::core::error::GateError {
  ConfigError::InvalidField {
    field: field.to_string(),
    reason: reason.to_string(),
  }
  .into()
}

/// Substitute the environment name into a config template
pub fn expand(template: &str, environment: &str) -> String {
  template.replace(ENVIRONMENT_PLACEHOLDER, environment)
}
