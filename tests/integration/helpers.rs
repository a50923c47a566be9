//! Test helpers for integration tests

use anyhow::{Context, Result};
use mockito::{Mock, Server, ServerGuard};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch directory holding gate.toml and probe inputs
pub struct TestGate {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestGate {
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Write gate.toml
  pub fn write_config(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("gate.toml"), content)?;
    Ok(())
  }

  /// Write a file relative to the gate directory, creating parents
  pub fn write_file(&self, rel: &str, content: &str) -> Result<PathBuf> {
    let file = self.path.join(rel);
    if let Some(parent) = file.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file, content)?;
    Ok(file)
  }
}

/// Start a mock server answering `GET /health` with the given status and body
///
/// The server shuts down when the returned guard drops, so keep it alive for
/// the whole gate run.
pub fn serve_health(status: usize, body: &str) -> (ServerGuard, Mock) {
  let mut server = Server::new();
  let mock = server
    .mock("GET", "/health")
    .with_status(status)
    .with_header("content-type", "application/json")
    .with_body(body)
    .create();
  (server, mock)
}

/// A port with nothing listening on it
pub fn closed_port() -> Result<u16> {
  let listener = TcpListener::bind("127.0.0.1:0")?;
  let port = listener.local_addr()?.port();
  drop(listener);
  Ok(port)
}

/// Run the readiness-gate binary; non-zero exits are returned, not errors
pub fn run_readiness_gate(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_readiness-gate");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .env_remove("HTTP_PROXY")
    .env_remove("http_proxy")
    .env_remove("ALL_PROXY")
    .env_remove("all_proxy")
    .output()
    .context("Failed to run readiness-gate")
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}
