//! Database connectivity probe (TCP reachability of the configured host)

use crate::checks::{CheckResult, Probe};
use crate::core::config::{DatabaseConfig, expand};
use crate::core::error::GateResult;
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

pub struct DatabaseProbe {
  target: Option<(String, u16)>,
  timeout: Duration,
}

impl DatabaseProbe {
  pub fn new(environment: &str, config: &DatabaseConfig) -> Self {
    Self {
      target: config.host.as_deref().map(|host| (expand(host, environment), config.port)),
      timeout: config.timeout(),
    }
  }

  fn connect(&self, host: &str, port: u16) -> io::Result<SocketAddr> {
    let mut last_err = io::Error::new(io::ErrorKind::NotFound, format!("{} did not resolve", host));

    for addr in (host, port).to_socket_addrs()? {
      match TcpStream::connect_timeout(&addr, self.timeout) {
        Ok(_) => return Ok(addr),
        Err(e) => {
          tracing::debug!(%addr, error = %e, "database address unreachable");
          last_err = e;
        }
      }
    }

    Err(last_err)
  }
}

impl Probe for DatabaseProbe {
  fn run(&self) -> GateResult<CheckResult> {
    let Some((host, port)) = &self.target else {
      return Ok(CheckResult::pass("No database endpoint configured (skipped)"));
    };

    match self.connect(host, *port) {
      Ok(addr) => {
        tracing::debug!(%addr, "database reachable");
        Ok(CheckResult::pass("Database connection successful"))
      }
      Err(e) => Ok(CheckResult::fail(format!(
        "Database connection to {}:{} failed: {}",
        host, port, e
      ))),
    }
  }

  fn description(&self) -> Option<&str> {
    Some("Open a TCP connection to the database endpoint")
  }
}
