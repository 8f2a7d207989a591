use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BODY_LIMIT: usize = 1 << 20;

/// Top-level configuration.
///
/// Example YAML:
/// ```yaml
/// log_level: info
/// server:
///   host: 0.0.0.0
///   port: 8080
///   body_limit: 1048576
///   request_timeout: 30s
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Default tracing filter, overridden by RUST_LOG or LOG_LEVEL
    pub log_level: String,

    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Apply HOST and PORT from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply HOST and PORT overrides using `lookup` to resolve variables.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: '{}'", port))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Maximum accepted request body in bytes
    pub body_limit: usize,

    /// Per-request timeout as a humantime duration, e.g. "30s" or "1m"
    pub request_timeout: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            body_limit: DEFAULT_BODY_LIMIT,
            request_timeout: "30s".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Result<Duration> {
        humantime::parse_duration(self.request_timeout.trim())
            .with_context(|| format!("Invalid request_timeout: '{}'", self.request_timeout))
    }
}
