//! Shared configuration structures and environment helpers.
//!
//! Secrets are only ever read from the environment. There is no literal
//! fallback for any of them: a missing secret is a [`ConfigError`].

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(String),

    #[error("environment variable {var} has invalid value '{value}'")]
    Invalid { var: String, value: String },
}

/// Read a required variable. Empty values count as missing.
pub fn require_env(var: &str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(var.to_string())),
    }
}

/// Read an optional variable. Empty values count as unset.
pub fn optional_env(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

/// Read a non-secret variable with a default.
pub fn env_or(var: &str, default: &str) -> String {
    optional_env(var).unwrap_or_else(|| default.to_string())
}

/// Parse a variable, falling back to `default` when unset.
///
/// A value that is set but unparseable is an error rather than silently
/// replaced by the default.
pub fn parse_env_or<T: FromStr>(var: &str, default: T) -> Result<T, ConfigError> {
    match optional_env(var) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var: var.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

/// Parse a boolean flag (`true/false`, `1/0`, `yes/no`, `on/off`).
pub fn parse_flag(var: &str, default: bool) -> Result<bool, ConfigError> {
    match optional_env(var) {
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                var: var.to_string(),
                value,
            }),
        },
        None => Ok(default),
    }
}

/// Split a comma-separated list, dropping blanks.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Base service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl ServiceConfig {
    /// Get the full server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Server connection string; may already include the database name
    #[serde(skip_serializing)]
    pub url: String,
    /// Database name, appended as the URL path when set
    pub name: Option<String>,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

impl DatabaseConfig {
    /// Connection URL including the database name.
    ///
    /// Any path or query already on `url` is replaced by `name` when a name
    /// is configured.
    pub fn connection_url(&self) -> String {
        match &self.name {
            Some(name) => {
                let scheme_end = self.url.find("://").map(|i| i + 3).unwrap_or(0);
                let authority_end = self.url[scheme_end..]
                    .find(['/', '?'])
                    .map(|i| scheme_end + i)
                    .unwrap_or(self.url.len());
                format!("{}/{}", &self.url[..authority_end], name)
            }
            None => self.url.clone(),
        }
    }
}

/// Outbound HTTP collaborator (classifier or reply generator).
#[derive(Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Endpoint URL
    pub endpoint: String,
    /// Bearer token, if the collaborator needs one
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl UpstreamConfig {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout_seconds: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            timeout_seconds,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
