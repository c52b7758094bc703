//! Server connection configuration models.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Optional settings read from a TOML config file.
///
/// Every field may be overridden by a command-line flag or environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Octopus Deploy server URL.
    #[serde(default)]
    pub server: Option<String>,
    /// API key used to authenticate against the server.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Resolved connection settings for one invocation.
#[derive(Clone)]
pub struct ServerConfig {
    pub server_url: Url,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("server_url", &self.server_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl ServerConfig {
    pub fn new(server: &str, api_key: &str, timeout_secs: u64) -> Result<Self, AppError> {
        let server_url = Url::parse(server).map_err(|e| {
            AppError::config_error(format!("Invalid server URL '{}': {}", server, e))
        })?;
        let config = Self { server_url, api_key: api_key.to_string(), timeout_secs };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !matches!(self.server_url.scheme(), "http" | "https") {
            return Err(AppError::config_error(format!(
                "Server URL must use http or https: {}",
                self.server_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("timeout_secs must be greater than 0"));
        }
        Ok(())
    }

    /// Resolve `path` relative to the server root, keeping any virtual directory.
    pub fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        let mut base = self.server_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/')).map_err(|e| {
            AppError::config_error(format!("Invalid endpoint path '{}': {}", path, e))
        })
    }
}
