//! Config file loading and connection setting resolution.

use std::fs;
use std::path::Path;

use crate::domain::configuration::server_config::{DEFAULT_TIMEOUT_SECS, FileConfig, ServerConfig};
use crate::domain::{AppError, MissingParameter};

/// Load a config file from disk.
pub fn load_config(path: &Path) -> Result<FileConfig, AppError> {
    if !path.exists() {
        return Err(AppError::config_error(format!("Config file not found: {}", path.display())));
    }

    let content = fs::read_to_string(path)?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<FileConfig, AppError> {
    let config: FileConfig = toml::from_str(content)?;
    Ok(config)
}

/// Connection inputs as supplied on the command line (flags or their env fallbacks).
#[derive(Debug, Clone, Default)]
pub struct ConnectionArgs {
    pub server: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    /// Server and API key after falling back to the config file, with blanks treated as absent.
    pub fn merged(&self, file: &FileConfig) -> (Option<String>, Option<String>) {
        let server = present(self.server.as_deref()).or_else(|| present(file.server.as_deref()));
        let api_key =
            present(self.api_key.as_deref()).or_else(|| present(file.api_key.as_deref()));
        (server, api_key)
    }

    /// Build a validated `ServerConfig`, reporting missing server or key.
    pub fn resolve(&self, file: &FileConfig) -> Result<ServerConfig, AppError> {
        let (server, api_key) = match self.merged(file) {
            (Some(server), Some(api_key)) => (server, api_key),
            (server, api_key) => {
                let mut missing = Vec::new();
                if server.is_none() {
                    missing.push(MissingParameter::Server);
                }
                if api_key.is_none() {
                    missing.push(MissingParameter::ApiKey);
                }
                return Err(AppError::MissingParameters(missing));
            }
        };

        let timeout_secs = self.timeout_secs.or(file.timeout_secs).unwrap_or(DEFAULT_TIMEOUT_SECS);
        ServerConfig::new(&server, &api_key, timeout_secs)
    }
}

/// Treat an empty or whitespace-only value the same as an absent one.
pub(crate) fn present(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|value| !value.is_empty()).map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_partial_config() {
        let config = parse_config_content("server = \"https://octopus.example.com\"\n").unwrap();
        assert_eq!(config.server.as_deref(), Some("https://octopus.example.com"));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = parse_config_content("serverr = \"x\"\n").unwrap_err();
        assert!(matches!(err, AppError::TomlParse(_)));
    }

    #[test]
    fn loads_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = \"API-FILE\"\ntimeout_secs = 5").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("API-FILE"));
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn missing_config_file_is_configuration_error() {
        let err = load_config(Path::new("/nonexistent/octorelease.toml")).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn flags_override_file_values() {
        let args = ConnectionArgs {
            server: Some("https://flag.example.com".to_string()),
            api_key: None,
            timeout_secs: None,
        };
        let file = FileConfig {
            server: Some("https://file.example.com".to_string()),
            api_key: Some("API-FILE".to_string()),
            timeout_secs: Some(12),
        };

        let config = args.resolve(&file).unwrap();
        assert_eq!(config.server_url.as_str(), "https://flag.example.com/");
        assert_eq!(config.api_key, "API-FILE");
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn reports_each_missing_connection_parameter() {
        let args = ConnectionArgs { server: Some("  ".to_string()), ..Default::default() };
        let err = args.resolve(&FileConfig::default()).unwrap_err();
        match err {
            AppError::MissingParameters(missing) => {
                assert_eq!(missing, vec![MissingParameter::Server, MissingParameter::ApiKey]);
            }
            other => panic!("unexpected error variant: {}", other),
        }
    }
}
