//! Configuration management for shell-exec.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file (JSON)
//! 3. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::execution::ExecOptions;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default options for command execution.
    pub exec: ExecOptions,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log filter (error, warn, info, debug, trace, or a full directive).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_vars(|name| std::env::var(name).ok());
    }

    /// Apply overrides read through `lookup`, which maps a variable name to
    /// its value.
    fn apply_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |name: &str| lookup(name).and_then(|value| parse_flag(&value));

        if let Some(silent) = flag("SHELL_EXEC_SILENT") {
            self.exec.silent = silent;
        }

        if let Some(trim) = flag("SHELL_EXEC_TRIM_OUTPUT") {
            self.exec.trim_output = trim;
        }

        if let Some(level) = lookup("SHELL_EXEC_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            self.logging.level = level;
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: env vars > config file > defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_vars(lookup);

        Ok(config)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error.
    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.exec.silent);
        assert!(!config.exec.trim_output);
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "exec": {
                "silent": true,
                "trim_output": true
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert!(config.exec.silent);
        assert!(config.exec.trim_output);
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_config_partial_json() {
        let json = r#"{
            "exec": {
                "trim_output": true
            }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert!(!config.exec.silent); // Default
        assert!(config.exec.trim_output);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_config_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/shell-exec.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" on "), Some(true));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag("Off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("\"silent\""));
        assert!(json.contains("\"trim_output\""));
        assert!(json.contains("\"level\""));
    }

    #[test]
    fn test_load_env_overrides_file() {
        let json = r#"{
            "exec": {
                "silent": false
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::load_with(
            Some(file.path()),
            vars(&[
                ("SHELL_EXEC_SILENT", "yes"),
                ("SHELL_EXEC_TRIM_OUTPUT", "garbage"),
                ("RUST_LOG", "trace"),
            ]),
        )
        .unwrap();

        assert!(config.exec.silent);
        assert!(!config.exec.trim_output); // Unrecognized value ignored
        assert_eq!(config.log_filter(), "trace");
    }

    #[test]
    fn test_log_level_var_beats_rust_log() {
        let mut config = Config::default();
        config.apply_vars(vars(&[
            ("SHELL_EXEC_LOG_LEVEL", "warn"),
            ("RUST_LOG", "trace"),
        ]));
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn test_unrecognized_flag_keeps_file_value() {
        let json = r#"{ "exec": { "trim_output": true } }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::load_with(
            Some(file.path()),
            vars(&[("SHELL_EXEC_TRIM_OUTPUT", "sometimes")]),
        )
        .unwrap();
        assert!(config.exec.trim_output);

        let config =
            Config::load_with(Some(file.path()), vars(&[("SHELL_EXEC_TRIM_OUTPUT", "off")]))
                .unwrap();
        assert!(!config.exec.trim_output);
    }

    #[test]
    fn test_load_without_file_or_env() {
        let config = Config::load_with(None, vars(&[])).unwrap();
        assert!(!config.exec.silent);
        assert!(!config.exec.trim_output);
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load_with(Some(Path::new("/nonexistent/shell-exec.json")), vars(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
