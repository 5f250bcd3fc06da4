//! Configuration schema definitions.
//!
//! This module defines the structure of all configuration sections.

use serde::{Deserialize, Serialize};
use tollgate_telemetry::LogConfig;

/// Chain wiring.
///
/// Each list names steps in the order they are linked. An empty list installs
/// no chain at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Validation steps, e.g. `["age", "country", "name"]`.
    #[serde(default = "default_middleware")]
    pub middleware: Vec<String>,

    /// Dispatch steps, e.g. `["qiwi", "sberbank"]`.
    #[serde(default = "default_handlers")]
    pub handlers: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            middleware: default_middleware(),
            handlers: default_handlers(),
        }
    }
}

fn default_middleware() -> Vec<String> {
    vec!["age".to_string(), "country".to_string(), "name".to_string()]
}

fn default_handlers() -> Vec<String> {
    vec!["qiwi".to_string(), "sberbank".to_string()]
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs.
    #[default]
    Json,
    /// Human-readable pretty format.
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level (`warn`) or filter directive (`tollgate_middleware=debug,warn`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in output.
    #[serde(default)]
    pub ansi_enabled: bool,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
            include_location: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            enabled: config.enabled,
            level: config.level.clone(),
            json_format: config.format == LogFormat::Json,
            file_line_info: config.include_location,
            ansi: config.ansi_enabled,
            ..LogConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_config_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.middleware, vec!["age", "country", "name"]);
        assert_eq!(config.handlers, vec!["qiwi", "sberbank"]);
    }

    #[test]
    fn test_pipeline_config_partial() {
        let config: PipelineConfig = toml::from_str(r#"handlers = ["sberbank"]"#).unwrap();
        assert_eq!(config.middleware, vec!["age", "country", "name"]);
        assert_eq!(config.handlers, vec!["sberbank"]);
    }

    #[test]
    fn test_pipeline_config_unknown_field_rejected() {
        let result: Result<PipelineConfig, _> = toml::from_str(r#"steps = ["age"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_log_format_deserialize() {
        let config: LoggingConfig = toml::from_str(r#"format = "pretty""#).unwrap();
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_config_bridge() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Pretty,
            include_location: true,
            ..Default::default()
        };
        let log_config = LogConfig::from(&logging);

        assert!(log_config.enabled);
        assert_eq!(log_config.level, "debug");
        assert!(!log_config.json_format);
        assert!(log_config.file_line_info);
    }
}
