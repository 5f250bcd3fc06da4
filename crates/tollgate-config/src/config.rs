//! Main configuration types.
//!
//! This module provides the top-level [`TollgateConfig`] struct and its builder.

use serde::{Deserialize, Serialize};
use tollgate_core::Request;

use tollgate_telemetry::create_env_filter;

use crate::{ConfigError, LogFormat, LoggingConfig, PipelineConfig};

/// Complete Tollgate configuration.
///
/// Every section is optional in a file; missing sections fall back to the
/// reference wiring.
///
/// # Example
///
/// ```
/// use tollgate_config::TollgateConfig;
///
/// let config = TollgateConfig::default();
/// assert_eq!(config.request.get("payment"), Some("QIWI"));
/// assert_eq!(config.pipeline.handlers, vec!["qiwi", "sberbank"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TollgateConfig {
    /// The request record to validate and dispatch.
    #[serde(default = "Request::sample")]
    pub request: Request,

    /// Chain wiring.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TollgateConfig {
    fn default() -> Self {
        Self {
            request: Request::sample(),
            pipeline: PipelineConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TollgateConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> TollgateConfigBuilder {
        TollgateConfigBuilder::new()
    }

    /// Development preset: verbose, human-readable logs.
    #[must_use]
    pub fn development() -> Self {
        Self {
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                ansi_enabled: true,
                include_location: true,
                ..LoggingConfig::default()
            },
            ..Self::default()
        }
    }

    /// Validate the configuration.
    ///
    /// Step names are not checked here; resolving them against the step
    /// registry is what reports a bad pipeline entry.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `logging.level` is not a valid filter directive
    /// - a request field name is blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = create_env_filter(&self.logging.level) {
            return Err(ConfigError::invalid_value("logging.level", e.to_string()));
        }

        if self.request.fields().any(|(name, _)| name.trim().is_empty()) {
            return Err(ConfigError::invalid_value(
                "request",
                "field names must not be blank",
            ));
        }

        Ok(())
    }
}

/// Builder for [`TollgateConfig`].
#[derive(Debug, Default)]
pub struct TollgateConfigBuilder {
    request: Option<Request>,
    pipeline: Option<PipelineConfig>,
    logging: Option<LoggingConfig>,
}

impl TollgateConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request record.
    #[must_use]
    pub fn request(mut self, request: Request) -> Self {
        self.request = Some(request);
        self
    }

    /// Sets the chain wiring.
    #[must_use]
    pub fn pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Sets the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> TollgateConfig {
        let defaults = TollgateConfig::default();
        TollgateConfig {
            request: self.request.unwrap_or(defaults.request),
            pipeline: self.pipeline.unwrap_or(defaults.pipeline),
            logging: self.logging.unwrap_or(defaults.logging),
        }
    }
}
