//! Structured logging for Tollgate.
//!
//! [`init_logging`] installs a `tracing-subscriber` registry with one
//! formatting layer (JSON or pretty) behind an [`EnvFilter`]. Output goes to
//! stderr; stdout belongs to the run diagnostics.
//!
//! # Example
//!
//! ```rust,no_run
//! use tollgate_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default()).expect("logging");
//! tracing::info!(step = "age", passed = true, "Validation step evaluated");
//! ```

use crate::error::TelemetryError;
use crate::TelemetryResult;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// How logs are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Install a subscriber at all.
    pub enabled: bool,

    /// Filter directive: a level such as `"warn"` or a full directive such
    /// as `"tollgate_middleware=debug,warn"`.
    pub level: String,

    /// One JSON object per event instead of the pretty format.
    pub json_format: bool,

    /// Log span open and close.
    pub span_events: bool,

    /// Source file and line of each event.
    pub file_line_info: bool,

    /// Thread IDs on each event.
    pub thread_ids: bool,

    /// Module path of each event.
    pub include_target: bool,

    /// Color output; ignored for JSON.
    pub ansi: bool,

    /// Reported once at start-up.
    pub service_name: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            json_format: true,
            span_events: false,
            file_line_info: false,
            thread_ids: false,
            include_target: true,
            ansi: false,
            service_name: "tollgate".to_string(),
        }
    }
}

impl LogConfig {
    /// Pretty, colored, debug-level output with span events and locations.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            span_events: true,
            file_line_info: true,
            ansi: true,
            ..Self::default()
        }
    }

    /// JSON output at info level. Same as [`Default`].
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }

    /// Installs nothing.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    fn fmt_layer(&self) -> BoxedLayer {
        let span_events = if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_span_events(span_events)
            .with_file(self.file_line_info)
            .with_line_number(self.file_line_info)
            .with_thread_ids(self.thread_ids)
            .with_target(self.include_target);

        if self.json_format {
            layer.json().boxed()
        } else {
            layer.pretty().with_ansi(self.ansi).boxed()
        }
    }
}

/// Installs the global subscriber described by `config`.
///
/// Does nothing when `config.enabled` is false.
///
/// # Errors
///
/// [`TelemetryError::InvalidConfig`] for a malformed filter directive and
/// [`TelemetryError::LoggingInit`] when a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;

    tracing_subscriber::registry()
        .with(config.fmt_layer().with_filter(filter))
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    tracing::debug!(service = %config.service_name, level = %config.level, "Logging initialized");
    Ok(())
}

/// Parses a filter directive.
///
/// # Errors
///
/// [`TelemetryError::InvalidConfig`] if the directive does not parse.
pub fn create_env_filter(directive: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| TelemetryError::InvalidConfig(format!("log filter '{directive}': {e}")))
}

/// Logs the start of a run with its request.
#[macro_export]
macro_rules! log_run_start {
    ($run_id:expr, $request:expr) => {
        tracing::info!(run_id = %$run_id, request = %$request, "Run started");
    };
}

/// Logs the end of a run with its outcome and duration.
#[macro_export]
macro_rules! log_run_complete {
    ($run_id:expr, $outcome:expr, $duration_us:expr) => {
        tracing::info!(
            run_id = %$run_id,
            outcome = %$outcome,
            duration_us = $duration_us,
            "Run completed"
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_json_info() {
        let config = LogConfig::default();
        assert!(config.enabled);
        assert!(config.json_format);
        assert!(!config.ansi);
        assert_eq!(config.level, "info");
        assert_eq!(LogConfig::production(), config);
    }

    #[test]
    fn test_development_is_pretty_debug() {
        let config = LogConfig::development();
        assert!(!config.json_format);
        assert!(config.span_events);
        assert!(config.file_line_info);
        assert!(config.ansi);
        assert_eq!(config.level, "debug");
        assert_eq!(config.service_name, "tollgate");
    }

    #[test]
    fn test_env_filter_directives() {
        assert!(create_env_filter("warn").is_ok());
        assert!(create_env_filter("tollgate_middleware=debug,warn").is_ok());
        assert!(matches!(
            create_env_filter("tollgate=loud"),
            Err(TelemetryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_disabled_installs_nothing() {
        assert!(init_logging(&LogConfig::disabled()).is_ok());
    }

    #[test]
    fn test_invalid_level_is_reported_before_install() {
        let config = LogConfig {
            level: "tollgate=loud".to_string(),
            ..LogConfig::default()
        };
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::InvalidConfig(_))
        ));
    }
}
