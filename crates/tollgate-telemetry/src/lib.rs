//! Structured logging for Tollgate.
//!
//! Tollgate writes two streams:
//!
//! ```text
//! stdout  ← one line per run diagnostic (the program's actual output)
//! stderr  ← structured tracing events (this crate)
//! ```
//!
//! Library crates only emit `tracing` events; the binary decides whether and
//! how they are rendered by calling [`init_logging`] once at start-up.
//!
//! # Example
//!
//! ```rust,no_run
//! use tollgate_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development()).expect("logging");
//! tracing::info!(run_id = "0190...", "Run started");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
