//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Why a configuration could not be produced.
///
/// Any of these is fatal for the binary: it refuses to run a request with a
/// configuration it could not fully read.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file passed with `--config` does not exist.
    #[error("config file {path} does not exist")]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("cannot read config file {path}")]
    Read {
        /// The path that was read.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Only TOML and JSON are understood.
    #[error("unsupported config format '{format}', expected toml or json")]
    UnsupportedFormat {
        /// The extension or format name that was given.
        format: String,
    },

    /// Malformed TOML, or a TOML document with unknown fields.
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed JSON, or a JSON document with unknown fields.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// A `.env` file exists but is malformed.
    #[error("cannot load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// A `TOLLGATE__*` variable has a value that does not parse.
    #[error("environment variable {var}: {reason}")]
    EnvVar {
        /// Full variable name.
        var: String,
        /// What was wrong with the value.
        reason: String,
    },

    /// A value parsed but is not acceptable.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted field path, e.g. `logging.level`.
        field: String,
        /// What was wrong with the value.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub(crate) fn env_var(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvVar {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid value error for a dotted field path.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
