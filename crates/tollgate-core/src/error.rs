//! Error types for Tollgate.
//!
//! A failing validation step is not an error: it is the designed negative
//! outcome of a chain run and travels as a `bool`. The only error raised by
//! the chains themselves is a wiring mistake, reported as
//! [`TollgateError::Configuration`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias using [`TollgateError`].
pub type TollgateResult<T> = Result<T, TollgateError>;

/// Identifies which chain an error or event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainKind {
    /// The validation chain (middleware).
    Middleware,
    /// The dispatch chain (handlers).
    Handlers,
}

impl ChainKind {
    /// Returns the chain name used in logs and diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Middleware => "middleware",
            Self::Handlers => "handlers",
        }
    }
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Standard error type for Tollgate.
///
/// # Example
///
/// ```
/// use tollgate_core::{ChainKind, TollgateError};
///
/// let err = TollgateError::configuration(ChainKind::Handlers, "unknown step 'paypal'");
/// assert!(err.to_string().contains("handlers"));
/// assert!(err.is_fatal());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TollgateError {
    /// A chain was wired with something that is not a step of its kind.
    #[error("Configuration error in {chain} chain: {reason}")]
    Configuration {
        /// The chain being built.
        chain: ChainKind,
        /// Human-readable explanation.
        reason: String,
    },
}

impl TollgateError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(chain: ChainKind, reason: impl Into<String>) -> Self {
        Self::Configuration {
            chain,
            reason: reason.into(),
        }
    }

    /// Returns true if the error must stop the program before any run.
    ///
    /// Every current variant is fatal; callers should still ask rather than
    /// assume.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        match self {
            Self::Configuration { .. } => true,
        }
    }

    /// Converts the error into the diagnostic line reported to the user.
    #[must_use]
    pub fn to_diagnostic(&self) -> crate::Diagnostic {
        match self {
            Self::Configuration { chain, reason } => crate::Diagnostic::ConfigurationError {
                chain: *chain,
                reason: reason.clone(),
            },
        }
    }
}
