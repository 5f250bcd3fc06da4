//! Observable run events.
//!
//! Every line the `tollgate` binary prints corresponds to one [`Diagnostic`].
//! Steps record them on the [`RunContext`](crate::RunContext) as they run.

use crate::error::ChainKind;
use serde::Serialize;
use std::fmt;

/// A single observable event produced while wiring or running the chains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A validation step accepted the request.
    CheckPassed {
        /// Name of the validation step.
        check: &'static str,
    },
    /// A validation step rejected the request.
    CheckFailed {
        /// Name of the validation step.
        check: &'static str,
    },
    /// A dispatch step handled the request.
    Processed {
        /// Display name of the payment processor that fired.
        processor: &'static str,
    },
    /// The validation chain failed, so no dispatch step ran.
    Rejected,
    /// The dispatch chain was exhausted without a handler firing.
    Unhandled,
    /// A chain could not be built.
    ConfigurationError {
        /// The chain being built.
        chain: ChainKind,
        /// Why construction failed.
        reason: String,
    },
}

impl Diagnostic {
    /// Creates a pass/fail diagnostic for a validation step.
    #[must_use]
    pub const fn check(check: &'static str, passed: bool) -> Self {
        if passed {
            Self::CheckPassed { check }
        } else {
            Self::CheckFailed { check }
        }
    }

    /// Returns true for events that end a run.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Processed { .. } | Self::Rejected | Self::Unhandled | Self::ConfigurationError { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckPassed { check } => write!(f, "{} validation passed.", Capitalized(check)),
            Self::CheckFailed { check } => {
                write!(f, "{} validation did NOT pass.", Capitalized(check))
            }
            Self::Processed { processor } => {
                write!(f, "Processing payment request via {processor}.")
            }
            Self::Rejected => f.write_str("Request did not reach a handler."),
            Self::Unhandled => f.write_str("Request was not processed: no handler found."),
            Self::ConfigurationError { chain, reason } => {
                write!(f, "Failed to build the {chain} chain: {reason}.")
            }
        }
    }
}

struct Capitalized<'a>(&'a str);

impl fmt::Display for Capitalized<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => {
                for upper in first.to_uppercase() {
                    write!(f, "{upper}")?;
                }
                f.write_str(chars.as_str())
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_constructor() {
        assert_eq!(Diagnostic::check("age", true), Diagnostic::CheckPassed { check: "age" });
        assert_eq!(Diagnostic::check("age", false), Diagnostic::CheckFailed { check: "age" });
    }

    #[test]
    fn test_display_lines() {
        assert_eq!(
            Diagnostic::CheckPassed { check: "age" }.to_string(),
            "Age validation passed."
        );
        assert_eq!(
            Diagnostic::CheckFailed { check: "country" }.to_string(),
            "Country validation did NOT pass."
        );
        assert_eq!(
            Diagnostic::Processed { processor: "QIWI" }.to_string(),
            "Processing payment request via QIWI."
        );
        assert_eq!(Diagnostic::Rejected.to_string(), "Request did not reach a handler.");
        assert_eq!(
            Diagnostic::Unhandled.to_string(),
            "Request was not processed: no handler found."
        );
    }

    #[test]
    fn test_configuration_error_display() {
        let diagnostic = Diagnostic::ConfigurationError {
            chain: ChainKind::Handlers,
            reason: "'age' is a middleware step".to_string(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "Failed to build the handlers chain: 'age' is a middleware step."
        );
    }

    #[test]
    fn test_terminal_events() {
        assert!(!Diagnostic::check("name", true).is_terminal());
        assert!(!Diagnostic::check("name", false).is_terminal());
        assert!(Diagnostic::Rejected.is_terminal());
        assert!(Diagnostic::Unhandled.is_terminal());
        assert!(Diagnostic::Processed { processor: "Sberbank" }.is_terminal());
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&Diagnostic::Processed { processor: "QIWI" })
            .expect("should serialize");
        assert_eq!(json, r#"{"event":"processed","processor":"QIWI"}"#);
    }
}
