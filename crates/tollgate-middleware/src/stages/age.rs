//! Age validation.
//!
//! The `age` field is stored as a string. It is parsed as a decimal number,
//! ignoring surrounding whitespace, and must be strictly greater than
//! [`MIN_AGE_EXCLUSIVE`]. Values that do not parse, or parse to a non-finite
//! number, fail the check.

use crate::middleware::Middleware;
use tollgate_core::{Diagnostic, Request, RunContext};

/// Step name.
pub const NAME: &str = "age";

/// The request field this step reads.
pub const FIELD: &str = "age";

/// Ages at or below this value are rejected.
pub const MIN_AGE_EXCLUSIVE: f64 = 20.0;

/// Accepts requests whose `age` is strictly above 20.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeCheck;

impl AgeCheck {
    /// Creates the age check.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the verdict without emitting a diagnostic.
    #[must_use]
    pub fn accepts(&self, request: &Request) -> bool {
        request
            .get(FIELD)
            .and_then(parse_age)
            .is_some_and(|age| age > MIN_AGE_EXCLUSIVE)
    }
}

fn parse_age(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|age| age.is_finite())
}

impl Middleware for AgeCheck {
    fn name(&self) -> &'static str {
        NAME
    }

    fn check(&self, ctx: &mut RunContext, request: &Request) -> bool {
        let passed = self.accepts(request);
        ctx.emit(Diagnostic::check(NAME, passed));
        passed
    }
}
