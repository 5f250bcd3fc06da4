//! Country validation.

use crate::middleware::Middleware;
use tollgate_core::{Diagnostic, Request, RunContext};

/// Step name.
pub const NAME: &str = "country";

/// The request field this step reads.
pub const FIELD: &str = "country";

/// The only accepted country (case-sensitive).
pub const EXPECTED: &str = "Poland";

/// Accepts requests whose `country` is exactly `"Poland"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountryCheck;

impl CountryCheck {
    /// Creates the country check.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the verdict without emitting a diagnostic.
    #[must_use]
    pub fn accepts(&self, request: &Request) -> bool {
        request.field_equals(FIELD, EXPECTED)
    }
}

impl Middleware for CountryCheck {
    fn name(&self) -> &'static str {
        NAME
    }

    fn check(&self, ctx: &mut RunContext, request: &Request) -> bool {
        let passed = self.accepts(request);
        ctx.emit(Diagnostic::check(NAME, passed));
        passed
    }
}
