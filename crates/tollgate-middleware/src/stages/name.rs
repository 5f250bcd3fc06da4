//! Name validation.

use crate::middleware::Middleware;
use tollgate_core::{Diagnostic, Request, RunContext};

/// Step name.
pub const NAME: &str = "name";

/// The request field this step reads.
pub const FIELD: &str = "name";

/// The only accepted name (case-sensitive).
pub const EXPECTED: &str = "John";

/// Accepts requests whose `name` is exactly `"John"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameCheck;

impl NameCheck {
    /// Creates the name check.
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

impl Middleware for NameCheck {
    fn name(&self) -> &'static str {
        NAME
    }

    fn check(&self, ctx: &mut RunContext, request: &Request) -> bool {
        let passed = self.accepts(request);
        ctx.emit(Diagnostic::check(NAME, passed));
        passed
    }
}
