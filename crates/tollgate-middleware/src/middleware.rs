//! Core middleware trait.
//!
//! This module defines the [`Middleware`] trait that every validation step
//! implements, plus [`FnMiddleware`] for closure-backed steps.

use tollgate_core::{Diagnostic, Request, RunContext};

/// A single validation step.
///
/// # Invariants
///
/// - `check` MUST NOT mutate the request (it only ever receives `&Request`)
/// - `check` MUST emit exactly one [`Diagnostic`] describing its verdict
/// - A missing field is a failed check, never a panic
///
/// # Example
///
/// ```
/// use tollgate_core::{Diagnostic, Request, RunContext};
/// use tollgate_middleware::Middleware;
///
/// struct HasPayment;
///
/// impl Middleware for HasPayment {
///     fn name(&self) -> &'static str {
///         "payment"
///     }
///
///     fn check(&self, ctx: &mut RunContext, request: &Request) -> bool {
///         let passed = request.contains("payment");
///         ctx.emit(Diagnostic::check(self.name(), passed));
///         passed
///     }
/// }
///
/// let mut ctx = RunContext::new();
/// assert!(!HasPayment.check(&mut ctx, &Request::new()));
/// ```
pub trait Middleware: Send + Sync + 'static {
    /// Returns the unique name of this step.
    ///
    /// This name is used for logging, diagnostics and step lookup.
    fn name(&self) -> &'static str;

    /// Evaluates the step against the request.
    ///
    /// Returns `true` if the request passes.
    fn check(&self, ctx: &mut RunContext, request: &Request) -> bool;
}

/// A middleware built from a predicate closure.
///
/// The diagnostic is emitted on the closure's behalf, so the predicate only
/// has to decide.
///
/// # Example
///
/// ```
/// use tollgate_core::{Request, RunContext};
/// use tollgate_middleware::{FnMiddleware, Middleware};
///
/// let vip = FnMiddleware::new("vip", |request: &Request| request.field_equals("tier", "vip"));
///
/// let mut ctx = RunContext::new();
/// assert!(vip.check(&mut ctx, &Request::new().with_field("tier", "vip")));
/// ```
pub struct FnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F> FnMiddleware<F> {
    /// Creates a new function-based middleware.
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(&Request) -> bool + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn check(&self, ctx: &mut RunContext, request: &Request) -> bool {
        let passed = (self.func)(request);
        ctx.emit(Diagnostic::check(self.name, passed));
        passed
    }
}

impl<F> std::fmt::Debug for FnMiddleware<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnMiddleware").field("name", &self.name).finish_non_exhaustive()
    }
}
