//! Handler trait for request dispatch.
//!
//! The [`Handler`] trait defines a dispatch step: a pure predicate deciding
//! whether the step applies, and an action that reports whether the run
//! should stop.

use std::ops::ControlFlow;
use tollgate_core::{Request, RunContext};

/// A single dispatch step.
///
/// # Invariants
///
/// - `matches` MUST be pure
/// - `act` is only called after `matches` returned `true`
/// - `act` returns [`ControlFlow::Break`] to end the whole run
///
/// # Example
///
/// ```
/// use std::ops::ControlFlow;
/// use tollgate_core::{Diagnostic, Request, RunContext};
/// use tollgate_dispatch::Handler;
///
/// struct CashHandler;
///
/// impl Handler for CashHandler {
///     fn name(&self) -> &'static str {
///         "cash"
///     }
///
///     fn matches(&self, request: &Request) -> bool {
///         request.field_equals("payment", "Cash")
///     }
///
///     fn act(&self, ctx: &mut RunContext, _request: &Request) -> ControlFlow<()> {
///         ctx.emit(Diagnostic::Processed { processor: "Cash" });
///         ControlFlow::Break(())
///     }
/// }
///
/// assert!(!CashHandler.matches(&Request::sample()));
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Returns the unique name of this step.
    fn name(&self) -> &'static str;

    /// Returns true if this step should act on the request.
    fn matches(&self, request: &Request) -> bool;

    /// Handles the request.
    ///
    /// # Returns
    ///
    /// [`ControlFlow::Break`] to terminate the run, [`ControlFlow::Continue`]
    /// to let the chain go on to the next step.
    fn act(&self, ctx: &mut RunContext, request: &Request) -> ControlFlow<()>;
}

/// A handler built from a predicate closure and an action closure.
///
/// # Example
///
/// ```
/// use std::ops::ControlFlow;
/// use tollgate_core::{Request, RunContext};
/// use tollgate_dispatch::{FnHandler, Handler};
///
/// let audit = FnHandler::new(
///     "audit",
///     |_: &Request| true,
///     |_: &mut RunContext, _: &Request| ControlFlow::Continue(()),
/// );
///
/// assert!(audit.matches(&Request::new()));
/// ```
pub struct FnHandler<M, A> {
    name: &'static str,
    matches: M,
    act: A,
}

impl<M, A> FnHandler<M, A> {
    /// Creates a new function-based handler.
    pub const fn new(name: &'static str, matches: M, act: A) -> Self {
        Self { name, matches, act }
    }
}

impl<M, A> Handler for FnHandler<M, A>
where
    M: Fn(&Request) -> bool + Send + Sync + 'static,
    A: Fn(&mut RunContext, &Request) -> ControlFlow<()> + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn matches(&self, request: &Request) -> bool {
        (self.matches)(request)
    }

    fn act(&self, ctx: &mut RunContext, request: &Request) -> ControlFlow<()> {
        (self.act)(ctx, request)
    }
}

impl<M, A> std::fmt::Debug for FnHandler<M, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHandler").field("name", &self.name).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollgate_core::Diagnostic;

    #[test]
    fn test_fn_handler_delegates() {
        let handler = FnHandler::new(
            "card",
            |request: &Request| request.field_equals("payment", "Card"),
            |ctx: &mut RunContext, _: &Request| {
                ctx.emit(Diagnostic::Processed { processor: "Card" });
                ControlFlow::Break(())
            },
        );

        let card = Request::new().with_field("payment", "Card");
        let mut ctx = RunContext::new();

        assert_eq!(handler.name(), "card");
        assert!(handler.matches(&card));
        assert!(!handler.matches(&Request::sample()));
        assert_eq!(handler.act(&mut ctx, &card), ControlFlow::Break(()));
        assert_eq!(ctx.diagnostics(), &[Diagnostic::Processed { processor: "Card" }]);
    }
}
