//! The dispatch chain.

use crate::handler::Handler;
use std::ops::ControlFlow;
use std::sync::Arc;
use tollgate_core::{Request, RunContext};

/// A type-erased handler that can be stored in a vector.
pub type BoxedHandler = Arc<dyn Handler>;

/// How a dispatch run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A handler acted and terminated the run.
    Handled {
        /// Name of the handler that terminated the run.
        handler: &'static str,
    },
    /// Every step was tried and none terminated the run.
    Exhausted,
}

impl Dispatch {
    /// Returns true if a handler terminated the run.
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        matches!(self, Self::Handled { .. })
    }
}

/// An immutable, ordered list of dispatch steps.
///
/// The chain is walked front to back. For each step whose predicate matches,
/// the action runs; a [`ControlFlow::Break`] from the action stops the walk.
#[derive(Clone, Default)]
pub struct DispatchChain {
    steps: Vec<BoxedHandler>,
}

impl DispatchChain {
    /// Creates a new chain builder.
    #[must_use]
    pub fn builder() -> DispatchChainBuilder {
        DispatchChainBuilder::new()
    }

    /// Walks the chain until an action terminates the run.
    ///
    /// Steps after the terminating one are never consulted, not even their
    /// predicates.
    pub fn run(&self, ctx: &mut RunContext, request: &Request) -> Dispatch {
        for step in &self.steps {
            if !step.matches(request) {
                tracing::debug!(run_id = %ctx.run_id(), step = step.name(), "Handler skipped");
                continue;
            }

            tracing::debug!(run_id = %ctx.run_id(), step = step.name(), "Handler matched");
            if let ControlFlow::Break(()) = step.act(ctx, request) {
                tracing::info!(run_id = %ctx.run_id(), step = step.name(), "Request handled");
                return Dispatch::Handled {
                    handler: step.name(),
                };
            }
        }

        tracing::debug!(run_id = %ctx.run_id(), steps = self.steps.len(), "Dispatch chain exhausted");
        Dispatch::Exhausted
    }

    /// Returns the names of all steps in order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the chain has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl std::fmt::Debug for DispatchChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchChain")
            .field("steps", &self.step_names())
            .finish()
    }
}

impl FromIterator<BoxedHandler> for DispatchChain {
    fn from_iter<I: IntoIterator<Item = BoxedHandler>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

/// Builder for constructing a [`DispatchChain`].
#[derive(Default)]
pub struct DispatchChainBuilder {
    steps: Vec<BoxedHandler>,
}

impl DispatchChainBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step; it is tried after every step added before it.
    #[must_use]
    pub fn add<H: Handler>(mut self, handler: H) -> Self {
        self.steps.push(Arc::new(handler));
        self
    }

    /// Appends an already type-erased step.
    #[must_use]
    pub fn add_boxed(mut self, handler: BoxedHandler) -> Self {
        self.steps.push(handler);
        self
    }

    /// Builds the chain.
    #[must_use]
    pub fn build(self) -> DispatchChain {
        DispatchChain { steps: self.steps }
    }
}
