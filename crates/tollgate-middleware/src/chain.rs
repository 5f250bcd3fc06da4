//! The validation chain.
//!
//! A [`ValidationChain`] owns its steps in a `Vec` and walks them front to
//! back. The chain is assembled once through [`ValidationChainBuilder`] and
//! cannot be modified afterwards.

use crate::middleware::Middleware;
use std::sync::Arc;
use tollgate_core::{Request, RunContext};

/// A type-erased middleware that can be stored in a vector.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// An immutable, ordered list of validation steps.
///
/// # Example
///
/// ```
/// use tollgate_core::{Request, RunContext};
/// use tollgate_middleware::{ValidationChain, stages::AgeCheck};
///
/// let chain = ValidationChain::builder().add(AgeCheck::new()).build();
///
/// let mut ctx = RunContext::new();
/// let minor = Request::new().with_field("age", "18");
/// assert!(!chain.run(&mut ctx, &minor));
/// ```
#[derive(Clone, Default)]
pub struct ValidationChain {
    steps: Vec<BoxedMiddleware>,
}

impl ValidationChain {
    /// Creates a new chain builder.
    #[must_use]
    pub fn builder() -> ValidationChainBuilder {
        ValidationChainBuilder::new()
    }

    /// Runs every step in order until one fails.
    ///
    /// Returns `false` as soon as a step rejects the request; the remaining
    /// steps are not evaluated. Returns `true` when every step passes,
    /// including when the chain is empty.
    pub fn run(&self, ctx: &mut RunContext, request: &Request) -> bool {
        for step in &self.steps {
            let passed = step.check(ctx, request);
            tracing::debug!(run_id = %ctx.run_id(), step = step.name(), passed, "Validation step evaluated");

            if !passed {
                tracing::info!(
                    run_id = %ctx.run_id(),
                    step = step.name(),
                    "Validation chain short-circuited"
                );
                return false;
            }
        }

        true
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

impl std::fmt::Debug for ValidationChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationChain")
            .field("steps", &self.step_names())
            .finish()
    }
}

impl FromIterator<BoxedMiddleware> for ValidationChain {
    fn from_iter<I: IntoIterator<Item = BoxedMiddleware>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

/// Builder for constructing a [`ValidationChain`].
#[derive(Default)]
pub struct ValidationChainBuilder {
    steps: Vec<BoxedMiddleware>,
}

impl ValidationChainBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step; it runs after every step added before it.
    #[must_use]
    pub fn add<M: Middleware>(mut self, middleware: M) -> Self {
        self.steps.push(Arc::new(middleware));
        self
    }

    /// Appends an already type-erased step.
    #[must_use]
    pub fn add_boxed(mut self, middleware: BoxedMiddleware) -> Self {
        self.steps.push(middleware);
        self
    }

    /// Builds the chain.
    #[must_use]
    pub fn build(self) -> ValidationChain {
        ValidationChain { steps: self.steps }
    }
}
