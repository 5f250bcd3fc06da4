//! Named step registry.
//!
//! Chains wired from configuration refer to steps by name. The registry maps
//! each name to exactly one step of one kind, so a name that resolves to a
//! step of the other kind can be reported precisely.

use std::collections::BTreeMap;
use std::sync::Arc;

use tollgate_core::{ChainKind, TollgateError, TollgateResult};
use tollgate_dispatch::{handlers, BoxedHandler, Handler};
use tollgate_middleware::{stages, BoxedMiddleware, Middleware};

const BLANK_NAME: &str = "step names must not be blank";

/// Maps step names to validation and dispatch steps.
///
/// # Example
///
/// ```
/// use tollgate::StepRegistry;
///
/// let registry = StepRegistry::standard();
/// assert!(registry.middleware("age").is_ok());
/// assert!(registry.handler("age").is_err());
/// ```
#[derive(Clone, Default)]
pub struct StepRegistry {
    middleware: BTreeMap<&'static str, BoxedMiddleware>,
    handlers: BTreeMap<&'static str, BoxedHandler>,
}

impl StepRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the standard checks and payment handlers.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for step in stages::STANDARD.into_iter().filter_map(stages::lookup) {
            registry.middleware.insert(step.name(), step);
        }
        for step in handlers::STANDARD.into_iter().filter_map(handlers::lookup) {
            registry.handlers.insert(step.name(), step);
        }
        registry
    }

    /// Registers a validation step under its own name.
    ///
    /// A later registration with the same name replaces the earlier one.
    #[must_use]
    pub fn with_middleware<M: Middleware>(mut self, middleware: M) -> Self {
        let step: BoxedMiddleware = Arc::new(middleware);
        self.handlers.remove(step.name());
        self.middleware.insert(step.name(), step);
        self
    }

    /// Registers a dispatch step under its own name.
    ///
    /// A later registration with the same name replaces the earlier one.
    #[must_use]
    pub fn with_handler<H: Handler>(mut self, handler: H) -> Self {
        let step: BoxedHandler = Arc::new(handler);
        self.middleware.remove(step.name());
        self.handlers.insert(step.name(), step);
        self
    }

    /// Resolves a validation step.
    ///
    /// # Errors
    ///
    /// Returns `TollgateError::Configuration` for the middleware chain if the
    /// name is blank, unknown or names a dispatch step.
    pub fn middleware(&self, name: &str) -> TollgateResult<BoxedMiddleware> {
        if let Some(step) = self.middleware.get(name) {
            return Ok(Arc::clone(step));
        }

        let reason = if name.trim().is_empty() {
            BLANK_NAME.to_string()
        } else if self.handlers.contains_key(name) {
            format!("'{name}' is a handler, not a middleware step")
        } else {
            format!("unknown middleware step '{name}'")
        };
        Err(TollgateError::configuration(ChainKind::Middleware, reason))
    }

    /// Resolves a dispatch step.
    ///
    /// # Errors
    ///
    /// Returns `TollgateError::Configuration` for the handlers chain if the
    /// name is blank, unknown or names a validation step.
    pub fn handler(&self, name: &str) -> TollgateResult<BoxedHandler> {
        if let Some(step) = self.handlers.get(name) {
            return Ok(Arc::clone(step));
        }

        let reason = if name.trim().is_empty() {
            BLANK_NAME.to_string()
        } else if self.middleware.contains_key(name) {
            format!("'{name}' is a middleware step, not a handler")
        } else {
            format!("unknown handler '{name}'")
        };
        Err(TollgateError::configuration(ChainKind::Handlers, reason))
    }

    /// Returns the registered validation step names in sorted order.
    pub fn middleware_names(&self) -> Vec<&'static str> {
        self.middleware.keys().copied().collect()
    }

    /// Returns the registered dispatch step names in sorted order.
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.keys().copied().collect()
    }
}

impl std::fmt::Debug for StepRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepRegistry")
            .field("middleware", &self.middleware_names())
            .field("handlers", &self.handler_names())
            .finish()
    }
}
