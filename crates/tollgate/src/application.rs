//! The orchestrator.
//!
//! An [`Application`] holds one request and at most one chain of each kind.
//! [`Application::handle`] runs the validation chain and, only when it
//! passes, the dispatch chain:
//!
//! ```text
//! Request → ValidationChain ──false──→ Rejected
//!                 │
//!               true
//!                 ↓
//!           DispatchChain ──Break──→ Handled
//!                 │
//!             exhausted
//!                 ↓
//!             Unhandled
//! ```

use std::fmt;

use tollgate_config::TollgateConfig;
use tollgate_core::{Diagnostic, Request, RunContext, RunId, TollgateResult};
use tollgate_dispatch::{BoxedHandler, Dispatch, DispatchChain};
use tollgate_middleware::{BoxedMiddleware, ValidationChain};

use crate::StepRegistry;

/// Exit status of the binary when the chains cannot be built.
pub const CONFIG_ERROR_EXIT: u8 = 1;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A validation step failed; no handler was consulted.
    Rejected,
    /// A handler fired and terminated the run.
    Handled {
        /// Name of the handler that fired.
        handler: &'static str,
    },
    /// No handler terminated the run, or none were installed.
    Unhandled,
}

impl Outcome {
    /// Returns true if a handler fired.
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        matches!(self, Self::Handled { .. })
    }

    /// Short label used in logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Rejected => "rejected",
            Self::Handled { .. } => "handled",
            Self::Unhandled => "unhandled",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handled { handler } => write!(f, "handled by {handler}"),
            other => f.write_str(other.label()),
        }
    }
}

/// Everything a single run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Identifier of the run, as seen in the logs.
    pub run_id: RunId,
    /// How the run ended.
    pub outcome: Outcome,
    /// Diagnostics in emission order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Exit status for the binary.
    ///
    /// Every completed run exits with 0, whatever its outcome.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self.outcome {
            Outcome::Rejected | Outcome::Handled { .. } | Outcome::Unhandled => 0,
        }
    }

    /// Renders the diagnostics, one line each.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.diagnostics.iter().map(ToString::to_string)
    }
}

/// Validation and dispatch over a single request.
///
/// # Example
///
/// ```
/// use tollgate::{Application, Outcome};
/// use tollgate_core::Request;
///
/// let app = Application::builder(Request::sample())
///     .middleware_names(["age", "country", "name"])
///     .handler_names(["qiwi", "sberbank"])
///     .build()
///     .unwrap();
///
/// let report = app.handle();
/// assert_eq!(report.outcome, Outcome::Handled { handler: "qiwi" });
/// ```
#[derive(Debug, Clone)]
pub struct Application {
    request: Request,
    middleware: Option<ValidationChain>,
    handlers: Option<DispatchChain>,
}

impl Application {
    /// Creates an application with no chains installed.
    #[must_use]
    pub fn new(request: Request) -> Self {
        Self {
            request,
            middleware: None,
            handlers: None,
        }
    }

    /// Creates a builder that wires chains by step name.
    #[must_use]
    pub fn builder(request: Request) -> ApplicationBuilder {
        ApplicationBuilder::new(request)
    }

    /// Builds an application from loaded configuration using the standard
    /// registry.
    ///
    /// # Errors
    ///
    /// Returns `TollgateError::Configuration` if a pipeline entry does not
    /// name a step of the expected kind.
    pub fn from_config(config: &TollgateConfig) -> TollgateResult<Self> {
        Self::builder(config.request.clone())
            .middleware_names(&config.pipeline.middleware)
            .handler_names(&config.pipeline.handlers)
            .build()
    }

    /// Installs the validation chain, linking steps in the given order.
    ///
    /// An empty list installs no chain. A previously installed chain is
    /// replaced.
    pub fn add_middleware<I>(&mut self, steps: I) -> &mut Self
    where
        I: IntoIterator<Item = BoxedMiddleware>,
    {
        let chain: ValidationChain = steps.into_iter().collect();
        self.middleware = (!chain.is_empty()).then_some(chain);
        self
    }

    /// Installs the dispatch chain, linking steps in the given order.
    ///
    /// An empty list installs no chain. A previously installed chain is
    /// replaced.
    pub fn add_handlers<I>(&mut self, steps: I) -> &mut Self
    where
        I: IntoIterator<Item = BoxedHandler>,
    {
        let chain: DispatchChain = steps.into_iter().collect();
        self.handlers = (!chain.is_empty()).then_some(chain);
        self
    }

    /// Returns the request every run reads.
    #[must_use]
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Returns the installed validation chain, if any.
    #[must_use]
    pub fn middleware(&self) -> Option<&ValidationChain> {
        self.middleware.as_ref()
    }

    /// Returns the installed dispatch chain, if any.
    #[must_use]
    pub fn handlers(&self) -> Option<&DispatchChain> {
        self.handlers.as_ref()
    }

    /// Runs the request through both chains.
    pub fn handle(&self) -> Report {
        let mut ctx = RunContext::new();
        let run_id = ctx.run_id();
        let span = tracing::info_span!("run", run_id = %run_id);
        let _guard = span.enter();

        tollgate_telemetry::log_run_start!(run_id, self.request);

        let outcome = self.run(&mut ctx);

        let duration_us = u64::try_from(ctx.elapsed().as_micros()).unwrap_or(u64::MAX);
        tollgate_telemetry::log_run_complete!(run_id, outcome, duration_us);

        Report {
            run_id,
            outcome,
            diagnostics: ctx.into_diagnostics(),
        }
    }

    fn run(&self, ctx: &mut RunContext) -> Outcome {
        if let Some(chain) = &self.middleware {
            if !chain.run(ctx, &self.request) {
                ctx.emit(Diagnostic::Rejected);
                return Outcome::Rejected;
            }
        }

        if let Some(chain) = &self.handlers {
            if let Dispatch::Handled { handler } = chain.run(ctx, &self.request) {
                return Outcome::Handled { handler };
            }
        } else {
            tracing::debug!(run_id = %ctx.run_id(), "No handlers installed");
        }

        ctx.emit(Diagnostic::Unhandled);
        Outcome::Unhandled
    }
}

/// Builds an [`Application`] from step names.
///
/// Names are resolved against a [`StepRegistry`] when [`build`] is called;
/// nothing runs until every name resolves.
///
/// [`build`]: ApplicationBuilder::build
#[derive(Debug)]
pub struct ApplicationBuilder {
    request: Request,
    registry: StepRegistry,
    middleware: Vec<String>,
    handlers: Vec<String>,
}

impl ApplicationBuilder {
    /// Creates a builder using the standard registry and no chains.
    #[must_use]
    pub fn new(request: Request) -> Self {
        Self {
            request,
            registry: StepRegistry::standard(),
            middleware: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Replaces the registry names are resolved against.
    #[must_use]
    pub fn registry(mut self, registry: StepRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the validation chain, in order.
    #[must_use]
    pub fn middleware_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.middleware = names.into_iter().map(|n| n.as_ref().to_string()).collect();
        self
    }

    /// Sets the dispatch chain, in order.
    #[must_use]
    pub fn handler_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.handlers = names.into_iter().map(|n| n.as_ref().to_string()).collect();
        self
    }

    /// Resolves every name and assembles the application.
    ///
    /// # Errors
    ///
    /// Returns `TollgateError::Configuration` for the first name that is
    /// unknown or belongs to the other chain. The middleware list is checked
    /// before the handler list.
    pub fn build(self) -> TollgateResult<Application> {
        let middleware = self
            .middleware
            .iter()
            .map(|name| self.registry.middleware(name))
            .collect::<TollgateResult<Vec<_>>>()?;

        let handlers = self
            .handlers
            .iter()
            .map(|name| self.registry.handler(name))
            .collect::<TollgateResult<Vec<_>>>()?;

        tracing::debug!(
            middleware = ?self.middleware,
            handlers = ?self.handlers,
            "Chains assembled"
        );

        let mut app = Application::new(self.request);
        app.add_middleware(middleware).add_handlers(handlers);
        Ok(app)
    }
}
