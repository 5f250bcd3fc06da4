//! # Tollgate
//!
//! **Validation and dispatch chains over a single request**
//!
//! Tollgate runs one request record through two ordered chains:
//!
//! - **Middleware** – independent checks; the first failure rejects the request
//! - **Handlers** – (predicate, action) pairs; the first handler that fires
//!   terminates the run
//!
//! ## Quick Start
//!
//! ```
//! use tollgate::prelude::*;
//!
//! let app = Application::builder(Request::sample())
//!     .middleware_names(["age", "country", "name"])
//!     .handler_names(["qiwi", "sberbank"])
//!     .build()?;
//!
//! for line in app.handle().lines() {
//!     println!("{line}");
//! }
//! # Ok::<(), TollgateError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Request → Age → Country → Name → QIWI → Sberbank → "no handler found"
//!            └──────┴────────┴──→ "did not reach a handler"
//! ```
//!
//! Steps are wired by name through the [`StepRegistry`]. A name that is
//! unknown, or that belongs to the other chain, is a configuration error
//! raised before anything runs.

#![doc(html_root_url = "https://docs.rs/tollgate/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod application;
mod registry;

pub use application::{Application, ApplicationBuilder, Outcome, Report, CONFIG_ERROR_EXIT};
pub use registry::StepRegistry;

// Re-export core types
pub use tollgate_core as core;

// Re-export middleware types
pub use tollgate_middleware as middleware;

// Re-export dispatch types
pub use tollgate_dispatch as dispatch;

// Re-export configuration types
pub use tollgate_config as config;

// Re-export telemetry types
pub use tollgate_telemetry as telemetry;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```
/// use tollgate::prelude::*;
///
/// let report = Application::new(Request::sample()).handle();
/// assert_eq!(report.outcome, Outcome::Unhandled);
/// ```
pub mod prelude {
    pub use crate::{Application, Outcome, Report, StepRegistry};

    pub use tollgate_core::{
        ChainKind, Diagnostic, Request, RunContext, RunId, TollgateError, TollgateResult,
    };

    pub use tollgate_middleware::{FnMiddleware, Middleware, ValidationChain};

    pub use tollgate_dispatch::{Dispatch, DispatchChain, FnHandler, Handler};
}
