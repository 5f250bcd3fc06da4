//! # Tollgate Middleware
//!
//! The validation chain: an ordered list of independent checks that all
//! have to accept a request before it may reach a handler.
//!
//! ## Chain Semantics
//!
//! ```text
//! Request → Age → Country → Name → (pass)
//!              ↓        ↓       ↓
//!           (fail)   (fail)  (fail)
//! ```
//!
//! - Steps run in the order they were added.
//! - The first failing step ends the run; later steps are never evaluated.
//! - Every evaluated step emits exactly one pass/fail [`Diagnostic`](tollgate_core::Diagnostic).
//! - An empty chain accepts every request.
//!
//! ## Example
//!
//! ```
//! use tollgate_core::{Request, RunContext};
//! use tollgate_middleware::{ValidationChain, stages::{AgeCheck, CountryCheck, NameCheck}};
//!
//! let chain = ValidationChain::builder()
//!     .add(AgeCheck::new())
//!     .add(CountryCheck::new())
//!     .add(NameCheck::new())
//!     .build();
//!
//! let mut ctx = RunContext::new();
//! assert!(chain.run(&mut ctx, &Request::sample()));
//! assert_eq!(ctx.diagnostics().len(), 3);
//! ```

#![doc(html_root_url = "https://docs.rs/tollgate-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chain;
pub mod middleware;
pub mod stages;

// Re-export main types at crate root
pub use chain::{BoxedMiddleware, ValidationChain, ValidationChainBuilder};
pub use middleware::{FnMiddleware, Middleware};
