//! # Tollgate Core
//!
//! Core types shared by the Tollgate chains.
//!
//! This crate provides the foundational types used throughout Tollgate:
//!
//! - [`Request`] - The immutable field map every step reads
//! - [`RunId`] - UUID v7 identifier for one orchestrated run
//! - [`RunContext`] - Per-run state carrying the run ID and emitted diagnostics
//! - [`Diagnostic`] - The observable events a run produces
//! - [`TollgateError`] - Standard error type

#![doc(html_root_url = "https://docs.rs/tollgate-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod diagnostic;
mod error;
mod request;

pub use context::{RunContext, RunId};
pub use diagnostic::Diagnostic;
pub use error::{ChainKind, TollgateError, TollgateResult};
pub use request::Request;
