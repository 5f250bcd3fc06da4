//! # Tollgate Dispatch
//!
//! The dispatch chain: an ordered list of `(predicate, action)` steps.
//!
//! ## Chain Semantics
//!
//! ```text
//! Request → QIWI? ──no──→ Sberbank? ──no──→ Exhausted
//!             │yes             │yes
//!             ↓                ↓
//!          act → Break      act → Break
//! ```
//!
//! - Steps are tried in the order they were added.
//! - A step's action runs only when its predicate matches.
//! - An action that returns [`ControlFlow::Break`](std::ops::ControlFlow::Break)
//!   ends the walk at once. The standard handlers always break, so the first
//!   matching handler wins and later handlers with overlapping predicates are
//!   never reached.
//!
//! ## Example
//!
//! ```
//! use tollgate_core::{Request, RunContext};
//! use tollgate_dispatch::{Dispatch, DispatchChain, handlers::{QiwiHandler, SberbankHandler}};
//!
//! let chain = DispatchChain::builder()
//!     .add(QiwiHandler::new())
//!     .add(SberbankHandler::new())
//!     .build();
//!
//! let mut ctx = RunContext::new();
//! assert_eq!(chain.run(&mut ctx, &Request::sample()), Dispatch::Handled { handler: "qiwi" });
//! ```

#![doc(html_root_url = "https://docs.rs/tollgate-dispatch/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chain;
pub mod handler;
pub mod handlers;

pub use chain::{BoxedHandler, Dispatch, DispatchChain, DispatchChainBuilder};
pub use handler::{FnHandler, Handler};
