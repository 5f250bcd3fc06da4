//! Standard payment handlers.
//!
//! Both handlers read the `payment` field and terminate the run when they
//! fire.

pub mod qiwi;
pub mod sberbank;

pub use qiwi::QiwiHandler;
pub use sberbank::SberbankHandler;

use crate::chain::BoxedHandler;
use std::sync::Arc;

/// The request field payment handlers match on.
pub const PAYMENT_FIELD: &str = "payment";

/// Names of the standard handlers, in their reference order.
pub const STANDARD: [&str; 2] = [qiwi::NAME, sberbank::NAME];

/// Looks up a standard handler by name.
///
/// Returns `None` for names that are not dispatch steps.
#[must_use]
pub fn lookup(step: &str) -> Option<BoxedHandler> {
    match step {
        qiwi::NAME => Some(Arc::new(QiwiHandler::new())),
        sberbank::NAME => Some(Arc::new(SberbankHandler::new())),
        _ => None,
    }
}
