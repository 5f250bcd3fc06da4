//! Standard validation steps.
//!
//! Each step checks one field of the request:
//!
//! | Step      | Field     | Passes when                         |
//! |-----------|-----------|-------------------------------------|
//! | `age`     | `age`     | numeric value strictly above 20     |
//! | `country` | `country` | exactly `"Poland"`                  |
//! | `name`    | `name`    | exactly `"John"`                    |

pub mod age;
pub mod country;
pub mod name;

pub use age::AgeCheck;
pub use country::CountryCheck;
pub use name::NameCheck;

use crate::chain::BoxedMiddleware;
use std::sync::Arc;

/// Names of the standard steps, in their reference order.
pub const STANDARD: [&str; 3] = [age::NAME, country::NAME, name::NAME];

/// Looks up a standard step by name.
///
/// Returns `None` for names that are not validation steps.
#[must_use]
pub fn lookup(step: &str) -> Option<BoxedMiddleware> {
    match step {
        age::NAME => Some(Arc::new(AgeCheck::new())),
        country::NAME => Some(Arc::new(CountryCheck::new())),
        name::NAME => Some(Arc::new(NameCheck::new())),
        _ => None,
    }
}
