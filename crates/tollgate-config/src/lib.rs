//! # Tollgate Config
//!
//! Typed layered configuration for Tollgate.
//!
//! Configuration is loaded in layers, later layers overriding earlier ones:
//!
//! 1. Defaults (the reference request and the standard wiring)
//! 2. A TOML or JSON file
//! 3. Environment variables
//!
//! Unknown fields in a file are rejected rather than ignored.
//!
//! ## Example File
//!
//! ```toml
//! [request]
//! name = "John"
//! country = "Poland"
//! age = "25"
//! payment = "QIWI"
//!
//! [pipeline]
//! middleware = ["age", "country", "name"]
//! handlers = ["qiwi", "sberbank"]
//!
//! [logging]
//! level = "warn"
//! format = "json"
//! ```
//!
//! ## Environment Overrides
//!
//! With prefix `TOLLGATE`, keys take the form `TOLLGATE__SECTION__KEY`:
//!
//! - `TOLLGATE__REQUEST__AGE=18` sets (or adds) the `age` field
//! - `TOLLGATE__PIPELINE__HANDLERS=sberbank,qiwi` rewires the handlers chain;
//!   an empty value installs no chain
//! - `TOLLGATE__LOGGING__LEVEL=debug` (or a filter directive such as
//!   `tollgate_middleware=debug,warn`)
//!
//! ## Usage
//!
//! ```no_run
//! use tollgate_config::ConfigLoader;
//!
//! # fn main() -> Result<(), tollgate_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_optional_file("tollgate.toml")?
//!     .with_env_prefix("TOLLGATE")
//!     .load()?;
//!
//! println!("request: {}", config.request);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::{TollgateConfig, TollgateConfigBuilder};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{LogFormat, LoggingConfig, PipelineConfig};
