//! # Agrimon Config
//!
//! Configuration schema, loading, validation and caching for agrimon.
//!
//! Files may be TOML or YAML. Every value has a default, `AGRIMON_*`
//! environment variables override the file, and the result is validated
//! before anything else sees it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cache::ConfigCache;
pub use loader::{ConfigError, ConfigFormat, ConfigLoader, CONFIG_PATH_VAR, DEFAULT_CONFIG_FILES};
pub use schema::*;
