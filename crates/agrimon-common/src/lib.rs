//! # Agrimon Common
//!
//! Shared error type, domain types, API payload models, logging and formatting helpers for agrimon.
//!
//! This crate provides the foundational types and utilities used across
//! all other crates in the agrimon workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod models;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{AgriError, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingGuard};
pub use models::{
    KecamatanData, MonthlyPriceStat, OverallPriceStat, PriceFluctuation, ProductionGrouping, Trend,
};
pub use types::*;
pub use utils::*;
