//! # Agrimon
//!
//! Command line front end for the agricultural monitoring dashboard:
//! spreadsheet previews, uploads, price fluctuation charts and production
//! grouping, all backed by the remote analytics API.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod error;

pub use app::App;
pub use cli::{Cli, Command, UploadKind};
pub use error::{AppError, AppResult};
