//! # Agrimon Client
//!
//! Async HTTP client for the remote analytics backend: price fluctuation and
//! production grouping analyses, metadata option lists, and spreadsheet
//! uploads.
//!
//! Views depend on the [`AnalyticsApi`] trait; [`AnalyticsClient`] is the
//! reqwest implementation. With the `testing` feature a `MockAnalyticsApi`
//! is generated as well.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod client;
pub mod config;
pub mod envelope;

#[cfg(any(test, feature = "testing"))]
pub use api::MockAnalyticsApi;
pub use api::{
    AnalyticsApi, MetadataKind, PriceQuery, ProductionQuery, ProductionUpload, UploadFile,
    UploadReceipt,
};
pub use client::AnalyticsClient;
pub use config::ApiConfig;
pub use envelope::{decode_payload, decode_receipt, ApiEnvelope};
