//! # Agrimon Views
//!
//! View state for the dashboard and the import pages.
//!
//! Views hold form state, call the analytics API through
//! [`agrimon_client::AnalyticsApi`], and turn every response into
//! render-ready state or a message for the operator. Requests are tagged
//! with tickets so a slow response can never overwrite a newer one.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod dashboard;
pub mod import;
pub mod panels;
pub mod sequence;

pub use dashboard::{DashboardFilters, DashboardView, FilterOptions};
pub use import::{
    FileRules, ImportError, ImportForm, ImportPriceView, ImportProductionView, PRICE_SUCCESS,
    PRODUCTION_SUCCESS, UPLOAD_FALLBACK,
};
pub use panels::{PanelState, PendingRequest, PricePanel, ProductionDisplay, ProductionPanel};
pub use sequence::{RequestSequencer, Ticket};
