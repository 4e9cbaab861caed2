//! # Agrimon Charts
//!
//! Turns analytics results into render-ready chart data: a shared linear
//! scale for SVG line charts, the monthly price fluctuation chart, and
//! per-region styling for the production map and status counters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod mapper;
pub mod price_chart;
pub mod production_map;
pub mod svg;

pub use mapper::{format_coord, map_series, series_path, Point, ValueScale, Viewport};
pub use price_chart::{AxisLabel, ChartSeries, LegendEntry, PriceChart};
pub use production_map::{
    normalize_kecamatan_name, popup_text, ProductionGroup, ProductionMap, RegionStyle, StatusCard,
    StatusCounts, NO_DATA_TEXT,
};
