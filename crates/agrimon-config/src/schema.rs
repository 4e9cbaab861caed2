//! Configuration schema definitions using serde.
//!
//! Every section carries `#[serde(default)]` so a config file only has to name
//! the values it changes.

use agrimon_common::{FilterOption, LoggingConfig};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main configuration structure for agrimon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Analytics API connection.
    #[validate]
    pub api: ApiSettings,
    /// Chart geometry and colors.
    #[validate]
    pub chart: ChartSettings,
    /// Spreadsheet preview limits.
    #[validate]
    pub preview: PreviewSettings,
    /// Filter option lists handed to the views.
    pub filters: FilterDefaults,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Analytics API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL the `/api/...` paths are resolved against.
    #[validate(url(message = "API base URL must be a valid URL"))]
    pub base_url: String,
    /// Request timeout in seconds; no timeout when absent.
    #[validate(range(min = 1, max = 600, message = "Timeout must be between 1 and 600 seconds"))]
    pub timeout_secs: Option<u64>,
    /// Connection pool max idle connections per host.
    pub max_idle_per_host: usize,
}

/// Drawing rectangle for line charts, in SVG pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "crate::validation::validate_viewport"))]
pub struct ViewportSettings {
    /// Left edge of the plot area.
    pub x_start: f64,
    /// Right edge of the plot area.
    pub x_end: f64,
    /// Top edge of the plot area.
    pub y_start: f64,
    /// Bottom edge of the plot area.
    pub y_end: f64,
}

/// Chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartSettings {
    /// SVG canvas width.
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,
    /// SVG canvas height.
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,
    /// Plot area inside the canvas.
    #[validate]
    pub viewport: ViewportSettings,
    /// Series and decoration colors.
    #[validate]
    pub colors: ChartColors,
    /// Production group colors, used by the map and the status cards.
    #[validate]
    pub groups: GroupColors,
    /// Dashboard status card badge colors.
    #[validate]
    pub status: StatusCardColors,
}

/// Price chart colors, as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartColors {
    /// Minimum price line.
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Color must be a #rrggbb hex value"))]
    pub min: String,
    /// Average price line.
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Color must be a #rrggbb hex value"))]
    pub avg: String,
    /// Maximum price line.
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Color must be a #rrggbb hex value"))]
    pub max: String,
    /// Axis lines.
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Color must be a #rrggbb hex value"))]
    pub axis: String,
    /// Axis labels.
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Color must be a #rrggbb hex value"))]
    pub text: String,
}

/// Production group colors, as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GroupColors {
    /// "Tinggi" group.
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Color must be a #rrggbb hex value"))]
    pub tinggi: String,
    /// "Sedang" group.
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Color must be a #rrggbb hex value"))]
    pub sedang: String,
    /// "Rendah" group.
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Color must be a #rrggbb hex value"))]
    pub rendah: String,
    /// Regions without data.
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Color must be a #rrggbb hex value"))]
    pub unknown: String,
}

/// Status card badge colors, as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StatusCardColors {
    /// "Banyak" card (high group).
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Color must be a #rrggbb hex value"))]
    pub banyak: String,
    /// "Sedang" card (middle group).
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Color must be a #rrggbb hex value"))]
    pub sedang: String,
    /// "Sedikit" card (low group).
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Color must be a #rrggbb hex value"))]
    pub sedikit: String,
}

/// Spreadsheet preview configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PreviewSettings {
    /// Maximum number of data rows kept in a preview.
    #[validate(range(min = 1, max = 1000, message = "Preview rows must be between 1 and 1000"))]
    pub max_rows: usize,
    /// Largest accepted upload, in bytes.
    #[validate(range(min = 1, message = "Maximum file size must be positive"))]
    pub max_file_size_bytes: u64,
    /// Accepted file extensions, lowercase, with the leading dot.
    #[validate(length(min = 1, message = "At least one file extension must be accepted"))]
    pub accepted_extensions: Vec<String>,
    /// Row layout of merged-header production sheets.
    #[validate]
    pub merged: MergedHeaderSettings,
}

/// Row layout of merged-header sheets, 1-indexed as shown in a spreadsheet app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "crate::validation::validate_header_rows"))]
pub struct MergedHeaderSettings {
    /// Row holding the group headers (e.g. "HASIL PRODUKSI").
    #[validate(range(min = 1, message = "Header rows are numbered from 1"))]
    pub group_row: u32,
    /// Row holding the sub headers (e.g. month names).
    pub sub_row: u32,
    /// First data row.
    pub data_start_row: u32,
}

/// Filter option lists and initial selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FilterDefaults {
    /// Commodities offered for price analysis.
    pub commodities: Vec<FilterOption>,
    /// Commodities offered for production import and grouping.
    pub production_commodities: Vec<FilterOption>,
    /// Years offered in every year filter.
    pub years: Vec<FilterOption>,
    /// Price types (producer / consumer).
    pub price_types: Vec<FilterOption>,
    /// Sub-district filter choices.
    pub regions: Vec<FilterOption>,
    /// Commodity selected when the dashboard opens.
    pub default_commodity: String,
    /// Production commodity selected when the dashboard opens.
    pub default_production_commodity: String,
    /// Year selected when the dashboard opens.
    pub default_year: i32,
    /// Price type selected when the dashboard opens.
    pub default_price_type: String,
}
