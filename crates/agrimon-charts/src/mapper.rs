//! Linear scaling of numeric series onto an SVG viewport.
//!
//! All series drawn on one chart share a single value scale, so a price of
//! 12 000 lands on the same pixel row whichever line it belongs to. SVG y
//! grows downward: larger values get smaller y.

use agrimon_config::ViewportSettings;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Drawing rectangle in SVG pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge.
    pub x_start: f64,
    /// Right edge.
    pub x_end: f64,
    /// Top edge.
    pub y_start: f64,
    /// Bottom edge.
    pub y_end: f64,
}

impl Viewport {
    /// Create a viewport from its edges.
    pub const fn new(x_start: f64, x_end: f64, y_start: f64, y_end: f64) -> Self {
        Self {
            x_start,
            x_end,
            y_start,
            y_end,
        }
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.x_end - self.x_start
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.y_end - self.y_start
    }

    /// Vertical center line.
    pub fn center_y(&self) -> f64 {
        self.y_start + self.height() / 2.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(50.0, 550.0, 50.0, 250.0)
    }
}

impl From<&ViewportSettings> for Viewport {
    fn from(settings: &ViewportSettings) -> Self {
        Self::new(
            settings.x_start,
            settings.x_end,
            settings.y_start,
            settings.y_end,
        )
    }
}

/// A mapped pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal pixel coordinate.
    pub x: f64,
    /// Vertical pixel coordinate.
    pub y: f64,
}

/// Value range shared by every series of one chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    min: f64,
    max: f64,
    range: f64,
}

impl ValueScale {
    /// Build the scale from the union of all finite values.
    ///
    /// A zero range is padded to 10% of `|max|` (or 100 when `max` is 0), and a
    /// range below 1% of `|max|` is widened to 10% of it, so nearly flat data
    /// does not blow up into a full-height zigzag.
    pub fn from_series<'a, I>(series: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a [f64]>,
    {
        let mut bounds: Option<(f64, f64)> = None;
        for value in series.into_iter().flatten().copied().filter(|v| v.is_finite()) {
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(value), hi.max(value)),
                None => (value, value),
            });
        }
        let (min, max) = bounds?;

        let mut range = max - min;
        if range == 0.0 {
            range = if max == 0.0 { 100.0 } else { max.abs() * 0.1 };
        }
        if range < max.abs() * 0.01 {
            range = max.abs() * 0.1;
        }

        Some(Self { min, max, range })
    }

    /// Smallest value seen.
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Largest value seen.
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Effective (possibly padded) range.
    pub const fn range(&self) -> f64 {
        self.range
    }

    /// Midpoint of the data, drawn on the viewport's center line.
    pub fn mid(&self) -> f64 {
        (self.max + self.min) / 2.0
    }

    /// Value drawn at the top edge of the viewport.
    pub fn top(&self) -> f64 {
        self.mid() + self.range / 2.0
    }

    /// Value drawn at the bottom edge of the viewport.
    pub fn bottom(&self) -> f64 {
        self.mid() - self.range / 2.0
    }

    /// Pixel row for `value`.
    pub fn y_for(&self, value: f64, viewport: &Viewport) -> f64 {
        let height = viewport.height();
        viewport.center_y() - ((value - self.mid()) / self.range * height)
    }
}

/// Pixel column of point `index` out of `len` evenly spaced points.
pub fn x_for(index: usize, len: usize, viewport: &Viewport) -> f64 {
    let divisor = if len <= 1 { 1.0 } else { (len - 1) as f64 };
    viewport.x_start + index as f64 * (viewport.width() / divisor)
}

/// Map `series` to pixel positions using the scale of `all_series`.
///
/// `series` is normally one of `all_series`. When `all_series` holds no finite
/// value the scale comes from `series` alone.
pub fn map_series(series: &[f64], all_series: &[&[f64]], viewport: &Viewport) -> Vec<Point> {
    if series.is_empty() {
        return Vec::new();
    }
    let Some(scale) = ValueScale::from_series(all_series.iter().copied())
        .or_else(|| ValueScale::from_series([series]))
    else {
        return Vec::new();
    };
    map_with_scale(series, &scale, viewport)
}

/// Map `series` with an already computed scale.
pub fn map_with_scale(series: &[f64], scale: &ValueScale, viewport: &Viewport) -> Vec<Point> {
    series
        .iter()
        .enumerate()
        .map(|(index, &value)| Point {
            x: x_for(index, series.len(), viewport),
            y: scale.y_for(value, viewport),
        })
        .collect()
}

/// SVG path data (`M x y L x y ...`) for `series`; empty for an empty series.
pub fn series_path(series: &[f64], all_series: &[&[f64]], viewport: &Viewport) -> String {
    points_to_path(&map_series(series, all_series, viewport))
}

/// SVG path data for already mapped points.
pub fn points_to_path(points: &[Point]) -> String {
    let mut path = String::new();
    for (index, point) in points.iter().enumerate() {
        if index > 0 {
            path.push(' ');
        }
        let command = if index == 0 { 'M' } else { 'L' };
        let _ = write!(
            path,
            "{command} {} {}",
            format_coord(point.x),
            format_coord(point.y)
        );
    }
    path
}

/// Format a coordinate with at most two decimals and no trailing zeros.
pub fn format_coord(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
