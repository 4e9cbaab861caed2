//! Monthly price fluctuation chart.

use crate::mapper::{map_with_scale, points_to_path, x_for, Point, ValueScale, Viewport};
use crate::svg::SvgDocument;
use agrimon_common::{
    format_grouped, format_rupiah, Month, OverallPriceStat, PriceFluctuation, Trend,
};
use agrimon_config::ChartSettings;
use serde::Serialize;
use tracing::debug;

/// One drawn line of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Legend label.
    pub label: &'static str,
    /// Stroke color.
    pub color: String,
    /// Raw values in month order.
    pub values: Vec<f64>,
    /// Mapped pixel positions.
    pub points: Vec<Point>,
    /// SVG path data.
    pub path: String,
}

/// Label placed under the x axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    /// Pixel position along the axis.
    pub position: f64,
    /// Text.
    pub text: String,
}

/// Legend swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    /// Text next to the swatch.
    pub label: String,
    /// Swatch color.
    pub color: String,
}

/// Render-ready price chart for one commodity, year and price type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceChart {
    /// Chart heading.
    pub title: String,
    /// Min, average and max lines.
    pub series: Vec<ChartSeries>,
    /// Month abbreviations along the x axis.
    pub month_labels: Vec<AxisLabel>,
    /// Price labels along the y axis, bottom to top.
    pub y_ticks: Vec<AxisLabel>,
    /// Direction reported by the backend.
    pub trend: Trend,
    /// Year summary.
    pub overall: OverallPriceStat,
    #[serde(skip)]
    settings: ChartSettings,
}

const SERIES_LABELS: [&str; 3] = ["Harga Minimum", "Harga Rata-rata", "Harga Maksimum"];

impl PriceChart {
    /// Build the chart from an analysis result.
    pub fn new(data: &PriceFluctuation, settings: &ChartSettings) -> Self {
        let viewport = Viewport::from(&settings.viewport);

        let mut months: Vec<_> = data.statistik_bulanan.iter().collect();
        months.sort_by_key(|m| m.bulan);
        let (min, avg, max) = data.series();

        let all: [&[f64]; 3] = [&min, &avg, &max];
        let scale = ValueScale::from_series(all);

        let colors = [
            settings.colors.min.clone(),
            settings.colors.avg.clone(),
            settings.colors.max.clone(),
        ];
        let series = SERIES_LABELS
            .into_iter()
            .zip(colors)
            .zip([min, avg, max])
            .map(|((label, color), values)| {
                let points = scale
                    .map(|scale| map_with_scale(&values, &scale, &viewport))
                    .unwrap_or_default();
                let path = points_to_path(&points);
                ChartSeries {
                    label,
                    color,
                    values,
                    points,
                    path,
                }
            })
            .collect();

        let month_labels = months
            .iter()
            .enumerate()
            .map(|(index, stat)| AxisLabel {
                position: x_for(index, months.len(), &viewport),
                text: Month::new(stat.bulan).map_or_else(
                    |_| stat.nama_bulan.chars().take(3).collect(),
                    |month| month.abbr().to_string(),
                ),
            })
            .collect();

        let y_ticks = scale
            .map(|scale| {
                [
                    (viewport.y_end, scale.bottom()),
                    (viewport.center_y(), scale.mid()),
                    (viewport.y_start, scale.top()),
                ]
                .into_iter()
                .map(|(position, value)| AxisLabel {
                    position,
                    text: format_grouped(value, 0),
                })
                .collect()
            })
            .unwrap_or_default();

        debug!(
            komoditas = %data.komoditas,
            tahun = data.tahun,
            months = months.len(),
            "Built price chart"
        );

        Self {
            title: format!("Fluktuasi Harga {} {}", data.komoditas, data.tahun),
            series,
            month_labels,
            y_ticks,
            trend: data.tren,
            overall: data.statistik_keseluruhan.clone(),
            settings: settings.clone(),
        }
    }

    /// True when there is no month to draw.
    pub fn is_empty(&self) -> bool {
        self.month_labels.is_empty()
    }

    /// Legend swatches in drawing order.
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.series
            .iter()
            .map(|series| LegendEntry {
                label: series.label.to_string(),
                color: series.color.clone(),
            })
            .collect()
    }

    /// Summary line shown under the chart.
    pub fn summary(&self) -> String {
        format!(
            "Tren: {} | Min {} | Rata-rata {} | Max {} | Fluktuasi {:.2}%",
            self.trend,
            format_rupiah(self.overall.harga_min),
            format_rupiah(self.overall.harga_rata_rata),
            format_rupiah(self.overall.harga_max),
            self.overall.fluktuasi_rata_rata,
        )
    }

    /// Standalone SVG document.
    pub fn to_svg(&self) -> String {
        let settings = &self.settings;
        let viewport = Viewport::from(&settings.viewport);
        let colors = &settings.colors;
        let mut doc = SvgDocument::new(settings.width, settings.height);

        let (left, right) = (viewport.x_start, viewport.x_end);
        let (top, bottom) = (viewport.y_start, viewport.y_end);
        doc.line(left, bottom, right, bottom, &colors.axis);
        doc.line(left, top, left, bottom, &colors.axis);

        for series in self.series.iter().filter(|s| !s.path.is_empty()) {
            doc.path(&series.path, &series.color);
        }

        let label_y = viewport.y_end + 16.0;
        for label in &self.month_labels {
            doc.text(label.position, label_y, "middle", &colors.text, &label.text);
        }
        for tick in &self.y_ticks {
            doc.text(viewport.x_start - 6.0, tick.position + 4.0, "end", &colors.text, &tick.text);
        }

        let center_x = viewport.x_start + viewport.width() / 2.0;
        doc.text(center_x, f64::from(settings.height) - 4.0, "middle", &colors.text, "Bulan");
        doc.text(center_x, 20.0, "middle", &colors.text, &self.title);

        let mut legend_x = viewport.x_start;
        for entry in self.legend() {
            doc.swatch(legend_x, 30.0, &entry.color);
            doc.text(legend_x + 20.0, 34.0, "start", &colors.text, &entry.label);
            legend_x += 130.0;
        }

        doc.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrimon_common::test_utils::{api_fixtures, assert_approx_eq};

    fn fixture() -> PriceFluctuation {
        let value: serde_json::Value =
            serde_json::from_str(api_fixtures::price_fluctuation_json()).unwrap();
        serde_json::from_value(value["data"].clone()).unwrap()
    }

    #[test]
    fn test_series_share_one_scale() {
        let chart = PriceChart::new(&fixture(), &ChartSettings::default());
        assert_eq!(chart.series.len(), 3);

        // the overall minimum (12000) sits on the bottom edge, the maximum (13600) on the top
        assert_approx_eq(chart.series[0].points[0].y, 250.0, 1e-9);
        assert_approx_eq(chart.series[2].points[1].y, 50.0, 1e-9);
    }

    #[test]
    fn test_month_labels() {
        let chart = PriceChart::new(&fixture(), &ChartSettings::default());
        let labels: Vec<_> = chart.month_labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(labels, vec!["Jan", "Feb", "Mar"]);
        assert_approx_eq(chart.month_labels[0].position, 50.0, 1e-9);
        assert_approx_eq(chart.month_labels[2].position, 550.0, 1e-9);
    }

    #[test]
    fn test_y_ticks_follow_scale() {
        let chart = PriceChart::new(&fixture(), &ChartSettings::default());
        let ticks: Vec<_> = chart.y_ticks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(ticks, vec!["12.000", "12.800", "13.600"]);
    }

    #[test]
    fn test_legend_uses_configured_colors() {
        let mut settings = ChartSettings::default();
        settings.colors.avg = "#000000".to_string();
        let chart = PriceChart::new(&fixture(), &settings);
        let legend = chart.legend();
        assert_eq!(legend[1].label, "Harga Rata-rata");
        assert_eq!(legend[1].color, "#000000");
    }

    #[test]
    fn test_empty_data_renders_axes_only() {
        let data: PriceFluctuation = serde_json::from_str(r#"{"komoditas": "Cabai"}"#).unwrap();
        let chart = PriceChart::new(&data, &ChartSettings::default());
        assert!(chart.is_empty());
        assert!(chart.y_ticks.is_empty());
        let svg = chart.to_svg();
        assert!(!svg.contains("<path"));
        assert!(svg.contains("<line"));
    }

    #[test]
    fn test_svg_document() {
        let chart = PriceChart::new(&fixture(), &ChartSettings::default());
        let svg = chart.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 600 300""#));
        assert_eq!(svg.matches("<path").count(), 3);
        assert!(svg.contains(&chart.series[1].path));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_summary() {
        let chart = PriceChart::new(&fixture(), &ChartSettings::default());
        assert_eq!(
            chart.summary(),
            "Tren: Naik | Min Rp 12.000 | Rata-rata Rp 12.667 | Max Rp 13.600 | Fluktuasi 8.93%"
        );
    }
}
