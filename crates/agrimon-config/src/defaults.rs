//! Default values for every configuration section.

use crate::schema::*;
use agrimon_common::{FilterOption, LoggingConfig};

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            chart: ChartSettings::default(),
            preview: PreviewSettings::default(),
            filters: FilterDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: None,
            max_idle_per_host: 10,
        }
    }
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            x_start: 50.0,
            x_end: 550.0,
            y_start: 50.0,
            y_end: 250.0,
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 300,
            viewport: ViewportSettings::default(),
            colors: ChartColors::default(),
            groups: GroupColors::default(),
            status: StatusCardColors::default(),
        }
    }
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            min: "#3b82f6".to_string(),
            avg: "#10b981".to_string(),
            max: "#f97316".to_string(),
            axis: "#9ca3af".to_string(),
            text: "#6b7280".to_string(),
        }
    }
}

impl Default for GroupColors {
    fn default() -> Self {
        Self {
            tinggi: "#0d4a2b".to_string(),
            sedang: "#1a6b3f".to_string(),
            rendah: "#2d8f5a".to_string(),
            unknown: "#cccccc".to_string(),
        }
    }
}

impl Default for StatusCardColors {
    fn default() -> Self {
        Self {
            banyak: "#2c5f6f".to_string(),
            sedang: "#4a9d7f".to_string(),
            sedikit: "#a8d5ba".to_string(),
        }
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            max_rows: 10,
            max_file_size_bytes: 10 * 1024 * 1024,
            accepted_extensions: vec![".xlsx".to_string(), ".xls".to_string(), ".csv".to_string()],
            merged: MergedHeaderSettings::default(),
        }
    }
}

impl Default for MergedHeaderSettings {
    fn default() -> Self {
        Self {
            group_row: 4,
            sub_row: 5,
            data_start_row: 6,
        }
    }
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            commodities: vec![
                FilterOption::plain("Beras Medium"),
                FilterOption::plain("Beras Premium"),
            ],
            production_commodities: vec![
                FilterOption::new("padi", "Padi"),
                FilterOption::new("jagung", "Jagung"),
                FilterOption::new("kedelai", "Kedelai"),
            ],
            years: ["2025", "2024", "2023", "2022"]
                .into_iter()
                .map(FilterOption::plain)
                .collect(),
            price_types: vec![
                FilterOption::new("produsen", "Produsen"),
                FilterOption::new("konsumen", "Konsumen"),
            ],
            regions: vec![FilterOption::plain("Semua Kecamatan")],
            default_commodity: "Beras Medium".to_string(),
            default_production_commodity: "PADI".to_string(),
            default_year: 2025,
            default_price_type: "konsumen".to_string(),
        }
    }
}
