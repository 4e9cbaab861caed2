//! Payloads returned by the analytics API.
//!
//! Only identifying fields are required. Everything else defaults, since the
//! backend omits statistics it could not compute.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Price direction reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Prices went up.
    Naik,
    /// Prices went down.
    Turun,
    /// Prices stayed flat.
    Stabil,
    /// Missing or unrecognized value.
    #[default]
    #[serde(other)]
    Unknown,
}

impl Trend {
    /// Label shown next to the chart.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Naik => "Naik",
            Self::Turun => "Turun",
            Self::Stabil => "Stabil",
            Self::Unknown => "-",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Price statistics for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPriceStat {
    /// Month number, 1-12.
    pub bulan: u32,
    /// Month name as sent by the backend.
    #[serde(default)]
    pub nama_bulan: String,
    /// Lowest price.
    #[serde(default)]
    pub harga_min: f64,
    /// Average price.
    #[serde(default)]
    pub harga_rata_rata: f64,
    /// Highest price.
    #[serde(default)]
    pub harga_max: f64,
    /// Spread between min and max, in percent.
    #[serde(default)]
    pub fluktuasi_persen: f64,
}

/// Statistics over the whole year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverallPriceStat {
    /// Lowest price of the year.
    pub harga_min: f64,
    /// Highest price of the year.
    pub harga_max: f64,
    /// Average price of the year.
    pub harga_rata_rata: f64,
    /// Mean monthly fluctuation, in percent.
    pub fluktuasi_rata_rata: f64,
}

/// Result of `/api/analyze/fluktuasi-harga`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceFluctuation {
    /// Commodity name.
    pub komoditas: String,
    /// Year analysed.
    #[serde(default)]
    pub tahun: i32,
    /// Producer or consumer price.
    #[serde(default)]
    pub tipe_harga: String,
    /// One entry per month with data.
    #[serde(default)]
    pub statistik_bulanan: Vec<MonthlyPriceStat>,
    /// Year summary.
    #[serde(default)]
    pub statistik_keseluruhan: OverallPriceStat,
    /// Overall direction.
    #[serde(default)]
    pub tren: Trend,
}

impl PriceFluctuation {
    /// Min, average and max series in month order.
    pub fn series(&self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let mut months: Vec<&MonthlyPriceStat> = self.statistik_bulanan.iter().collect();
        months.sort_by_key(|m| m.bulan);
        (
            months.iter().map(|m| m.harga_min).collect(),
            months.iter().map(|m| m.harga_rata_rata).collect(),
            months.iter().map(|m| m.harga_max).collect(),
        )
    }
}

/// Production figures for one sub-district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KecamatanData {
    /// Sub-district name as the backend spells it.
    pub kecamatan: String,
    /// Production group (`Tinggi`/`Sedang`/`Rendah`).
    #[serde(default)]
    pub kelompok_produksi: String,
    /// Realization group.
    #[serde(default)]
    pub kelompok_realisasi: String,
    /// Production over the period, in tons.
    #[serde(default)]
    pub produksi_periode: f64,
    /// Realization against target, in percent.
    #[serde(default)]
    pub realisasi_periode: f64,
    /// Target over the period, in tons.
    #[serde(default)]
    pub target_periode: f64,
}

/// Result of `/api/analyze/pengelompokan-produksi`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionGrouping {
    /// Commodity name.
    #[serde(default)]
    pub komoditas: String,
    /// Year analysed.
    #[serde(default)]
    pub tahun: i32,
    /// Per sub-district rows.
    #[serde(default)]
    pub detail_kecamatan: Vec<KecamatanData>,
    /// Count of sub-districts per group, keyed by group name.
    #[serde(default)]
    pub distribusi_kelompok: Option<BTreeMap<String, u32>>,
}
