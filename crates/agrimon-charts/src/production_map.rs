//! Per-region styling for the production heat map and the status counters.
//!
//! The map library is external; this module only decides which fill color and
//! popup text each sub-district gets.

use crate::price_chart::LegendEntry;
use agrimon_common::{format_grouped, format_percent, KecamatanData, ProductionGrouping};
use agrimon_config::{GroupColors, StatusCardColors};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Text shown for a region the backend returned nothing for.
pub const NO_DATA_TEXT: &str = "Data tidak tersedia";

/// Production group of a sub-district.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProductionGroup {
    /// High production.
    Tinggi,
    /// Medium production.
    Sedang,
    /// Low production.
    Rendah,
    /// Missing or unrecognized group.
    Unknown,
}

impl ProductionGroup {
    /// Groups shown in the legend, in display order.
    pub const LEGEND: [Self; 3] = [Self::Tinggi, Self::Sedang, Self::Rendah];

    /// Parse a group name, ignoring case and surrounding whitespace.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "tinggi" => Self::Tinggi,
            "sedang" => Self::Sedang,
            "rendah" => Self::Rendah,
            _ => Self::Unknown,
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tinggi => "Tinggi",
            Self::Sedang => "Sedang",
            Self::Rendah => "Rendah",
            Self::Unknown => "Unknown",
        }
    }

    /// Fill color for this group.
    pub fn color(self, colors: &GroupColors) -> &str {
        match self {
            Self::Tinggi => &colors.tinggi,
            Self::Sedang => &colors.sedang,
            Self::Rendah => &colors.rendah,
            Self::Unknown => &colors.unknown,
        }
    }
}

impl fmt::Display for ProductionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical form of a region name for matching map features to API rows.
///
/// Lowercases, drops one leading `desa` or `kecamatan` word, trims.
pub fn normalize_kecamatan_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut rest = lowered.as_str();
    for prefix in ["desa", "kecamatan"] {
        if let Some(tail) = rest.strip_prefix(prefix) {
            if tail.starts_with(char::is_whitespace) {
                rest = tail.trim_start();
            }
        }
    }
    rest.trim().to_string()
}

/// Fill color and popup for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionStyle {
    /// Region name as the map feature spells it.
    pub name: String,
    /// Parsed production group.
    pub group: ProductionGroup,
    /// Fill color.
    pub fill_color: String,
    /// Popup text, one field per line.
    pub popup: String,
}

/// Popup text for a region, with or without data.
pub fn popup_text(name: &str, data: Option<&KecamatanData>) -> String {
    match data {
        Some(data) => format!(
            "{name}\nKelompok Produksi: {}\nKelompok Realisasi: {}\nProduksi Periode: {} ton\nTarget Periode: {} ton\nRealisasi: {}",
            data.kelompok_produksi,
            data.kelompok_realisasi,
            format_grouped(data.produksi_periode, 0),
            format_grouped(data.target_periode, 2),
            format_percent(data.realisasi_periode),
        ),
        None => format!("{name}\n{NO_DATA_TEXT}"),
    }
}

/// Normalized-name lookup over one grouping result.
#[derive(Debug, Clone)]
pub struct ProductionMap {
    regions: HashMap<String, KecamatanData>,
    colors: GroupColors,
}

impl ProductionMap {
    /// Index the detail rows. A later row with the same normalized name wins.
    pub fn new(rows: &[KecamatanData], colors: &GroupColors) -> Self {
        let mut regions = HashMap::with_capacity(rows.len());
        for row in rows {
            let key = normalize_kecamatan_name(&row.kecamatan);
            if regions.insert(key.clone(), row.clone()).is_some() {
                debug!(kecamatan = %key, "Duplicate region in production data");
            }
        }
        Self {
            regions,
            colors: colors.clone(),
        }
    }

    /// Build from a full grouping response.
    pub fn from_grouping(grouping: &ProductionGrouping, colors: &GroupColors) -> Self {
        Self::new(&grouping.detail_kecamatan, colors)
    }

    /// Data for a map feature name, matched after normalization.
    pub fn get(&self, name: &str) -> Option<&KecamatanData> {
        self.regions.get(&normalize_kecamatan_name(name))
    }

    /// Number of distinct regions with data.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True when the response had no rows.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Style for a map feature.
    pub fn style_for(&self, name: &str) -> RegionStyle {
        let data = self.get(name);
        let group = data.map_or(ProductionGroup::Unknown, |d| {
            ProductionGroup::parse(&d.kelompok_produksi)
        });
        RegionStyle {
            name: name.to_string(),
            group,
            fill_color: group.color(&self.colors).to_string(),
            popup: popup_text(name, data),
        }
    }

    /// Legend swatches for the three known groups.
    pub fn legend(&self) -> Vec<LegendEntry> {
        ProductionGroup::LEGEND
            .iter()
            .map(|group| LegendEntry {
                label: group.label().to_string(),
                color: group.color(&self.colors).to_string(),
            })
            .collect()
    }
}

/// Number of sub-districts per production group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// "Tinggi" count.
    pub tinggi: u32,
    /// "Sedang" count.
    pub sedang: u32,
    /// "Rendah" count.
    pub rendah: u32,
}

impl StatusCounts {
    /// Counts from the API distribution, or from the detail rows when the
    /// distribution is absent.
    pub fn from_grouping(grouping: &ProductionGrouping) -> Self {
        let mut counts = Self::default();
        match &grouping.distribusi_kelompok {
            Some(distribution) => {
                for (group, count) in distribution {
                    counts.add(ProductionGroup::parse(group), *count);
                }
            }
            None => {
                for row in &grouping.detail_kecamatan {
                    counts.add(ProductionGroup::parse(&row.kelompok_produksi), 1);
                }
            }
        }
        counts
    }

    fn add(&mut self, group: ProductionGroup, count: u32) {
        match group {
            ProductionGroup::Tinggi => self.tinggi += count,
            ProductionGroup::Sedang => self.sedang += count,
            ProductionGroup::Rendah => self.rendah += count,
            ProductionGroup::Unknown => {}
        }
    }

    /// Sum over the three groups.
    pub const fn total(&self) -> u32 {
        self.tinggi + self.sedang + self.rendah
    }

    /// Dashboard cards, high to low.
    pub fn cards(&self, colors: &StatusCardColors) -> [StatusCard; 3] {
        [
            StatusCard::new("Banyak", self.tinggi, &colors.banyak),
            StatusCard::new("Sedang", self.sedang, &colors.sedang),
            StatusCard::new("Sedikit", self.rendah, &colors.sedikit),
        ]
    }
}

/// One status counter card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCard {
    /// Badge text, e.g. `Status : Banyak`.
    pub label: String,
    /// Number of sub-districts.
    pub count: u32,
    /// Badge color.
    pub color: String,
}

impl StatusCard {
    fn new(status: &str, count: u32, color: &str) -> Self {
        Self {
            label: format!("Status : {status}"),
            count,
            color: color.to_string(),
        }
    }
}
