//! The analytics API surface, as a trait so views can be tested without a server.

use agrimon_common::{MonthRange, PriceFluctuation, ProductionGrouping, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Query for `/api/analyze/fluktuasi-harga`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuery {
    /// Commodity name, e.g. "Beras Medium".
    pub komoditas: String,
    /// Year of the statistics.
    pub tahun: i32,
    /// Price type, e.g. "konsumen".
    pub tipe_harga: String,
}

impl PriceQuery {
    /// Query parameters in wire order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("komoditas", self.komoditas.clone()),
            ("tahun", self.tahun.to_string()),
            ("tipe_harga", self.tipe_harga.clone()),
        ]
    }
}

/// Query for `/api/analyze/pengelompokan-produksi`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionQuery {
    /// Commodity code, e.g. "PADI".
    pub komoditas: String,
    /// Year of the production data.
    pub tahun: i32,
    /// Months aggregated into the grouping.
    pub periode: MonthRange,
}

impl ProductionQuery {
    /// Query parameters in wire order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("komoditas", self.komoditas.clone()),
            ("tahun", self.tahun.to_string()),
            ("bulan_mulai", self.periode.start.number().to_string()),
            ("bulan_akhir", self.periode.end.number().to_string()),
        ]
    }
}

/// Option lists served under `/api/metadata/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    /// Commodities with price data.
    PriceCommodities,
    /// Years with price data.
    PriceYears,
    /// Price types.
    PriceTypes,
}

impl MetadataKind {
    /// Every list, in the order the dashboard requests them.
    pub const ALL: [Self; 3] = [Self::PriceCommodities, Self::PriceYears, Self::PriceTypes];

    /// Last path segment of the endpoint.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::PriceCommodities => "komoditas-harga",
            Self::PriceYears => "tahun-harga",
            Self::PriceTypes => "tipe-harga",
        }
    }

    /// Endpoint path relative to the base URL.
    pub fn path(self) -> String {
        format!("api/metadata/{}", self.slug())
    }
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A spreadsheet about to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Name sent with the multipart part.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Wrap file contents.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-byte file.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Fields sent with a production upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionUpload {
    /// The spreadsheet.
    pub file: UploadFile,
    /// Commodity code.
    pub komoditas: String,
    /// Year the sheet covers.
    pub tahun: i32,
}

/// What the server said about an accepted upload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UploadReceipt {
    /// Server message, when given.
    #[serde(default)]
    pub message: Option<String>,
    /// Raw `data` payload, e.g. inserted row counts.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Calls the views make against the analytics backend.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// Monthly price statistics for one commodity, year and price type.
    async fn price_fluctuation(&self, query: &PriceQuery) -> Result<PriceFluctuation>;

    /// Per-kecamatan production grouping over a month range.
    async fn production_grouping(&self, query: &ProductionQuery) -> Result<ProductionGrouping>;

    /// One metadata option list.
    async fn metadata(&self, kind: MetadataKind) -> Result<Vec<String>>;

    /// Upload a price spreadsheet.
    async fn upload_price(&self, file: UploadFile) -> Result<UploadReceipt>;

    /// Upload a production spreadsheet.
    async fn upload_production(&self, upload: ProductionUpload) -> Result<UploadReceipt>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrimon_common::Month;

    #[test]
    fn test_production_params() {
        let query = ProductionQuery {
            komoditas: "PADI".to_string(),
            tahun: 2025,
            periode: MonthRange::new(Month::new(3).unwrap(), Month::new(8).unwrap()).unwrap(),
        };
        assert_eq!(
            query.params(),
            vec![
                ("komoditas", "PADI".to_string()),
                ("tahun", "2025".to_string()),
                ("bulan_mulai", "3".to_string()),
                ("bulan_akhir", "8".to_string()),
            ]
        );
    }

    #[test]
    fn test_metadata_paths() {
        let paths: Vec<String> = MetadataKind::ALL.iter().map(|k| k.path()).collect();
        assert_eq!(
            paths,
            vec![
                "api/metadata/komoditas-harga",
                "api/metadata/tahun-harga",
                "api/metadata/tipe-harga"
            ]
        );
    }

    #[tokio::test]
    async fn test_mock_metadata() {
        let mut api = MockAnalyticsApi::new();
        api.expect_metadata()
            .withf(|kind| *kind == MetadataKind::PriceYears)
            .returning(|_| Ok(vec!["2025".to_string()]));

        let years = api.metadata(MetadataKind::PriceYears).await.unwrap();
        assert_eq!(years, vec!["2025"]);
    }
}
