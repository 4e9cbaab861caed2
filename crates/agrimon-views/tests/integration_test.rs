//! Integration tests for agrimon-views crate.
//!
//! Views run against a mocked analytics API.

use agrimon_client::{
    decode_payload, decode_receipt, MetadataKind, MockAnalyticsApi, UploadFile, UploadReceipt,
};
use agrimon_common::test_utils::{api_fixtures, init_test_logging, sheet_fixtures};
use agrimon_common::{AgriError, Month, MonthRange, PriceFluctuation, ProductionGrouping};
use agrimon_config::{Config, PreviewSettings};
use agrimon_views::{
    DashboardView, ImportError, ImportPriceView, ImportProductionView, PRICE_SUCCESS,
    PRODUCTION_SUCCESS,
};
use mockall::predicate::eq;

fn price_data() -> PriceFluctuation {
    decode_payload(api_fixtures::price_fluctuation_json()).unwrap()
}

fn production_data() -> ProductionGrouping {
    decode_payload(api_fixtures::production_grouping_json()).unwrap()
}

fn price_file(rows: usize) -> UploadFile {
    UploadFile::new("harga.csv", sheet_fixtures::price_csv(rows).into_bytes())
}

fn production_file() -> UploadFile {
    UploadFile::new(
        "produksi.csv",
        sheet_fixtures::production_csv().as_bytes().to_vec(),
    )
}

#[tokio::test]
async fn test_dashboard_refresh_loads_both_panels() {
    init_test_logging();
    let mut api = MockAnalyticsApi::new();
    api.expect_price_fluctuation()
        .withf(|q| q.komoditas == "Beras Medium" && q.tahun == 2025 && q.tipe_harga == "konsumen")
        .times(1)
        .returning(|_| Ok(price_data()));
    api.expect_production_grouping()
        .withf(|q| q.komoditas == "PADI" && q.periode == MonthRange::full_year())
        .times(1)
        .returning(|_| Ok(production_data()));

    let mut view = DashboardView::new(&Config::default());
    view.refresh(&api).await;

    assert!(view.price_panel().chart().is_some());
    let cards = view.status_cards();
    assert_eq!(cards.iter().map(|c| c.count).collect::<Vec<_>>(), vec![1, 1, 1]);
}

#[tokio::test]
async fn test_dashboard_panel_failure_becomes_message() {
    let mut api = MockAnalyticsApi::new();
    api.expect_price_fluctuation()
        .returning(|_| Err(AgriError::api_with_status("HTTP error! status: 502", 502)));
    api.expect_production_grouping()
        .returning(|_| Ok(production_data()));

    let mut view = DashboardView::new(&Config::default());
    view.refresh(&api).await;

    assert_eq!(
        view.price_panel().state().error(),
        Some("HTTP error! status: 502")
    );
    assert!(view.production_panel().display().is_some());
}

#[tokio::test]
async fn test_metadata_failure_keeps_defaults() {
    let mut api = MockAnalyticsApi::new();
    api.expect_metadata()
        .with(eq(MetadataKind::PriceCommodities))
        .returning(|_| Err(AgriError::network("Connection failed")));
    api.expect_metadata()
        .with(eq(MetadataKind::PriceYears))
        .returning(|_| Ok(vec!["2024".to_string(), "2023".to_string()]));
    api.expect_metadata()
        .with(eq(MetadataKind::PriceTypes))
        .returning(|_| Ok(Vec::new()));

    let mut view = DashboardView::new(&Config::default());
    let default_commodities = view.options().commodities.clone();
    view.load_metadata(&api).await;

    assert_eq!(view.options().commodities, default_commodities);
    assert_eq!(view.options().years.len(), 2);
    assert_eq!(view.filters().year, 2024);
    assert_eq!(view.options().price_types.len(), 2);
    assert_eq!(view.metadata_errors(), ["Connection failed".to_string()]);
}

#[tokio::test]
async fn test_production_filter_change() {
    let mut api = MockAnalyticsApi::new();
    api.expect_production_grouping()
        .withf(|q| {
            q.komoditas == "JAGUNG"
                && q.periode.start == Month::new(2).unwrap()
                && q.periode.end == Month::new(4).unwrap()
        })
        .returning(|_| Ok(production_data()));

    let mut view = DashboardView::new(&Config::default());
    let period = MonthRange::new(Month::new(2).unwrap(), Month::new(4).unwrap()).unwrap();
    assert!(view.set_production_filters(&api, "JAGUNG", period).await);

    let display = view.production_panel().display().unwrap();
    let style = display.map.style_for("Garut Kota");
    assert_eq!(style.fill_color, "#0d4a2b");
}

#[tokio::test]
async fn test_price_import_success_clears_form() {
    let mut api = MockAnalyticsApi::new();
    api.expect_upload_price()
        .withf(|file| file.file_name == "harga.csv")
        .times(1)
        .returning(|_| Ok(UploadReceipt::default()));

    let mut view = ImportPriceView::new(&PreviewSettings::default());
    let preview = view.select_file(price_file(12)).unwrap();
    assert_eq!(preview.rows.len(), 10);
    assert_eq!(preview.total_rows, 12);

    view.submit(&api).await.unwrap();
    assert_eq!(view.form().success_message(), Some(PRICE_SUCCESS));
    assert!(view.form().file().is_none());
    assert!(view.form().preview().is_none());
    assert!(!view.form().is_loading());
}

#[tokio::test]
async fn test_price_import_without_file() {
    let api = MockAnalyticsApi::new();
    let mut view = ImportPriceView::new(&PreviewSettings::default());

    let err = view.submit(&api).await.unwrap_err();
    assert!(matches!(err, ImportError::NoFile));
    assert_eq!(
        view.form().error_message(),
        Some("Silakan pilih file terlebih dahulu")
    );
}

#[tokio::test]
async fn test_price_import_with_empty_sheet() {
    let api = MockAnalyticsApi::new();
    let mut view = ImportPriceView::new(&PreviewSettings::default());

    let err = view.select_file(price_file(0)).unwrap_err();
    assert_eq!(err.to_string(), "File kosong atau format tidak valid");

    let err = view.submit(&api).await.unwrap_err();
    assert_eq!(err.to_string(), "Tidak ada data untuk diimport");
}

#[tokio::test]
async fn test_production_import_requires_commodity_and_year() {
    let api = MockAnalyticsApi::new();
    let mut view = ImportProductionView::new(&PreviewSettings::default());
    view.select_file(production_file()).unwrap();

    let err = view.submit(&api).await.unwrap_err();
    assert!(matches!(err, ImportError::MissingCommodity));

    view.set_commodity("PADI");
    let err = view.submit(&api).await.unwrap_err();
    assert!(matches!(err, ImportError::MissingYear));
}

#[tokio::test]
async fn test_production_import_uses_merged_preview() {
    let mut api = MockAnalyticsApi::new();
    api.expect_upload_production()
        .withf(|upload| upload.komoditas == "PADI" && upload.tahun == 2025)
        .times(1)
        .returning(|_| Ok(UploadReceipt::default()));

    let mut view = ImportProductionView::new(&PreviewSettings::default());
    let preview = view.select_file(production_file()).unwrap();
    assert_eq!(
        preview.headers,
        vec!["KECAMATAN", "JANUARI", "FEBRUARI", "MARET"]
    );

    view.set_commodity("PADI");
    view.set_year(Some(2025));
    view.submit(&api).await.unwrap();
    assert_eq!(view.form().success_message(), Some(PRODUCTION_SUCCESS));
}

#[tokio::test]
async fn test_production_upload_failure_shows_server_message() {
    let mut api = MockAnalyticsApi::new();
    api.expect_upload_production().returning(|_| {
        Err(AgriError::api_with_status(
            "Kolom KECAMATAN tidak ditemukan",
            422,
        ))
    });

    let mut view = ImportProductionView::new(&PreviewSettings::default());
    view.select_file(production_file()).unwrap();
    view.set_commodity("PADI");
    view.set_year(Some(2025));

    let err = view.submit(&api).await.unwrap_err();
    assert_eq!(err.to_string(), "Kolom KECAMATAN tidak ditemukan");
    assert_eq!(view.form().success_message(), None);
    assert_eq!(
        view.form().error_message(),
        Some("Kolom KECAMATAN tidak ditemukan")
    );
    assert!(view.form().file().is_some());
}

#[tokio::test]
async fn test_price_import_rejected_in_ok_reply_keeps_form() {
    let mut api = MockAnalyticsApi::new();
    api.expect_upload_price().times(1).returning(|_| {
        decode_receipt(r#"{"success": false, "message": "Kolom TAHUN tidak ditemukan"}"#)
    });

    let mut view = ImportPriceView::new(&PreviewSettings::default());
    view.select_file(price_file(3)).unwrap();

    let err = view.submit(&api).await.unwrap_err();
    assert_eq!(err.to_string(), "Kolom TAHUN tidak ditemukan");
    assert_eq!(view.form().success_message(), None);
    assert!(view.form().file().is_some());
    assert!(view.form().preview().is_some());
}

#[tokio::test]
async fn test_production_import_unreadable_reply_shows_fallback() {
    let mut api = MockAnalyticsApi::new();
    api.expect_upload_production()
        .times(1)
        .returning(|_| decode_receipt("<html>proxy</html>"));

    let mut view = ImportProductionView::new(&PreviewSettings::default());
    view.select_file(production_file()).unwrap();
    view.set_commodity("PADI");
    view.set_year(Some(2025));

    let err = view.submit(&api).await.unwrap_err();
    assert_eq!(err.to_string(), "Terjadi kesalahan saat mengupload file");
    assert_eq!(view.form().success_message(), None);
    assert!(!view.form().is_loading());
}

#[test]
fn test_oversized_file_is_rejected_before_parsing() {
    let settings = PreviewSettings {
        max_file_size_bytes: 16,
        ..PreviewSettings::default()
    };
    let mut view = ImportPriceView::new(&settings);
    let err = view.select_file(price_file(3)).unwrap_err();
    assert!(matches!(err, ImportError::TooLarge { .. }));
    assert!(view.form().file().is_none());
}
