//! Integration tests for agrimon-app crate.
//!
//! Commands run against a mocked analytics API and write into a buffer.

use agrimon_app::{App, AppError, Cli, Command};
use agrimon_client::{decode_payload, MockAnalyticsApi, UploadReceipt};
use agrimon_common::test_utils::{api_fixtures, init_test_logging, sheet_fixtures};
use agrimon_common::AgriError;
use agrimon_config::Config;
use clap::Parser;

async fn run(api: &MockAnalyticsApi, args: &[&str]) -> (Result<(), AppError>, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let app = App::new(Config::default(), api);
    let mut out = Vec::new();
    let result = app.run(cli.command, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_preview_command_prints_table() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("harga.csv");
    std::fs::write(&path, sheet_fixtures::price_csv(12)).unwrap();

    let api = MockAnalyticsApi::new();
    let args = ["agrimon", "preview", path.to_str().unwrap(), "--rows", "3"];
    let (result, out) = run(&api, &args).await;
    result.unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("Tanggal"));
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[5], "Menampilkan 3 dari 12 baris");
}

#[tokio::test]
async fn test_preview_merged_command() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("produksi.csv");
    std::fs::write(&path, sheet_fixtures::production_csv()).unwrap();

    let api = MockAnalyticsApi::new();
    let args = ["agrimon", "preview", path.to_str().unwrap(), "--merged"];
    let (result, out) = run(&api, &args).await;
    result.unwrap();
    assert!(out.starts_with("KECAMATAN"));
    assert!(out.contains("JANUARI"));
    assert!(out.contains("Menampilkan 2 dari 2 baris"));
}

#[tokio::test]
async fn test_prices_command_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let svg = dir.path().join("chart.svg");

    let mut api = MockAnalyticsApi::new();
    api.expect_price_fluctuation()
        .withf(|q| q.komoditas == "Beras Premium" && q.tahun == 2024)
        .returning(|_| decode_payload(api_fixtures::price_fluctuation_json()));

    let (result, out) = run(
        &api,
        &[
            "agrimon",
            "prices",
            "--komoditas",
            "Beras Premium",
            "--tahun",
            "2024",
            "--out",
            svg.to_str().unwrap(),
        ],
    )
    .await;
    result.unwrap();

    assert!(out.contains("Tren: Naik"));
    assert!(out.contains("Terakhir update: "));
    let written = std::fs::read_to_string(&svg).unwrap();
    assert!(written.starts_with("<svg"));
}

#[tokio::test]
async fn test_prices_command_reports_panel_error() {
    let mut api = MockAnalyticsApi::new();
    api.expect_price_fluctuation()
        .returning(|_| Err(AgriError::network("Connection failed")));

    let (result, _) = run(&api, &["agrimon", "prices"]).await;
    let err = result.unwrap_err();
    assert!(matches!(err, AppError::Panel(_)));
    assert_eq!(err.to_string(), "Connection failed");
}

#[tokio::test]
async fn test_production_command_lists_regions() {
    let mut api = MockAnalyticsApi::new();
    api.expect_production_grouping()
        .withf(|q| q.periode.start.number() == 3 && q.periode.end.number() == 5)
        .returning(|_| decode_payload(api_fixtures::production_grouping_json()));

    let (result, out) = run(
        &api,
        &["agrimon", "production", "--bulan-mulai", "3", "--bulan-akhir", "5"],
    )
    .await;
    result.unwrap();

    assert!(out.contains("Status : Banyak: 1"));
    assert!(out.contains("- Kecamatan Garut Kota [Tinggi] 15.235 ton, realisasi 87.46%"));
}

#[tokio::test]
async fn test_production_command_rejects_reversed_period() {
    let api = MockAnalyticsApi::new();
    let (result, _) = run(
        &api,
        &["agrimon", "production", "--bulan-mulai", "9", "--bulan-akhir", "2"],
    )
    .await;
    assert!(matches!(result, Err(AppError::Agri(AgriError::Validation { .. }))));
}

#[tokio::test]
async fn test_upload_harga_command() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("harga.csv");
    std::fs::write(&path, sheet_fixtures::price_csv(2)).unwrap();

    let mut api = MockAnalyticsApi::new();
    api.expect_upload_price()
        .times(1)
        .returning(|_| Ok(UploadReceipt::default()));

    let (result, out) = run(&api, &["agrimon", "upload", "harga", path.to_str().unwrap()]).await;
    result.unwrap();
    assert_eq!(out.trim(), "Data harga berhasil diimport!");
}

#[tokio::test]
async fn test_upload_missing_file() {
    let api = MockAnalyticsApi::new();
    let (result, _) = run(&api, &["agrimon", "upload", "harga", "/nonexistent/harga.csv"]).await;
    assert!(matches!(result, Err(AppError::Io { .. })));
}

#[tokio::test]
async fn test_reloaded_config_drives_next_command() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("agrimon.toml");
    std::fs::write(&config_path, "[preview]\nmax_rows = 2\n").unwrap();
    let sheet = dir.path().join("harga.csv");
    std::fs::write(&sheet, sheet_fixtures::price_csv(5)).unwrap();

    let api = MockAnalyticsApi::new();
    let app = App::new(Config::default(), &api);
    app.reload_config(&config_path).unwrap();
    assert_eq!(app.config().preview.max_rows, 2);

    let cli = Cli::try_parse_from(["agrimon", "preview", sheet.to_str().unwrap()]).unwrap();
    let mut out = Vec::new();
    app.run(cli.command, &mut out).await.unwrap();
    assert!(String::from_utf8(out).unwrap().contains("Menampilkan 2 dari 5 baris"));

    std::fs::write(&config_path, "[preview]\nmax_rows = 0\n").unwrap();
    assert!(app.reload_config(&config_path).is_err());
    assert_eq!(app.config().preview.max_rows, 2);
}

#[test]
fn test_command_is_parsed_from_args() {
    let cli = Cli::try_parse_from(["agrimon", "metadata"]).unwrap();
    assert_eq!(cli.command, Command::Metadata);
}
