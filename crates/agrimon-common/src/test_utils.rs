//! Test utilities and shared test helpers for agrimon.
//!
//! Fixtures mirror the payloads the analytics API returns so every crate in the
//! workspace tests against the same shapes.

use std::sync::Once;

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Canned analytics API payloads.
pub mod api_fixtures {
    /// Envelope returned by `/api/analyze/fluktuasi-harga`.
    pub fn price_fluctuation_json() -> &'static str {
        r#"{
  "success": true,
  "data": {
    "komoditas": "Beras Medium",
    "tahun": 2024,
    "tipe_harga": "konsumen",
    "statistik_bulanan": [
      {"bulan": 1, "nama_bulan": "Januari", "harga_min": 12000, "harga_rata_rata": 12500, "harga_max": 13000, "fluktuasi_persen": 8.0},
      {"bulan": 2, "nama_bulan": "Februari", "harga_min": 12200, "harga_rata_rata": 12900, "harga_max": 13600, "fluktuasi_persen": 10.85},
      {"bulan": 3, "nama_bulan": "Maret", "harga_min": 12100, "harga_rata_rata": 12600, "harga_max": 13100, "fluktuasi_persen": 7.94}
    ],
    "statistik_keseluruhan": {
      "harga_min": 12000,
      "harga_max": 13600,
      "harga_rata_rata": 12666.67,
      "fluktuasi_rata_rata": 8.93
    },
    "tren": "naik"
  }
}"#
    }

    /// Envelope returned by `/api/analyze/pengelompokan-produksi`.
    pub fn production_grouping_json() -> &'static str {
        r#"{
  "success": true,
  "data": {
    "komoditas": "PADI",
    "tahun": 2025,
    "detail_kecamatan": [
      {"kecamatan": "Kecamatan Garut Kota", "kelompok_produksi": "Tinggi", "kelompok_realisasi": "Sedang", "produksi_periode": 15234.6, "realisasi_periode": 87.456, "target_periode": 17420.123},
      {"kecamatan": "Tarogong Kidul", "kelompok_produksi": "sedang", "kelompok_realisasi": "Tinggi", "produksi_periode": 9800, "realisasi_periode": 101.2, "target_periode": 9683.8},
      {"kecamatan": "Desa Cibatu", "kelompok_produksi": "RENDAH", "kelompok_realisasi": "Rendah", "produksi_periode": 1200, "realisasi_periode": 40.0, "target_periode": 3000}
    ],
    "distribusi_kelompok": {"Tinggi": 1, "Sedang": 1, "Rendah": 1}
  }
}"#
    }

    /// Envelope returned by the `/api/metadata/*` endpoints.
    pub fn metadata_json() -> &'static str {
        r#"{"success": true, "data": ["Beras Medium", "Beras Premium", "Cabai Merah"]}"#
    }
}

/// Spreadsheet contents used by the preview tests.
pub mod sheet_fixtures {
    /// A CSV price sheet with a header row and `rows` data rows.
    pub fn price_csv(rows: usize) -> String {
        let mut csv = String::from("Tanggal,Komoditas,Harga\n");
        for i in 0..rows {
            csv.push_str(&format!("2024-01-{:02},Beras Medium,{}\n", i + 1, 12_000 + i * 50));
        }
        csv
    }

    /// A yearly production sheet with title rows, a two-row header and data from row 6.
    pub fn production_csv() -> &'static str {
        concat!(
            "REKAP PRODUKSI PADI,,,,\n",
            "KABUPATEN GARUT,,,,\n",
            ",,,,\n",
            "KECAMATAN,HASIL PRODUKSI,,,\n",
            ",JANUARI,FEBRUARI,MARET,\n",
            "Garut Kota,120,130,140,\n",
            "Tarogong Kidul,90,95,,\n",
        )
    }
}
