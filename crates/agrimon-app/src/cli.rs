//! Command line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Agricultural monitoring: spreadsheet previews, price charts and
/// production grouping from the analytics API.
#[derive(Parser, Debug)]
#[command(name = "agrimon", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (TOML or YAML)
    #[arg(short, long, global = true, env = "AGRIMON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level filter, overriding the configuration
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the preview table of a spreadsheet
    Preview {
        /// Spreadsheet file (.xlsx, .xls, .ods, .csv)
        file: PathBuf,

        /// Treat the sheet as a production sheet with a two-row header
        #[arg(long)]
        merged: bool,

        /// Number of rows to show
        #[arg(long)]
        rows: Option<usize>,
    },

    /// Fetch monthly price fluctuation and optionally write the chart as SVG
    Prices {
        /// Commodity; defaults to the configured one
        #[arg(long)]
        komoditas: Option<String>,

        /// Year; defaults to the configured one
        #[arg(long)]
        tahun: Option<i32>,

        /// Price type; defaults to the configured one
        #[arg(long = "tipe-harga")]
        tipe_harga: Option<String>,

        /// Where to write the SVG chart
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Fetch the production grouping per kecamatan
    Production {
        /// Commodity; defaults to the configured one
        #[arg(long)]
        komoditas: Option<String>,

        /// Year; defaults to the configured one
        #[arg(long)]
        tahun: Option<i32>,

        /// First month of the period
        #[arg(long = "bulan-mulai", default_value_t = 1)]
        bulan_mulai: u32,

        /// Last month of the period
        #[arg(long = "bulan-akhir", default_value_t = 12)]
        bulan_akhir: u32,
    },

    /// List the filter options served by the API
    Metadata,

    /// Upload a spreadsheet
    Upload {
        /// Which import.
        #[command(subcommand)]
        kind: UploadKind,
    },
}

/// Upload targets.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum UploadKind {
    /// Price data
    Harga {
        /// Spreadsheet file
        file: PathBuf,
    },

    /// Production data
    Produksi {
        /// Spreadsheet file
        file: PathBuf,

        /// Commodity of the sheet
        #[arg(long)]
        komoditas: String,

        /// Year of the sheet
        #[arg(long)]
        tahun: i32,
    },
}
