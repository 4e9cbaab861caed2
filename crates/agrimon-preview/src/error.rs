//! Preview failures and the messages shown for them.

use agrimon_common::AgriError;
use thiserror::Error;

/// Why a spreadsheet could not be previewed.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// The file name has an extension we cannot read.
    #[error("Unsupported spreadsheet format: {0}")]
    UnsupportedFormat(String),

    /// The bytes could not be parsed as the detected format.
    #[error("Failed to read workbook: {0}")]
    Read(String),

    /// The workbook has no sheets.
    #[error("Workbook has no sheets")]
    NoSheet,

    /// The first sheet exists but could not be decoded.
    #[error("Sheet '{sheet}' could not be read: {reason}")]
    UnreadableSheet {
        /// Sheet name.
        sheet: String,
        /// Decoder message.
        reason: String,
    },

    /// The sheet has no data rows.
    #[error("Sheet has no data rows")]
    Empty,
}

impl PreviewError {
    /// Message displayed on the import page.
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::NoSheet => "File tidak memiliki sheet",
            Self::UnreadableSheet { .. } => "Sheet tidak dapat dibaca",
            Self::Empty => "File kosong atau format tidak valid",
            Self::UnsupportedFormat(_) | Self::Read(_) => {
                "Gagal membaca file. Pastikan format file benar."
            }
        }
    }
}

impl From<PreviewError> for AgriError {
    fn from(err: PreviewError) -> Self {
        Self::spreadsheet_with_source(err.user_message(), err)
    }
}

impl From<calamine::Error> for PreviewError {
    fn from(err: calamine::Error) -> Self {
        Self::Read(err.to_string())
    }
}

impl From<csv::Error> for PreviewError {
    fn from(err: csv::Error) -> Self {
        Self::Read(err.to_string())
    }
}
