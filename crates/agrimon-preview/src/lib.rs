//! # Agrimon Preview
//!
//! Loads uploaded spreadsheets and extracts the preview table shown before an
//! import is sent to the analytics API.
//!
//! Price sheets use a single header row ([`extract_preview`]); production
//! sheets use a group header row over a sub header row
//! ([`extract_merged_preview`]).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod merged;
pub mod preview;
pub mod simple;
pub mod workbook;

pub use error::PreviewError;
pub use merged::{extract_merged_preview, resolve_header, MergedLayout};
pub use preview::Preview;
pub use simple::{dedupe_headers, extract_preview, EMPTY_HEADER};
pub use workbook::{cell_to_string, SheetGrid, Workbook, WorkbookFormat};

use agrimon_config::PreviewSettings;

/// Which header layout a sheet uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderLayout {
    /// One header row.
    #[default]
    Simple,
    /// Group header row over a sub header row.
    Merged(MergedLayout),
}

impl HeaderLayout {
    /// Merged layout with rows taken from `settings`.
    pub fn merged_from(settings: &PreviewSettings) -> Self {
        Self::Merged(MergedLayout::from(&settings.merged))
    }
}

/// Parse `bytes` and extract a preview of at most `max_rows` rows.
pub fn preview_bytes(
    file_name: &str,
    bytes: Vec<u8>,
    layout: HeaderLayout,
    max_rows: usize,
) -> Result<Preview, PreviewError> {
    let workbook = Workbook::from_bytes(file_name, bytes)?;
    match layout {
        HeaderLayout::Simple => extract_preview(&workbook, max_rows),
        HeaderLayout::Merged(rows) => extract_merged_preview(&workbook, &rows, max_rows),
    }
}
