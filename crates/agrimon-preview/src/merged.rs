//! Preview for production sheets with a two-row header.
//!
//! These sheets put a group header such as `HASIL PRODUKSI` in one row
//! (merged across its columns) and the per-column sub headers such as month
//! names in the row below. A column is named after its sub header, falling
//! back to the group header.

use crate::error::PreviewError;
use crate::preview::Preview;
use crate::workbook::Workbook;
use agrimon_config::MergedHeaderSettings;
use tracing::{debug, warn};

/// Prefix of synthetic names for columns without any header.
pub const PLACEHOLDER_PREFIX: &str = "__EMPTY";

/// Absolute, 0-indexed rows of a merged-header sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedLayout {
    /// Group header row.
    pub group_row: u32,
    /// Sub header row.
    pub sub_row: u32,
    /// First data row.
    pub data_start_row: u32,
}

impl Default for MergedLayout {
    fn default() -> Self {
        Self {
            group_row: 3,
            sub_row: 4,
            data_start_row: 5,
        }
    }
}

impl From<&MergedHeaderSettings> for MergedLayout {
    /// Settings count rows from 1.
    fn from(settings: &MergedHeaderSettings) -> Self {
        Self {
            group_row: settings.group_row.saturating_sub(1),
            sub_row: settings.sub_row.saturating_sub(1),
            data_start_row: settings.data_start_row.saturating_sub(1),
        }
    }
}

/// Resolve a column header from its sub and group cells.
pub fn resolve_header(sub: &str, group: &str, col: u32) -> String {
    let sub = sub.trim();
    if !sub.is_empty() {
        return sub.to_string();
    }
    let group = group.trim();
    if !group.is_empty() {
        return group.to_string();
    }
    format!("{PLACEHOLDER_PREFIX}_{col}")
}

/// True for the synthetic name `resolve_header` gives column `col`.
fn is_placeholder(header: &str, col: u32) -> bool {
    header.is_empty()
        || header
            .strip_prefix(PLACEHOLDER_PREFIX)
            .and_then(|rest| rest.strip_prefix('_'))
            .is_some_and(|index| index == col.to_string())
}

/// Preview of a merged-header sheet.
///
/// Placeholder columns are dropped. When two columns resolve to the same
/// header the later column wins; the header keeps its first position and
/// each collision is logged.
pub fn extract_merged_preview(
    workbook: &Workbook,
    layout: &MergedLayout,
    max_rows: usize,
) -> Result<Preview, PreviewError> {
    let grid = workbook.first_sheet()?;
    let ((_, first_col), (last_row, last_col)) = grid.used_range().ok_or(PreviewError::Empty)?;

    let mut columns: Vec<(String, u32)> = Vec::new();
    for col in first_col..=last_col {
        let header = resolve_header(
            grid.cell(layout.sub_row, col),
            grid.cell(layout.group_row, col),
            col,
        );
        if is_placeholder(&header, col) {
            continue;
        }
        if let Some(entry) = columns.iter_mut().find(|(name, _)| *name == header) {
            warn!(
                header = %header,
                previous_column = entry.1,
                column = col,
                "Duplicate merged header, later column wins"
            );
            entry.1 = col;
        } else {
            columns.push((header, col));
        }
    }

    if columns.is_empty() {
        return Err(PreviewError::Empty);
    }

    let mut rows = Vec::new();
    let mut total_rows = 0;
    for row in layout.data_start_row..=last_row {
        let cells: Vec<String> = columns
            .iter()
            .map(|(_, col)| grid.cell(row, *col).to_string())
            .collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        total_rows += 1;
        if rows.len() < max_rows {
            rows.push(cells);
        }
    }

    if total_rows == 0 {
        return Err(PreviewError::Empty);
    }

    debug!(
        headers = columns.len(),
        kept = rows.len(),
        total_rows,
        "Extracted merged-header preview"
    );
    Ok(Preview {
        headers: columns.into_iter().map(|(name, _)| name).collect(),
        rows,
        total_rows,
    })
}
