//! Preview for sheets with a single header row.
//!
//! Header naming follows the convention most spreadsheet-to-JSON tools use:
//! a blank header becomes `__EMPTY`, then `__EMPTY_1`, `__EMPTY_2`, ...; a
//! repeated header `A` becomes `A_1`, `A_2`, ...

use crate::error::PreviewError;
use crate::preview::Preview;
use crate::workbook::Workbook;
use std::collections::HashMap;
use tracing::debug;

/// Placeholder for a blank header cell.
pub const EMPTY_HEADER: &str = "__EMPTY";

/// Make header names unique, in column order.
pub fn dedupe_headers<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::new();
    for cell in raw {
        let base = if cell.is_empty() { EMPTY_HEADER } else { cell };
        let name = match seen.get(base).copied() {
            None => {
                seen.insert(base.to_string(), 1);
                base.to_string()
            }
            Some(mut counter) => {
                let mut candidate = format!("{base}_{counter}");
                counter += 1;
                while seen.contains_key(&candidate) {
                    candidate = format!("{base}_{counter}");
                    counter += 1;
                }
                seen.insert(base.to_string(), counter);
                seen.insert(candidate.clone(), 1);
                candidate
            }
        };
        headers.push(name);
    }
    headers
}

/// Headers from the first used row, plus up to `max_rows` non-blank rows below it.
pub fn extract_preview(workbook: &Workbook, max_rows: usize) -> Result<Preview, PreviewError> {
    let grid = workbook.first_sheet()?;
    let ((first_row, first_col), (last_row, last_col)) =
        grid.used_range().ok_or(PreviewError::Empty)?;

    let headers = dedupe_headers((first_col..=last_col).map(|col| grid.cell(first_row, col)));

    let mut rows = Vec::new();
    let mut total_rows = 0;
    for row in first_row + 1..=last_row {
        let cells: Vec<String> = (first_col..=last_col)
            .map(|col| grid.cell(row, col).to_string())
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
        headers = headers.len(),
        kept = rows.len(),
        total_rows,
        "Extracted simple preview"
    );
    Ok(Preview {
        headers,
        rows,
        total_rows,
    })
}
