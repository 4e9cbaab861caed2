//! The tabular preview shown before an upload is confirmed.

use serde::Serialize;
use std::fmt::Write as _;

/// Headers plus the first rows of a sheet.
///
/// Every row has exactly one cell per header; absent values are `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Preview {
    /// Column headers in sheet order.
    pub headers: Vec<String>,
    /// Retained rows, cells aligned with `headers`.
    pub rows: Vec<Vec<String>>,
    /// Number of data rows in the sheet before truncation.
    pub total_rows: usize,
}

impl Preview {
    /// True when no row was retained.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell of `row` under `header`.
    pub fn get(&self, row: usize, header: &str) -> Option<&str> {
        let column = self.headers.iter().position(|h| h == header)?;
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Row `row` as header/value pairs.
    pub fn record(&self, row: usize) -> Option<Vec<(&str, &str)>> {
        let cells = self.rows.get(row)?;
        Some(
            self.headers
                .iter()
                .map(String::as_str)
                .zip(cells.iter().map(String::as_str))
                .collect(),
        )
    }

    /// True when more rows exist than were kept.
    pub fn is_truncated(&self) -> bool {
        self.total_rows > self.rows.len()
    }

    /// Plain-text table with padded columns.
    pub fn to_table(&self) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        let mut out = String::new();
        let _ = writeln!(out, "{}", format_row(self.headers.iter(), &widths));
        let _ = writeln!(out, "{}", rule.join("-+-"));
        for row in &self.rows {
            let _ = writeln!(out, "{}", format_row(row.iter(), &widths));
        }
        out
    }
}

fn format_row<'a>(cells: impl Iterator<Item = &'a String>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    padded.join(" | ").trim_end().to_string()
}
