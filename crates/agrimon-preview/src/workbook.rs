//! Workbook loading for Excel, OpenDocument and CSV files.
//!
//! Every cell is turned into its display string up front, so the extractors
//! only ever see text. Rows and columns are addressed absolutely (0-indexed,
//! as in the file), not relative to the used range.

use crate::error::PreviewError;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

/// Container format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// `.xlsx`, `.xlsm`, `.xlsb`, `.xls` or `.ods`, read with calamine.
    Spreadsheet,
    /// `.csv`
    Csv,
}

impl WorkbookFormat {
    /// Detect the format of `file_name`.
    pub fn from_file_name(file_name: &str) -> Result<Self, PreviewError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Spreadsheet),
            "csv" => Ok(Self::Csv),
            _ => Err(PreviewError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

/// A rectangular block of display strings with absolute addressing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetGrid {
    start: (u32, u32),
    rows: Vec<Vec<String>>,
}

impl SheetGrid {
    /// Build a grid whose first cell sits at `start` (row, column).
    pub fn new(start: (u32, u32), rows: Vec<Vec<String>>) -> Self {
        let mut grid = Self { start, rows };
        grid.shrink_to_used();
        grid
    }

    /// Build a grid starting at A1.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self::new((0, 0), rows)
    }

    fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Drop blank borders so the grid covers exactly the used range.
    fn shrink_to_used(&mut self) {
        let is_blank_row = |row: &Vec<String>| row.iter().all(String::is_empty);

        let leading = self.rows.iter().take_while(|r| is_blank_row(r)).count();
        if leading == self.rows.len() {
            self.rows.clear();
            return;
        }
        while self.rows.last().is_some_and(is_blank_row) {
            self.rows.pop();
        }
        self.rows.drain(..leading);
        self.start.0 += leading as u32;

        let width = self.width();
        let first_col = (0..width)
            .find(|&c| self.rows.iter().any(|r| r.get(c).is_some_and(|v| !v.is_empty())))
            .unwrap_or(0);
        let last_col = (0..width)
            .rev()
            .find(|&c| self.rows.iter().any(|r| r.get(c).is_some_and(|v| !v.is_empty())))
            .unwrap_or(0);
        for row in &mut self.rows {
            row.truncate(last_col + 1);
            if first_col > 0 {
                row.drain(..first_col.min(row.len()));
            }
        }
        self.start.1 += first_col as u32;
    }

    /// True when no cell holds a value.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Used range as inclusive `((first_row, first_col), (last_row, last_col))`.
    pub fn used_range(&self) -> Option<((u32, u32), (u32, u32))> {
        if self.is_empty() {
            return None;
        }
        let height = self.rows.len() as u32;
        let width = self.width() as u32;
        Some((
            self.start,
            (self.start.0 + height - 1, self.start.1 + width.max(1) - 1),
        ))
    }

    /// Display string at an absolute position; `""` outside the used range.
    pub fn cell(&self, row: u32, col: u32) -> &str {
        if row < self.start.0 || col < self.start.1 {
            return "";
        }
        let r = (row - self.start.0) as usize;
        let c = (col - self.start.1) as usize;
        self.rows
            .get(r)
            .and_then(|cells| cells.get(c))
            .map_or("", String::as_str)
    }
}

/// Display string for a calamine cell.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_float(*f),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => e.to_string(),
        Data::DateTime(dt) => dt.as_datetime().map_or_else(
            || format_float(dt.as_f64()),
            |value| {
                if value.time() == chrono::NaiveTime::MIN {
                    value.date().to_string()
                } else {
                    value.to_string()
                }
            },
        ),
    }
}

/// Spreadsheet "General" display: at most 11 characters of digits, trailing
/// zeros dropped, scientific notation outside `1e-9..1e11`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    if value.fract() == 0.0 && magnitude < 1e11 {
        return format!("{value:.0}");
    }
    if magnitude >= 1e11 || magnitude < 1e-9 {
        return format_scientific(value);
    }

    let int_digits = if magnitude < 1.0 {
        1
    } else {
        magnitude.log10().floor() as usize + 1
    };
    let decimals = 10_usize.saturating_sub(int_digits);
    trim_fraction(&format!("{value:.decimals$}"))
}

fn format_scientific(value: f64) -> String {
    let formatted = format!("{value:.5E}");
    let (mantissa, exponent) = formatted
        .split_once('E')
        .unwrap_or((formatted.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}E{sign}{:02}", trim_fraction(mantissa), exponent.abs())
}

fn trim_fraction(number: &str) -> String {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        number.to_string()
    }
}

fn range_to_grid(range: &Range<Data>) -> SheetGrid {
    let Some(start) = range.start() else {
        return SheetGrid::default();
    };
    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    SheetGrid::new(start, rows)
}

/// A loaded workbook: sheet names in file order, each with its grid or the
/// reason it could not be decoded.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<(String, Result<SheetGrid, String>)>,
}

impl Workbook {
    /// Parse `bytes`, choosing the reader from `file_name`'s extension.
    pub fn from_bytes(file_name: &str, bytes: Vec<u8>) -> Result<Self, PreviewError> {
        match WorkbookFormat::from_file_name(file_name)? {
            WorkbookFormat::Spreadsheet => Self::from_spreadsheet(bytes),
            WorkbookFormat::Csv => Self::from_csv(&bytes),
        }
    }

    /// Read a workbook from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PreviewError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| PreviewError::Read(e.to_string()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        Self::from_bytes(file_name, bytes)
    }

    /// Wrap already decoded sheets.
    pub fn from_sheets(sheets: Vec<(String, SheetGrid)>) -> Self {
        Self {
            sheets: sheets.into_iter().map(|(name, grid)| (name, Ok(grid))).collect(),
        }
    }

    fn from_spreadsheet(bytes: Vec<u8>) -> Result<Self, PreviewError> {
        let mut reader = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        let sheets = reader
            .sheet_names()
            .into_iter()
            .map(|name| {
                let grid = match reader.worksheet_range(&name) {
                    Ok(range) => Ok(range_to_grid(&range)),
                    Err(err) => {
                        warn!(sheet = %name, error = %err, "Failed to decode sheet");
                        Err(err.to_string())
                    }
                };
                (name, grid)
            })
            .collect::<Vec<_>>();
        debug!(sheets = sheets.len(), "Loaded spreadsheet workbook");
        Ok(Self { sheets })
    }

    fn from_csv(bytes: &[u8]) -> Result<Self, PreviewError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(ToString::to_string).collect());
        }
        debug!(rows = rows.len(), "Loaded CSV workbook");
        Ok(Self {
            sheets: vec![("Sheet1".to_string(), Ok(SheetGrid::from_rows(rows)))],
        })
    }

    /// Sheet names in file order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// The first sheet, as extractors consume it.
    pub fn first_sheet(&self) -> Result<&SheetGrid, PreviewError> {
        let (name, grid) = self.sheets.first().ok_or(PreviewError::NoSheet)?;
        grid.as_ref().map_err(|reason| PreviewError::UnreadableSheet {
            sheet: name.clone(),
            reason: reason.clone(),
        })
    }

    /// A sheet by name.
    pub fn sheet(&self, name: &str) -> Option<Result<&SheetGrid, &str>> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, grid)| grid.as_ref().map_err(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(ToString::to_string).collect())
            .collect()
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            WorkbookFormat::from_file_name("harga.XLSX").unwrap(),
            WorkbookFormat::Spreadsheet
        );
        assert_eq!(WorkbookFormat::from_file_name("a.csv").unwrap(), WorkbookFormat::Csv);
        assert!(matches!(
            WorkbookFormat::from_file_name("notes.txt"),
            Err(PreviewError::UnsupportedFormat(_))
        ));
        assert!(WorkbookFormat::from_file_name("noext").is_err());
    }

    #[test]
    fn test_grid_shrinks_to_used_range() {
        let grid = SheetGrid::from_rows(strings(&[
            &["", "", ""],
            &["", "a", "b"],
            &["", "", "c", ""],
            &["", "", ""],
        ]));
        assert_eq!(grid.used_range(), Some(((1, 1), (2, 2))));
        assert_eq!(grid.cell(1, 1), "a");
        assert_eq!(grid.cell(2, 2), "c");
        assert_eq!(grid.cell(0, 0), "");
        assert_eq!(grid.cell(9, 9), "");
    }

    #[test]
    fn test_blank_grid_is_empty() {
        let grid = SheetGrid::from_rows(strings(&[&["", ""], &[""]]));
        assert!(grid.is_empty());
        assert_eq!(grid.used_range(), None);
    }

    #[test]
    fn test_csv_ragged_rows() {
        let workbook = Workbook::from_bytes("x.csv", b"a,b,c\n1\n2,3\n".to_vec()).unwrap();
        let grid = workbook.first_sheet().unwrap();
        assert_eq!(grid.used_range(), Some(((0, 0), (2, 2))));
        assert_eq!(grid.cell(1, 0), "1");
        assert_eq!(grid.cell(1, 2), "");
        assert_eq!(grid.cell(2, 1), "3");
    }

    #[test]
    fn test_empty_workbook_has_no_sheet() {
        let workbook = Workbook::default();
        assert!(matches!(workbook.first_sheet(), Err(PreviewError::NoSheet)));
    }

    #[test]
    fn test_unreadable_first_sheet() {
        let workbook = Workbook {
            sheets: vec![("Rusak".to_string(), Err("bad xml".to_string()))],
        };
        assert!(matches!(
            workbook.first_sheet(),
            Err(PreviewError::UnreadableSheet { .. })
        ));
        assert_eq!(workbook.sheet("Rusak"), Some(Err("bad xml")));
    }

    #[test]
    fn test_garbage_bytes_fail_to_read() {
        let result = Workbook::from_bytes("harga.xlsx", b"not a zip".to_vec());
        assert!(matches!(result, Err(PreviewError::Read(_))));
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Float(120.0)), "120");
        assert_eq!(cell_to_string(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_to_string(&Data::Float(-3.25)), "-3.25");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Bool(true)), "TRUE");
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("Padi".into())), "Padi");
    }

    #[test]
    fn test_computed_floats_use_general_display() {
        assert_eq!(cell_to_string(&Data::Float(38_000.0 / 3.0)), "12666.66667");
        assert_eq!(cell_to_string(&Data::Float(0.1 + 0.2)), "0.3");
        assert_eq!(cell_to_string(&Data::Float(2.0 / 3.0)), "0.666666667");
        assert_eq!(cell_to_string(&Data::Float(123_456_789_012.5)), "1.23457E+11");
        assert_eq!(cell_to_string(&Data::Float(0.000_000_000_12)), "1.2E-10");
    }
}
