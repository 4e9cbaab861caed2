//! Display formatting helpers shared by charts, views and the CLI.

use crate::types::Month;
use chrono::{Datelike, NaiveDate};

/// Formats a number with `.` thousands separators and `,` decimals,
/// the way Indonesian readers expect (`12.345,68`).
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .map_or((formatted.as_str(), None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    if let Some(frac) = frac_part {
        grouped.push(',');
        grouped.push_str(frac);
    }

    if value < 0.0 && grouped.chars().any(|c| c.is_ascii_digit() && c != '0') {
        grouped.insert(0, '-');
    }
    grouped
}

/// Formats a price in rupiah, rounded to whole rupiah.
pub fn format_rupiah(value: f64) -> String {
    format!("Rp {}", format_grouped(value, 0))
}

/// Formats a percentage with two decimals, e.g. `85.50%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Formats a date in Indonesian long form, e.g. `1 Agustus 2025`.
pub fn format_date_id(date: NaiveDate) -> String {
    let month = Month::new(date.month()).map_or("", Month::name);
    format!("{} {} {}", date.day(), month, date.year())
}
