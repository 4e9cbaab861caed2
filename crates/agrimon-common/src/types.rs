//! Common type definitions and newtype wrappers for domain modeling.

use crate::error::{AgriError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// A calendar month, 1 through 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Month(u32);

impl Month {
    /// January.
    pub const FIRST: Self = Self(1);
    /// December.
    pub const LAST: Self = Self(12);

    /// Creates a month, rejecting values outside 1..=12.
    pub fn new(month: u32) -> Result<Self> {
        if (1..=12).contains(&month) {
            Ok(Self(month))
        } else {
            Err(AgriError::validation_field(
                format!("Month must be between 1 and 12, got {month}"),
                "bulan",
            ))
        }
    }

    /// Month number, 1-based.
    pub const fn number(self) -> u32 {
        self.0
    }

    /// Indonesian month name, e.g. "Agustus".
    pub fn name(self) -> &'static str {
        MONTH_NAMES[(self.0 - 1) as usize]
    }

    /// Three letter abbreviation, e.g. "Agu".
    pub fn abbr(self) -> &'static str {
        &self.name()[..3]
    }
}

impl TryFrom<u32> for Month {
    type Error = AgriError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Month> for u32 {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive range of months within one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    /// First month of the period.
    pub start: Month,
    /// Last month of the period.
    pub end: Month,
}

impl MonthRange {
    /// Creates a range; `start` must not come after `end`.
    pub fn new(start: Month, end: Month) -> Result<Self> {
        if start > end {
            return Err(AgriError::validation_field(
                format!("Period start ({start}) is after period end ({end})"),
                "bulan_mulai",
            ));
        }
        Ok(Self { start, end })
    }

    /// January through December.
    pub const fn full_year() -> Self {
        Self {
            start: Month::FIRST,
            end: Month::LAST,
        }
    }

    /// Number of months covered.
    pub const fn len(&self) -> u32 {
        self.end.number() - self.start.number() + 1
    }

    /// Always false; a range covers at least one month.
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl Default for MonthRange {
    fn default() -> Self {
        Self::full_year()
    }
}

impl fmt::Display for MonthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} - {}", self.start, self.end)
        }
    }
}

/// One choice in a filter drop-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Value sent to the API.
    pub value: String,
    /// Text shown to the operator.
    pub label: String,
}

impl FilterOption {
    /// Creates an option with distinct value and label.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Creates an option whose label is its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

impl fmt::Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds() {
        assert!(Month::new(0).is_err());
        assert!(Month::new(13).is_err());
        assert_eq!(Month::new(8).unwrap().name(), "Agustus");
        assert_eq!(Month::new(5).unwrap().abbr(), "Mei");
    }

    #[test]
    fn test_month_serde_validates() {
        let month: Month = serde_json::from_str("3").unwrap();
        assert_eq!(month.number(), 3);
        assert!(serde_json::from_str::<Month>("14").is_err());
        assert_eq!(serde_json::to_string(&month).unwrap(), "3");
    }

    #[test]
    fn test_month_range() {
        let range = MonthRange::new(Month::new(1).unwrap(), Month::new(8).unwrap()).unwrap();
        assert_eq!(range.len(), 8);
        assert_eq!(range.to_string(), "Januari - Agustus");
        assert!(MonthRange::new(Month::LAST, Month::FIRST).is_err());
        assert_eq!(MonthRange::default().len(), 12);
    }

    #[test]
    fn test_filter_option_plain() {
        let option = FilterOption::plain("2024");
        assert_eq!(option.value, "2024");
        assert_eq!(option.to_string(), "2024");
    }
}
