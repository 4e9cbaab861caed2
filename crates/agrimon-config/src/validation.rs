//! Validation rules that the derive attributes cannot express on their own.

use crate::schema::{Config, FilterDefaults, MergedHeaderSettings, ViewportSettings};
use regex::Regex;
use std::sync::LazyLock;
use validator::{Validate, ValidationError, ValidationErrors};

/// Regex pattern for `#rrggbb` color codes.
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// The plot area must have positive width and height.
pub fn validate_viewport(viewport: &ViewportSettings) -> Result<(), ValidationError> {
    let finite = [viewport.x_start, viewport.x_end, viewport.y_start, viewport.y_end]
        .iter()
        .all(|v| v.is_finite());
    if !finite {
        return Err(ValidationError::new("non_finite_viewport"));
    }
    if viewport.x_end <= viewport.x_start || viewport.y_end <= viewport.y_start {
        return Err(ValidationError::new("empty_viewport"));
    }
    Ok(())
}

/// Group header, sub header and first data row must appear in that order.
pub fn validate_header_rows(rows: &MergedHeaderSettings) -> Result<(), ValidationError> {
    if rows.group_row < rows.sub_row && rows.sub_row < rows.data_start_row {
        Ok(())
    } else {
        Err(ValidationError::new("unordered_header_rows"))
    }
}

/// Validate a log level name.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

/// Validate an accepted upload extension such as `.xlsx`.
pub fn validate_extension(extension: &str) -> Result<(), ValidationError> {
    let valid = extension.len() > 1
        && extension.starts_with('.')
        && extension[1..].chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_extension"))
    }
}

fn validate_filters(filters: &FilterDefaults, errors: &mut ValidationErrors) {
    let lists = [
        ("commodities", &filters.commodities),
        ("production_commodities", &filters.production_commodities),
        ("years", &filters.years),
        ("price_types", &filters.price_types),
    ];
    for (field, options) in lists {
        if options.is_empty() {
            errors.add(field, ValidationError::new("empty_filter_options"));
        }
    }

    if !filters
        .price_types
        .iter()
        .any(|option| option.value == filters.default_price_type)
    {
        errors.add("default_price_type", ValidationError::new("unknown_price_type"));
    }
}

impl Config {
    /// Run the derived rules plus the cross-field checks.
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.validate()?;

        let mut errors = ValidationErrors::new();

        if let Err(err) = validate_log_level(&self.logging.level) {
            errors.add("logging_level", err);
        }

        for extension in &self.preview.accepted_extensions {
            if let Err(mut err) = validate_extension(extension) {
                err.add_param("value".into(), extension);
                errors.add("accepted_extensions", err);
            }
        }

        validate_filters(&self.filters, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
