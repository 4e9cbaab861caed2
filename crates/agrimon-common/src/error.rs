//! Error types and utilities for agrimon.

use thiserror::Error;

/// Result type alias for agrimon operations.
pub type Result<T> = std::result::Result<T, AgriError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for agrimon operations.
#[derive(Error, Debug)]
pub enum AgriError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport level failures (connect, timeout, unreadable body)
    #[error("Network error: {message}")]
    Network {
        /// Human readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxedSource>,
    },

    /// The analytics API answered, but not with what we asked for
    #[error("Analytics API error: {message}")]
    Api {
        /// Message reported by the server, or a generic one
        message: String,
        /// HTTP status, when the failure came from a status line
        status_code: Option<u16>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Spreadsheet reading and preview errors
    #[error("Spreadsheet error: {message}")]
    Spreadsheet {
        /// Human readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxedSource>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        /// Human readable description
        message: String,
        /// Offending field, when known
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        /// Human readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxedSource>,
    },
}

impl AgriError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new analytics API error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api {
            message: msg.into(),
            status_code: None,
        }
    }

    /// Create a new analytics API error with status code
    pub fn api_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Api {
            message: msg.into(),
            status_code: Some(status),
        }
    }

    /// Create a new spreadsheet error
    pub fn spreadsheet(msg: impl Into<String>) -> Self {
        Self::Spreadsheet {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new spreadsheet error with source
    pub fn spreadsheet_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Spreadsheet {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// HTTP status attached to this error, if any.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// The text shown to the operator.
    ///
    /// Server and validation messages are surfaced verbatim, without the
    /// category prefix used by `Display`.
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, .. }
            | Self::Network { message, .. }
            | Self::Api { message, .. }
            | Self::Spreadsheet { message, .. }
            | Self::Validation { message, .. }
            | Self::Generic { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// Error conversion implementations for external types

/// Convert from reqwest::Error to AgriError
impl From<reqwest::Error> for AgriError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else if err.is_status() {
            let status_code = err.status().map_or(0, |s| s.as_u16());
            Self::network_with_source(format!("HTTP error: {status_code}"), err)
        } else {
            Self::network_with_source("Network request failed", err)
        }
    }
}

/// Convert from toml::de::Error to AgriError
impl From<toml::de::Error> for AgriError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}

/// Convert from serde_yaml::Error to AgriError
impl From<serde_yaml::Error> for AgriError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = AgriError::new("test message");
        assert!(error.to_string().contains("test message"));

        let config_error = AgriError::config("config issue");
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));

        let api_error = AgriError::api_with_status("Server error", 500);
        assert!(api_error.to_string().contains("Analytics API error"));
        assert_eq!(api_error.status_code(), Some(500));

        let validation_error = AgriError::validation_field("Invalid input", "tahun");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(validation_error.to_string().contains("Invalid input"));
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped_error = AgriError::with_source("Failed to read file", io_error);

        assert!(wrapped_error.to_string().contains("Failed to read file"));
        assert!(wrapped_error.source().is_some());

        let sheet_error = AgriError::spreadsheet_with_source(
            "Workbook unreadable",
            io::Error::new(io::ErrorKind::InvalidData, "bad zip"),
        );
        assert!(sheet_error.to_string().starts_with("Spreadsheet error"));
        assert!(sheet_error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let agri_error: AgriError = io_error.into();

        assert!(agri_error.to_string().contains("I/O error"));
        assert!(agri_error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_error = serde_json::from_str::<serde_json::Value>(r#"{"invalid": json}"#)
            .unwrap_err();
        let agri_error: AgriError = serde_error.into();

        assert!(agri_error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_user_message_strips_category() {
        let error = AgriError::api_with_status("File harus berformat .xlsx", 422);
        assert_eq!(error.user_message(), "File harus berformat .xlsx");
        assert_eq!(
            error.to_string(),
            "Analytics API error: File harus berformat .xlsx"
        );

        let io_error: AgriError = io::Error::new(io::ErrorKind::Other, "disk").into();
        assert_eq!(io_error.user_message(), "I/O error: disk");
    }

    #[test]
    fn test_status_code_only_on_api_errors() {
        assert_eq!(AgriError::network("down").status_code(), None);
        assert_eq!(AgriError::api("no status").status_code(), None);
    }
}
