//! Application-wide error types using thiserror.

use agrimon_common::AgriError;
use agrimon_views::ImportError;
use std::path::PathBuf;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration, network, API or spreadsheet failure.
    #[error(transparent)]
    Agri(#[from] AgriError),

    /// An import was refused before or during upload.
    #[error("{0}")]
    Import(#[from] ImportError),

    /// A panel request failed; carries the message the panel shows.
    #[error("{0}")]
    Panel(String),

    /// Reading an input or writing an output file failed.
    #[error("Cannot access {}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// A command line value is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl AppError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
