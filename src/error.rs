//! Error types for shape preparation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a preparation run. None of them are recoverable.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// Input absent, unreadable, or not a usable GeoJSON document.
    #[error("data format error in {source_name}: {message}")]
    DataFormat { source_name: String, message: String },

    /// A record is missing the expected field, or the field is not text.
    #[error("schema error in record {record}: field `{field}` {reason}")]
    Schema {
        record: usize,
        field: String,
        reason: &'static str,
    },

    /// Output could not be written.
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file unreadable or invalid.
    #[error("config error: {message}")]
    Config { message: String },

    /// Strict mode refuses lossy transliteration.
    #[error("{count} character(s) had no ASCII transliteration")]
    Strict { count: usize },
}

impl ShapeError {
    pub(crate) fn data_format(source_name: &str, message: impl Into<String>) -> Self {
        ShapeError::DataFormat {
            source_name: source_name.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for shape preparation.
pub type Result<T> = std::result::Result<T, ShapeError>;
