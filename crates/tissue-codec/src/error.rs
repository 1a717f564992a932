//! Error types for tissue catalog codecs.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tissue_model::ModelError;

/// Errors that can occur when reading or writing tissue catalogs.
#[derive(Debug, Error)]
pub enum CodecError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Malformed field, unexpected token or truncated stream.
    #[error("invalid tissue data: {message}")]
    FormatViolation { message: String },

    /// Stored name length outside `0..=limit`.
    #[error("tissue {index}: name length {length} exceeds limit of {limit} bytes")]
    NameTooLong {
        index: usize,
        length: i64,
        limit: usize,
    },

    /// Text has no `N<count>` line, so it is not the readable format.
    #[error("not a readable tissue list: missing count line")]
    NotReadableText,

    /// Lookup table has no `0 Unknown` row.
    #[error("not a foreign lookup table: no `0 Unknown` row found")]
    NotForeignTable,

    /// Required entry absent from a hierarchical store.
    #[error("missing entry: {path}")]
    MissingEntry { path: String },

    /// Catalog model rejected the decoded records.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// JSON encoding of a hierarchical store failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    /// Create a FormatViolation error.
    pub fn format_violation(message: impl Into<String>) -> Self {
        Self::FormatViolation {
            message: message.into(),
        }
    }

    /// Create a MissingEntry error.
    pub fn missing_entry(path: impl Into<String>) -> Self {
        Self::MissingEntry { path: path.into() }
    }

    /// Whether the data was recognized but malformed.
    pub fn is_format_violation(&self) -> bool {
        matches!(
            self,
            Self::FormatViolation { .. } | Self::NameTooLong { .. } | Self::MissingEntry { .. }
        )
    }

    /// Whether the data is simply some other format.
    pub fn is_detection_failure(&self) -> bool {
        matches!(self, Self::NotReadableText | Self::NotForeignTable)
    }

    /// Map an I/O error from a stream read, turning truncation into a
    /// format violation.
    pub(crate) fn from_read(error: std::io::Error, what: &str) -> Self {
        if error.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::format_violation(format!("unexpected end of stream reading {what}"))
        } else {
            Self::Io(error)
        }
    }

    /// Map an error from opening `path`, reporting a missing file as such.
    pub fn from_open(error: std::io::Error, path: &Path) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::format_violation("bad token");
        assert_eq!(format!("{err}"), "invalid tissue data: bad token");

        let err = CodecError::NameTooLong {
            index: 3,
            length: 140,
            limit: 99,
        };
        assert_eq!(
            format!("{err}"),
            "tissue 3: name length 140 exceeds limit of 99 bytes"
        );
    }

    #[test]
    fn test_truncation_becomes_format_violation() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err = CodecError::from_read(io_err, "color");
        assert!(err.is_format_violation());

        let io_err = std::io::Error::other("disk");
        assert!(matches!(
            CodecError::from_read(io_err, "color"),
            CodecError::Io(_)
        ));
    }

    #[test]
    fn test_classification() {
        assert!(CodecError::NotForeignTable.is_detection_failure());
        assert!(CodecError::NotReadableText.is_detection_failure());
        assert!(!CodecError::NotForeignTable.is_format_violation());
    }
}
