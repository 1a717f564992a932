//! Error type for catalog sessions.

use thiserror::Error;
use tissue_codec::CodecError;
use tissue_model::ModelError;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Reading or writing a catalog file failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A catalog operation was rejected.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Whether the input was malformed, as opposed to missing or unreadable.
    pub fn is_format_violation(&self) -> bool {
        matches!(self, Self::Codec(err) if err.is_format_violation())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Codec(CodecError::FileNotFound { .. }))
    }
}
