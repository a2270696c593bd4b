//! Error types for document store operations.

use thiserror::Error;

/// Errors that can occur while reading or writing records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The collection name was empty.
    #[error("missing collection: no place to save or read the record")]
    MissingCollection,

    /// The resource key was empty.
    #[error("missing resource: unable to address the record")]
    MissingResource,

    /// A collection name or resource key is not a safe path segment.
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// The collection directory does not exist.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// No record file exists for the key.
    #[error("record not found: {collection}/{key}")]
    RecordNotFound { collection: String, key: String },

    /// The value could not be encoded to JSON.
    #[error("encode error: {0}")]
    Encode(String),

    /// The stored bytes could not be decoded into the requested type.
    #[error("decode error: {0}")]
    Decode(String),

    /// I/O error from the underlying filesystem.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Returns `true` for errors raised before any I/O because an argument
    /// was empty or unsafe.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::MissingCollection | Self::MissingResource | Self::InvalidName { .. }
        )
    }

    /// Returns `true` when the collection or record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CollectionNotFound(_) | Self::RecordNotFound { .. }
        )
    }
}

/// Convenience type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
