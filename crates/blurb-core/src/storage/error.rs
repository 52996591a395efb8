//! Storage error handling
//!
//! Provides typed errors for record store operations. Discovery-style
//! lookups never surface a not-found error (they resolve to an absent
//! value); mutators that target a specific record by id raise
//! [`StoreError::BookNotFound`], and every storage failure surfaces as a
//! typed error instead of being logged and swallowed.

use std::io;

use thiserror::Error;

/// A failure inside the key-value medium itself
#[derive(Error, Debug)]
#[error("storage medium failure on key '{key}': {source}")]
pub struct MediumError {
    /// The key being accessed when the failure occurred
    pub key: String,
    #[source]
    pub source: io::Error,
}

impl MediumError {
    pub fn new(key: impl Into<String>, source: io::Error) -> Self {
        Self {
            key: key.into(),
            source,
        }
    }

    /// Wrap a plain message as a medium failure
    pub fn message(key: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source: io::Error::other(msg.into()),
        }
    }
}

/// Errors that can occur during record store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The medium could not be read
    #[error("storage unavailable: failed to read key '{key}': {source}")]
    StorageUnavailable {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The medium rejected or lost a write
    #[error("storage write failed for key '{key}': {source}")]
    StorageWriteError {
        key: String,
        #[source]
        source: io::Error,
    },

    /// A mutating operation referenced a book id that does not exist
    #[error("book not found: '{id}'")]
    BookNotFound { id: String },

    /// A required field was empty or missing
    #[error("validation failed: {0}")]
    Validation(String),

    /// Persisted data under a key could not be encoded or decoded
    #[error("invalid record data under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Classify a medium failure on the read path
    pub fn unavailable(err: MediumError) -> Self {
        StoreError::StorageUnavailable {
            key: err.key,
            source: err.source,
        }
    }

    /// Classify a medium failure on the write path
    pub fn write(err: MediumError) -> Self {
        StoreError::StorageWriteError {
            key: err.key,
            source: err.source,
        }
    }

    /// Whether retrying the same call could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::StorageUnavailable { .. } | StoreError::StorageWriteError { .. }
        )
    }
}

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;
