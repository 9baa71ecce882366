//! Storage error types

use thiserror::Error;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Errors raised while saving or restoring snapshots
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Snapshot not found: {0}")]
    NotFound(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Snapshot format version {found} is not supported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },

    /// The backend failed outside its own error types (e.g. a poisoned lock)
    #[error("Snapshot backend failure: {0}")]
    Backend(String),

    /// Graph encoding (bincode)
    #[error("Snapshot encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    /// Header encoding (JSON)
    #[error("Snapshot header error: {0}")]
    Header(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "redb")]
    #[error("ReDB error: {0}")]
    Redb(#[from] ::redb::Error),
}

/// Every redb error kind funnels into [`StorageError::Redb`]
#[cfg(feature = "redb")]
macro_rules! from_redb {
    ($($kind:ty),* $(,)?) => {
        $(
            impl From<$kind> for StorageError {
                fn from(e: $kind) -> Self {
                    Self::Redb(e.into())
                }
            }
        )*
    };
}

#[cfg(feature = "redb")]
from_redb!(
    ::redb::DatabaseError,
    ::redb::TableError,
    ::redb::StorageError,
    ::redb::CommitError,
    ::redb::TransactionError,
);
