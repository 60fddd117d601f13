//! Error types for content repository and taxonomy lookups

use std::error::Error;
use std::fmt;

/// Failure reported by a storage collaborator
///
/// The scorer never propagates these; a failed lookup only contributes no
/// candidates.
#[derive(Debug)]
pub enum StorageError {
    /// The backing store cannot be reached
    Connection(String),

    /// A candidate query was rejected or could not run
    Query(String),

    /// The requested item does not exist
    NotFound(String),

    /// The backend did not answer in time
    Timeout(String),

    /// Stored data could not be decoded
    Decode(String),

    /// Any other backend failure
    Backend(String),
}

impl StorageError {
    /// Whether retrying the same lookup later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Connection(_) | StorageError::Timeout(_))
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Connection(msg) => write!(f, "store unreachable: {}", msg),
            StorageError::Query(msg) => write!(f, "query failed: {}", msg),
            StorageError::NotFound(what) => write!(f, "{} not found", what),
            StorageError::Timeout(msg) => write!(f, "lookup timed out: {}", msg),
            StorageError::Decode(msg) => write!(f, "undecodable stored data: {}", msg),
            StorageError::Backend(msg) => write!(f, "backend failure: {}", msg),
        }
    }
}

impl Error for StorageError {}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::TimedOut => StorageError::Timeout(err.to_string()),
            std::io::ErrorKind::NotFound => StorageError::NotFound(err.to_string()),
            _ => StorageError::Connection(err.to_string()),
        }
    }
}

impl From<StorageError> for crate::RelataError {
    fn from(err: StorageError) -> Self {
        crate::RelataError::Storage(err.to_string())
    }
}
