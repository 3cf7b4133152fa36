//! Error types for the store layer.

use crate::storage::StorageError;
use crate::types::SessionId;
use thiserror::Error;

/// Errors returned by auth and session store operations.
///
/// All variants are recoverable at the call site; the stores never retry and
/// never swallow an error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage medium failed or a value could not be (de)serialized.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    /// No user with the given email exists.
    #[error("user not found: {0}")]
    UserNotFound(String),
    /// A user with the given email already exists.
    #[error("user already exists: {0}")]
    UserExists(String),
    /// Session id is unknown to the store.
    #[error("unknown session: {0}")]
    UnknownSession(SessionId),
    /// A mutating operation was attempted with no current user.
    #[error("not authenticated")]
    AuthRequired,
}
