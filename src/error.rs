//! Crate-wide error type.
//!
//! Every fallible operation in the crate returns [`Error`]. Variants map
//! one-to-one onto the error kinds produced by the VFS engine, DocService,
//! and MessageStore; mapping onto transport status codes (HTTP, WebSocket
//! close codes) is left to the caller.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Named error kinds surfaced to callers.
#[derive(Debug, Error)]
pub enum Error {
    /// Filename failed [`crate::vfs::path::valid_name`].
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// Path could not be normalized.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Row or directory missing.
    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness violation on create or rename target.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Operation expected a file but found a directory.
    #[error("is a directory: {0}")]
    IsADirectory(String),

    /// Operation expected a directory but found a file.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Non-recursive `rmdir` on a non-empty directory.
    #[error("directory not empty: {0}")]
    NotEmpty(String),

    /// Attempted deletion of the root of a root_key.
    #[error("cannot delete root")]
    CannotDeleteRoot,

    /// Owner mismatch and not admin.
    #[error("not authorized")]
    NotAuthorized,

    /// Required configuration absent.
    #[error("missing configuration: {0}")]
    ConfigMissing(String),

    /// Signature verification failed.
    #[error("signature invalid")]
    SignatureInvalid,

    /// Publisher is on the blocklist.
    #[error("publisher blocked")]
    Blocked,

    /// Rename or save-file collision.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Anything else; wraps the original cause.
    #[error("internal error: {0}")]
    Internal(#[from] InternalCause),
}

/// Wrapped causes folded into [`Error::Internal`].
#[derive(Debug, Error)]
pub enum InternalCause {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Signature(#[from] ecdsa::Error),

    #[error("{0}")]
    Other(String),
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            let message = db_err.message().to_string();
            match db_err.code().as_deref() {
                Some("VFS01") => return Error::NotFound(message),
                Some("VFS02") => return Error::AlreadyExists(message),
                Some("VFS03") => return Error::NotAuthorized,
                Some("VFS04") => return Error::IsADirectory(message),
                Some("VFS05") => return Error::NotADirectory(message),
                Some("VFS06") => return Error::NotEmpty(message),
                Some("VFS07") => return Error::CannotDeleteRoot,
                // Residual TOCTOU race lost to a concurrent insert under
                // READ COMMITTED, past the function's own existence check.
                Some("23505") => return Error::AlreadyExists(message),
                _ => {}
            }
        }
        Error::Internal(InternalCause::Database(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(InternalCause::Json(e))
    }
}
