/// Error Module
///
/// This module defines the error types for litetx. It provides structured
/// error handling with proper error propagation, distinguishing the phases
/// of a transaction's lifecycle so callers can tell a failed begin from a
/// failed commit from an ordinary query error.
use thiserror::Error;

/// Error type covering every failure litetx can produce.
///
/// The transaction lifecycle variants (`Begin`, `Commit`, `Rollback`) wrap
/// the underlying driver error rather than converting it, so the original
/// SQLite diagnostics remain available to the caller.
#[derive(Error, Debug)]
pub enum LitetxError {
    /// Driver errors from SQLite operations outside transaction control
    /// (statement preparation, query execution, value conversion)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A transaction could not be opened. No transaction exists after this
    /// error and no cleanup is required.
    #[error("Failed to begin transaction: {0}")]
    Begin(rusqlite::Error),

    /// Commit failed. The transaction's effects were not made durable.
    #[error("Failed to commit transaction: {0}")]
    Commit(rusqlite::Error),

    /// Commit was interrupted while pending. The transaction's fate is
    /// ambiguous: it may or may not have been made durable. Callers that
    /// need certainty must inspect the database state themselves.
    #[error("Commit interrupted, transaction fate unknown: {0}")]
    CommitInterrupted(rusqlite::Error),

    /// Rollback failed. Only surfaced when rollback is the primary action;
    /// a rollback failure while handling a work error is logged instead.
    #[error("Failed to roll back transaction: {0}")]
    Rollback(rusqlite::Error),

    /// Caller-level query or business errors raised from work functions
    #[error("Query error: {0}")]
    Query(String),
}

/// Type alias for Result to use LitetxError as the error type.
pub type Result<T> = std::result::Result<T, LitetxError>;
