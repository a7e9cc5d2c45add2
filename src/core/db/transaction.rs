/// Transaction Runner Module
///
/// This module provides the transaction-source capability and the two
/// entry points that run caller-supplied work inside a transaction,
/// guaranteeing exactly one terminal action (commit or rollback) on every
/// exit path: normal return, error return, or panic.
use crate::core::{LitetxError, Result};
use rusqlite::Connection;
use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

use super::query::Querier;

/// An open transaction. Consuming `self` in both terminal operations makes
/// issuing more than one terminal action a compile error.
pub trait TransactionHandle {
    /// Makes the transaction's effects durable
    fn commit(self) -> Result<()>;

    /// Discards the transaction's effects
    fn rollback(self) -> Result<()>;
}

/// A resource capable of starting a new transaction.
///
/// The handle type is lifetime-bound to the source, so a transaction can
/// never outlive the connection it runs on.
pub trait TransactionSource {
    type Tx<'conn>: TransactionHandle + Querier
    where
        Self: 'conn;

    /// Opens a transaction. Fails with `LitetxError::Begin` if the
    /// underlying resource cannot start one; in that case no transaction
    /// exists and no cleanup runs.
    fn begin(&mut self) -> Result<Self::Tx<'_>>;
}

impl TransactionSource for Connection {
    type Tx<'conn> = rusqlite::Transaction<'conn>
    where
        Self: 'conn;

    fn begin(&mut self) -> Result<Self::Tx<'_>> {
        self.transaction().map_err(LitetxError::Begin)
    }
}

impl TransactionHandle for rusqlite::Transaction<'_> {
    fn commit(self) -> Result<()> {
        rusqlite::Transaction::commit(self).map_err(|e| {
            if is_interrupted(&e) {
                LitetxError::CommitInterrupted(e)
            } else {
                LitetxError::Commit(e)
            }
        })
    }

    fn rollback(self) -> Result<()> {
        rusqlite::Transaction::rollback(self).map_err(LitetxError::Rollback)
    }
}

/// An interrupt landing while a commit is pending leaves the transaction's
/// fate ambiguous, so it gets a distinct error variant.
fn is_interrupted(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: rusqlite::ErrorCode::OperationInterrupted,
                ..
            },
            _,
        )
    )
}

/// Runs `work` inside a transaction and returns its result.
///
/// The transaction is opened on `db`, the work function is invoked with the
/// transaction handle as a `&dyn Querier`, and the transaction's fate is
/// resolved from the outcome:
///
/// - `Ok(value)`: the transaction is committed and `value` is returned. If
///   the commit itself fails, `value` is discarded and the commit error is
///   returned; a non-`Ok` result is always authoritative.
/// - `Err(e)`: the transaction is rolled back and `e` is returned verbatim.
///   A failure of the rollback itself is logged, not surfaced; the work
///   function's error stays the primary one.
/// - panic: the transaction is rolled back, then the original panic payload
///   is re-raised unchanged. The panic is never converted into an `Err` and
///   never swallowed, even if the rollback also fails.
///
/// If `begin` fails, that error is returned and `work` is never invoked.
///
/// The handle passed to `work` must not be retained beyond the call; it is
/// owned by the runner and terminated before this function returns.
pub fn transact_with_result<Db, T, F>(db: &mut Db, work: F) -> Result<T>
where
    Db: TransactionSource,
    F: FnOnce(&dyn Querier) -> Result<T>,
{
    let tx = db.begin()?;

    match panic::catch_unwind(AssertUnwindSafe(|| work(&tx))) {
        Err(payload) => {
            if let Err(rollback_err) = tx.rollback() {
                warn!("Rollback after panic failed: {}", rollback_err);
            }
            panic::resume_unwind(payload)
        }
        Ok(Err(err)) => {
            if let Err(rollback_err) = tx.rollback() {
                warn!("Rollback failed, returning original error: {}", rollback_err);
            }
            Err(err)
        }
        Ok(Ok(value)) => {
            tx.commit()?;
            Ok(value)
        }
    }
}

/// Runs `work` inside a transaction, for work that produces no value.
///
/// Identical semantics to [`transact_with_result`] instantiated at `()`.
pub fn transact<Db, F>(db: &mut Db, work: F) -> Result<()>
where
    Db: TransactionSource,
    F: FnOnce(&dyn Querier) -> Result<()>,
{
    transact_with_result(db, work)
}
