// Core infrastructure modules
pub mod core;

// Re-export the public surface at the crate root for convenience
pub use crate::core::db::connection;
pub use crate::core::db::query::{Querier, Row, Rows};
pub use crate::core::db::transaction::{
    transact, transact_with_result, TransactionHandle, TransactionSource,
};
pub use crate::core::{LitetxError, Result};
