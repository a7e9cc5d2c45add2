/// Database Module
///
/// This module provides the database layer of litetx, organized into
/// focused submodules for separation of concerns.
///
/// ## Architecture
///
/// The layer is split into three concerns:
/// - **Connection Management** (`connection.rs`): Opens configured SQLite connections
/// - **Query Capability** (`query.rs`): The `Querier` trait and materialized result types
/// - **Transaction Runner** (`transaction.rs`): The transaction-source capability and the
///   `transact`/`transact_with_result` entry points
///
/// ## Error Handling
///
/// All operations use the standardized `LitetxError` type for consistent
/// error propagation.
pub mod connection;
pub mod query;
pub mod transaction;

pub use connection::*;
pub use query::*;
pub use transaction::*;
