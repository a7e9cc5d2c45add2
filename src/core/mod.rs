/// Core Module for litetx
///
/// This module contains the fundamental components of the crate: the
/// capability traits and transaction runner that make up the database
/// layer, and the shared error type used for propagation throughout.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{LitetxError, Result};
