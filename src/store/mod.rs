//! Stores a [`ForestTable`](crate::ForestTable) can read from.

#[cfg(feature = "postgres-sync")]
mod postgres_sync;
#[cfg(feature = "rusqlite")]
mod rusqlite;

use canopy_core::{Dialect, Result, Statement};

/// A connection that can run a rendered statement and map every returned row
/// into `T`.
///
/// Implemented for `rusqlite::Connection` and `rusqlite::Transaction`
/// (feature `rusqlite`) and for `postgres::Client` and
/// `postgres::Transaction` (feature `postgres-sync`).
pub trait Store<T> {
    /// Placeholder syntax the store expects.
    const DIALECT: Dialect;

    fn fetch_all(&mut self, statement: &Statement) -> Result<Vec<T>>;
}
