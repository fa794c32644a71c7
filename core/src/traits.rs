//! Core traits: SQL conversion and the record capabilities a forest needs.

use core::hash::Hash;

use crate::{error::Result, sql::SQL, values::Value};

/// Trait for types that can be converted to SQL fragments.
pub trait ToSQL {
    fn to_sql(&self) -> SQL;

    /// Consume self and return SQL without cloning.
    /// Default delegates to `to_sql()` (which clones). Types that own their SQL
    /// override this to avoid the clone.
    fn into_sql(self) -> SQL
    where
        Self: Sized,
    {
        self.to_sql()
    }
}

impl ToSQL for SQL {
    fn to_sql(&self) -> SQL {
        self.clone()
    }

    fn into_sql(self) -> SQL {
        self
    }
}

impl<T: ToSQL + ?Sized> ToSQL for &T {
    fn to_sql(&self) -> SQL {
        (**self).to_sql()
    }
}

impl ToSQL for Value {
    fn to_sql(&self) -> SQL {
        SQL::param(self.clone())
    }

    fn into_sql(self) -> SQL {
        SQL::param(self)
    }
}

impl ToSQL for str {
    fn to_sql(&self) -> SQL {
        SQL::param(self)
    }
}

macro_rules! impl_to_sql_param {
    ($($ty:ty),*) => { $(
        impl ToSQL for $ty {
            fn to_sql(&self) -> SQL {
                SQL::param(self.clone())
            }
        }
    )* }
}

impl_to_sql_param!(i8, i16, i32, i64, u8, u16, u32, bool, f32, f64, String, Vec<u8>);

impl<T: Clone + Into<Value>> ToSQL for Option<T> {
    fn to_sql(&self) -> SQL {
        SQL::param(self.clone())
    }
}

/// A record that can be linked into a forest.
///
/// Implementors expose their primary key and the parent reference stored in
/// the adjacency-list column. Children are never stored on the record; the
/// [`Forest`](crate::forest::Forest) arena owns the links.
pub trait ForestRecord: Sized {
    /// Primary key type. Converted into a [`Value`] when a query filters on it.
    type Id: Clone + Eq + Hash + Into<Value>;

    /// The record's primary key.
    fn id(&self) -> Self::Id;

    /// The parent reference, `None` for a root.
    fn parent_id(&self) -> Option<Self::Id>;
}

/// Extracts a record from a database row.
///
/// Implement it for every row type the record should load from, e.g.
/// `impl FromRow<rusqlite::Row<'_>> for Location`.
#[diagnostic::on_unimplemented(
    message = "cannot build `{Self}` from a database row",
    label = "this type does not implement FromRow for the store's row type"
)]
pub trait FromRow<Row: ?Sized>: Sized {
    fn from_row(row: &Row) -> Result<Self>;
}
