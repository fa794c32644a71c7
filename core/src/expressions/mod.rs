//! Column references and filter conditions.

pub mod conditions;

pub use conditions::*;

use compact_str::CompactString;

use crate::{sql::SQL, traits::ToSQL};

/// A column reference, optionally qualified by its table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    table: Option<CompactString>,
    name: CompactString,
}

impl Column {
    /// An unqualified column: renders as `"name"`.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }

    /// A table-qualified column: renders as `"table"."name"`.
    pub fn qualified(table: impl Into<CompactString>, name: impl Into<CompactString>) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }
}

impl ToSQL for Column {
    fn to_sql(&self) -> SQL {
        match &self.table {
            Some(table) => SQL::qualified(table.clone(), self.name.clone()),
            None => SQL::ident(self.name.clone()),
        }
    }
}

/// Shorthand for an unqualified [`Column`].
///
/// ```
/// use canopy_core::expressions::{col, eq};
///
/// let condition = eq(col("name"), "USA");
/// assert_eq!(condition.sql(), r#""name" = ?"#);
/// ```
pub fn col(name: impl Into<CompactString>) -> Column {
    Column::new(name)
}
