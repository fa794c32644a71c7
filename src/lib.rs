//! # Canopy
//!
//! Loads adjacency-list tables (`id`, `parent_id`) as linked forests, using one
//! recursive query per call instead of a query per node.
//!
//! ## Quick Start
//!
//! ```rust
//! use canopy::prelude::*;
//!
//! #[derive(Debug)]
//! struct Location {
//!     id: i64,
//!     parent_id: Option<i64>,
//!     name: String,
//! }
//!
//! impl ForestRecord for Location {
//!     type Id = i64;
//!
//!     fn id(&self) -> i64 {
//!         self.id
//!     }
//!
//!     fn parent_id(&self) -> Option<i64> {
//!         self.parent_id
//!     }
//! }
//!
//! impl FromRow<rusqlite::Row<'_>> for Location {
//!     fn from_row(row: &rusqlite::Row<'_>) -> canopy::Result<Self> {
//!         Ok(Self {
//!             id: row.get("id")?,
//!             parent_id: row.get("parent_id")?,
//!             name: row.get("name")?,
//!         })
//!     }
//! }
//!
//! # fn main() -> canopy::Result<()> {
//! let mut conn = rusqlite::Connection::open_in_memory()?;
//! conn.execute_batch(
//!     "CREATE TABLE locations (id INTEGER PRIMARY KEY, parent_id INTEGER, name TEXT NOT NULL);
//!      INSERT INTO locations VALUES (1, NULL, 'USA'), (2, 1, 'Illinois'), (3, 2, 'Chicago');",
//! )?;
//!
//! let locations = ForestTable::<Location>::new(
//!     ForestConfig::builder("locations").order("name").build()?,
//! );
//!
//! let usa = locations.find_tree(&mut conn, 1)?;
//! let names: Vec<_> = usa.root().descendants().iter().map(|n| n.name.clone()).collect();
//! assert_eq!(names, ["Illinois", "Chicago"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Database Support
//!
//! | Database   | Driver   | Feature Flag    |
//! |------------|----------|-----------------|
//! | SQLite     | rusqlite | `rusqlite`      |
//! | PostgreSQL | postgres | `postgres-sync` |

mod store;
mod table;

pub use store::Store;
pub use table::ForestTable;

/// Result type for forest operations
pub use canopy_core::error::Result;

/// Error types
pub mod error {
    pub use canopy_core::error::CanopyError;
}

/// Core types shared by every store.
pub mod core {
    pub use canopy_core::{
        Dialect, SQL, SQLChunk, Statement, Token, ToSQL, Value,
        config::{Dependent, Direction, ForestConfig, ForestConfigBuilder, ForestOptions, Ident, OrderTerm},
        cte,
        forest::{Forest, Node, NodeId, Tree, materialize},
        scope::Scope,
        traits::{ForestRecord, FromRow},
    };

    /// Filter conditions for scopes.
    ///
    /// ```rust
    /// use canopy::core::{Scope, expr::{col, eq, is_null, or}};
    ///
    /// let scope = Scope::all().filter(or([eq(col("name"), "USA"), is_null(col("parent_id"))]));
    /// assert_eq!(scope.to_predicate_sql().sql(), r#"("name" = ?) OR ("parent_id" IS NULL)"#);
    /// ```
    pub use canopy_core::expressions as expr;
}

pub mod prelude {
    pub use crate::core::expr::*;
    pub use crate::core::{
        Dependent, Forest, ForestConfig, ForestRecord, FromRow, Node, Scope, Tree,
    };
    pub use crate::error::CanopyError;
    pub use crate::{ForestTable, Store};
}
