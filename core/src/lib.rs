//! Core building blocks for loading adjacency-list tables as forests.
//!
//! This crate renders the recursive queries and links the returned rows; it
//! never talks to a database itself. See the `canopy` crate for the store
//! integrations and the user-facing table API.

pub mod config;
pub mod cte;
pub mod dialect;
pub mod error;
pub mod expressions;
pub mod forest;
pub mod scope;
pub mod sql;
pub mod traits;
pub mod tracing;
pub mod values;

// Re-export key types and traits
pub use config::{Dependent, Direction, ForestConfig, ForestConfigBuilder, ForestOptions, Ident, OrderTerm};
pub use dialect::Dialect;
pub use error::{CanopyError, Result};
pub use forest::{Forest, Node, NodeId, Tree, materialize};
pub use scope::Scope;
pub use sql::{SQL, SQLChunk, Statement, Token};
pub use traits::{ForestRecord, FromRow, ToSQL};
pub use values::Value;
