//! Composable filters over a forest table.

use crate::{
    config::{ForestConfig, Ident},
    cte,
    expressions::{and, in_subquery},
    sql::{SQL, Token},
    traits::ToSQL,
};

/// A deferred filter over the base table: AND-ed conditions plus an optional
/// projection.
///
/// Scopes are plain values. Every operation that reads the table takes one
/// explicitly, and nothing is cached between calls.
///
/// ```
/// # use canopy_core::{Scope, expressions::{col, eq}};
/// let scope = Scope::all().filter(eq(col("name"), "USA"));
/// assert_eq!(scope.to_predicate_sql().sql(), r#""name" = ?"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    conditions: Vec<SQL>,
    projection: Option<SQL>,
    closure_depth: usize,
}

impl Scope {
    /// The unfiltered table.
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds a condition. Empty conditions are ignored.
    pub fn filter(mut self, condition: impl ToSQL) -> Self {
        let condition = condition.into_sql();
        if !condition.is_empty() {
            self.conditions.push(condition);
        }
        self
    }

    /// Intersects two scopes. The projection of `self` is kept.
    pub fn and(mut self, other: Scope) -> Self {
        self.conditions.extend(other.conditions);
        self.closure_depth = self.closure_depth.max(other.closure_depth);
        if self.projection.is_none() {
            self.projection = other.projection;
        }
        self
    }

    /// Replaces the projection.
    pub fn select<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToSQL,
    {
        let columns = SQL::join(columns, Token::COMMA);
        self.projection = (!columns.is_empty()).then_some(columns);
        self
    }

    /// Extends the scope to every row reachable by following child links from
    /// the rows it currently matches.
    ///
    /// The result is an ordinary scope: further filters AND onto the closed
    /// set, and calling this again closes over the new subset.
    pub fn with_descendants(self, config: &ForestConfig) -> Scope {
        let depth = self.closure_depth + 1;
        let ids = cte::descendant_ids(config, &self);
        Scope {
            conditions: vec![in_subquery(config.primary_key_column(), ids)],
            projection: None,
            closure_depth: depth,
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Number of descendant closures nested in this scope's conditions.
    pub fn closure_depth(&self) -> usize {
        self.closure_depth
    }

    pub fn conditions(&self) -> &[SQL] {
        &self.conditions
    }

    /// The AND of all conditions, empty when unfiltered.
    pub fn to_predicate_sql(&self) -> SQL {
        and(self.conditions.iter().cloned())
    }

    /// `SELECT <projection | *> FROM "table" [WHERE <predicate>]`
    pub fn to_select_sql(&self, table: &Ident) -> SQL {
        let projection = self
            .projection
            .clone()
            .unwrap_or_else(|| SQL::token(Token::STAR));

        let sql = SQL::token(Token::SELECT)
            .append(projection)
            .push(Token::FROM)
            .append(table.to_sql());

        let predicate = self.to_predicate_sql();
        if predicate.is_empty() {
            sql
        } else {
            sql.push(Token::WHERE).append(predicate)
        }
    }
}
