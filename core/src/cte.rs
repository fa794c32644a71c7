//! Recursive descendant queries.
//!
//! Both query shapes share one CTE:
//!
//! ```sql
//! WITH RECURSIVE "all_nodes" AS (
//!     SELECT "t"."id", "t"."parent_id" FROM "t" WHERE <scope>
//!     UNION
//!     SELECT "t"."id", "t"."parent_id" FROM "t"
//!     INNER JOIN "all_nodes" ON "t"."parent_id" = "all_nodes"."id"
//! )
//! ```
//!
//! `UNION` deduplicates (id, parent) tuples, so cyclic parent links reach a
//! fixed point instead of recursing forever.

use compact_str::{CompactString, format_compact};

use crate::{
    config::{ForestConfig, Ident},
    scope::Scope,
    sql::{SQL, SQLChunk, Token},
    traits::ToSQL,
};

const CTE_BASE_NAME: &str = "all_nodes";

/// Working table name for a CTE built over `scope`.
///
/// Scopes that already nest `n` descendant closures get `all_nodes_n`, so an
/// inner CTE is never shadowed by the one wrapping it.
pub fn cte_name(scope: &Scope) -> CompactString {
    match scope.closure_depth() {
        0 => CompactString::const_new(CTE_BASE_NAME),
        n => format_compact!("{CTE_BASE_NAME}_{n}"),
    }
}

/// A `WITH RECURSIVE` definition collecting the scope's rows and every row
/// below them.
#[derive(Debug, Clone)]
pub struct RecursiveCte {
    name: CompactString,
    anchor: SQL,
    recursive: SQL,
}

impl RecursiveCte {
    pub fn new(config: &ForestConfig, scope: &Scope) -> Self {
        let name = cte_name(scope);
        let table = config.table();
        let id_and_parent = || [config.primary_key_column(), config.foreign_key_column()];

        let anchor = scope.clone().select(id_and_parent()).to_select_sql(table);

        let recursive = SQL::token(Token::SELECT)
            .append(SQL::join(id_and_parent(), Token::COMMA))
            .push(Token::FROM)
            .append(table.to_sql())
            .push(Token::INNER)
            .push(Token::JOIN)
            .push(SQLChunk::ident(name.clone()))
            .push(Token::ON)
            .append(config.foreign_key_column())
            .push(Token::EQ)
            .append(SQL::qualified(name.clone(), config.primary_key().as_str()));

        Self {
            name,
            anchor,
            recursive,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `"cte"."column"`
    pub fn column(&self, column: &Ident) -> SQL {
        SQL::qualified(self.name.clone(), column.as_str())
    }

    /// `"cte" AS (anchor UNION recursive)`
    pub fn definition(&self) -> SQL {
        SQL::ident(self.name.clone()).push(Token::AS).append(
            self.anchor
                .clone()
                .push(Token::UNION)
                .append(self.recursive.clone())
                .parens(),
        )
    }

    /// `WITH RECURSIVE <definition>`
    pub fn with_clause(&self) -> SQL {
        SQL::token(Token::WITH)
            .push(Token::RECURSIVE)
            .append(self.definition())
    }
}

/// Full rows of the scope and all their descendants, in configured order.
pub fn forest_query(config: &ForestConfig, scope: &Scope) -> SQL {
    let cte = RecursiveCte::new(config, scope);
    let table = config.table();

    cte.with_clause()
        .push(Token::SELECT)
        .append(config.select_list())
        .push(Token::FROM)
        .append(table.to_sql())
        .push(Token::INNER)
        .push(Token::JOIN)
        .push(SQLChunk::ident(cte.name.clone()))
        .push(Token::ON)
        .append(cte.column(config.primary_key()))
        .push(Token::EQ)
        .append(config.primary_key_column())
        .append(config.order_by())
}

/// Primary keys of the scope and all its descendants, for use as an `IN`
/// subquery.
pub fn descendant_ids(config: &ForestConfig, scope: &Scope) -> SQL {
    let cte = RecursiveCte::new(config, scope);

    cte.with_clause()
        .push(Token::SELECT)
        .append(cte.column(config.primary_key()))
        .push(Token::FROM)
        .push(SQLChunk::ident(cte.name.clone()))
}

/// Plain rows matching `scope`, in configured order. No recursion.
pub fn rows_query(config: &ForestConfig, scope: &Scope) -> SQL {
    let table = config.table();
    let mut sql = SQL::token(Token::SELECT)
        .append(config.select_list())
        .push(Token::FROM)
        .append(table.to_sql());

    let predicate = scope.to_predicate_sql();
    if !predicate.is_empty() {
        sql = sql.push(Token::WHERE).append(predicate);
    }
    sql.append(config.order_by())
}
