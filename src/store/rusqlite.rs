use canopy_core::{Dialect, FromRow, Result, Statement, canopy_trace_query};
use ::rusqlite::{Connection, Row, Transaction, params_from_iter};

use super::Store;

fn fetch_all<T>(conn: &Connection, statement: &Statement) -> Result<Vec<T>>
where
    T: for<'r> FromRow<Row<'r>>,
{
    canopy_trace_query!(statement.sql(), statement.params().len());

    let mut stmt = conn.prepare_cached(statement.sql())?;
    let rows = stmt.query_and_then(params_from_iter(statement.params()), |row| T::from_row(row))?;

    let (lower, _) = rows.size_hint();
    let mut results = Vec::with_capacity(lower);
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

impl<T> Store<T> for Connection
where
    T: for<'r> FromRow<Row<'r>>,
{
    const DIALECT: Dialect = Dialect::SQLite;

    fn fetch_all(&mut self, statement: &Statement) -> Result<Vec<T>> {
        fetch_all(self, statement)
    }
}

impl<T> Store<T> for Transaction<'_>
where
    T: for<'r> FromRow<Row<'r>>,
{
    const DIALECT: Dialect = Dialect::SQLite;

    fn fetch_all(&mut self, statement: &Statement) -> Result<Vec<T>> {
        fetch_all(self, statement)
    }
}
