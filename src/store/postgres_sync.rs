use canopy_core::{Dialect, FromRow, Result, Statement, canopy_trace_query};
use ::postgres::{Client, GenericClient, Row, Transaction, types::ToSql};

use super::Store;

fn fetch_all<C, T>(client: &mut C, statement: &Statement) -> Result<Vec<T>>
where
    C: GenericClient,
    T: FromRow<Row>,
{
    canopy_trace_query!(statement.sql(), statement.params().len());

    let params: Vec<&(dyn ToSql + Sync)> = statement
        .params()
        .iter()
        .map(|value| value as &(dyn ToSql + Sync))
        .collect();

    let rows = client.query(statement.sql(), &params)?;
    rows.iter().map(T::from_row).collect()
}

impl<T: FromRow<Row>> Store<T> for Client {
    const DIALECT: Dialect = Dialect::PostgreSQL;

    fn fetch_all(&mut self, statement: &Statement) -> Result<Vec<T>> {
        fetch_all(self, statement)
    }
}

impl<T: FromRow<Row>> Store<T> for Transaction<'_> {
    const DIALECT: Dialect = Dialect::PostgreSQL;

    fn fetch_all(&mut self, statement: &Statement) -> Result<Vec<T>> {
        fetch_all(self, statement)
    }
}
