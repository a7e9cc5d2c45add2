/// Query Capability Module
///
/// This module defines the `Querier` trait, the minimal contract for
/// "anything query-capable": a plain connection and an open transaction
/// both satisfy it, so the same caller logic can run transactionally or
/// non-transactionally depending on which handle it is given.
///
/// Results are materialized eagerly into owned `Rows`/`Row` values so the
/// trait stays object-safe and result lifetimes are decoupled from the
/// statement that produced them.
use crate::core::{LitetxError, Result};
use rusqlite::types::{FromSql, Value, ValueRef};
use rusqlite::{Connection, ToSql};

/// A single materialized row from a query result
#[derive(Debug, Clone)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Extracts the value at `idx`, converting it to the requested type.
    ///
    /// Fails with `LitetxError::Query` for an out-of-range index and with
    /// `LitetxError::Database` when the stored value cannot be converted
    /// to `T`.
    pub fn get<T: FromSql>(&self, idx: usize) -> Result<T> {
        let value = self.values.get(idx).ok_or_else(|| {
            LitetxError::Query(format!(
                "column index {} out of range ({} columns)",
                idx,
                self.values.len()
            ))
        })?;
        let value_ref = ValueRef::from(value);
        T::column_result(value_ref).map_err(|e| {
            LitetxError::Database(rusqlite::Error::FromSqlConversionFailure(
                idx,
                value_ref.data_type(),
                Box::new(e),
            ))
        })
    }

    /// Number of columns in this row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A fully materialized query result set
#[derive(Debug, Clone)]
pub struct Rows {
    /// Column names from the query result
    pub columns: Vec<String>,
    /// Rows of data
    pub rows: Vec<Row>,
}

impl Rows {
    /// Number of rows returned
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl IntoIterator for Rows {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Minimal contract for a query-capable resource.
///
/// Implemented by `rusqlite::Connection` and `rusqlite::Transaction`, which
/// makes the two interchangeable behind `&dyn Querier`.
pub trait Querier {
    /// Executes a statement and returns the full result set
    fn query(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Rows>;

    /// Executes a statement expected to return a single row.
    ///
    /// An empty result is an error (`rusqlite::Error::QueryReturnedNoRows`);
    /// extra rows beyond the first are discarded.
    fn query_row(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Row>;

    /// Executes a mutating statement and returns the affected row count
    fn exec(&self, sql: &str, params: &[&dyn ToSql]) -> Result<usize>;
}

fn run_query(conn: &Connection, sql: &str, params: &[&dyn ToSql]) -> Result<Rows> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
    let column_count = columns.len();

    let mut raw = stmt.query(params)?;
    let mut rows = Vec::new();
    while let Some(row) = raw.next()? {
        let mut values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            values.push(row.get::<_, Value>(idx)?);
        }
        rows.push(Row { values });
    }

    Ok(Rows { columns, rows })
}

fn run_query_row(conn: &Connection, sql: &str, params: &[&dyn ToSql]) -> Result<Row> {
    run_query(conn, sql, params)?
        .rows
        .into_iter()
        .next()
        .ok_or(LitetxError::Database(rusqlite::Error::QueryReturnedNoRows))
}

fn run_exec(conn: &Connection, sql: &str, params: &[&dyn ToSql]) -> Result<usize> {
    Ok(conn.execute(sql, params)?)
}

impl Querier for Connection {
    fn query(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Rows> {
        run_query(self, sql, params)
    }

    fn query_row(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Row> {
        run_query_row(self, sql, params)
    }

    fn exec(&self, sql: &str, params: &[&dyn ToSql]) -> Result<usize> {
        run_exec(self, sql, params)
    }
}

impl Querier for rusqlite::Transaction<'_> {
    fn query(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Rows> {
        run_query(self, sql, params)
    }

    fn query_row(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Row> {
        run_query_row(self, sql, params)
    }

    fn exec(&self, sql: &str, params: &[&dyn ToSql]) -> Result<usize> {
        run_exec(self, sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE items (id INTEGER PRIMARY KEY, name TEXT NOT NULL, qty INTEGER);
             INSERT INTO items (name, qty) VALUES ('bolt', 40), ('nut', 12), ('washer', NULL);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_query_materializes_columns_and_rows() {
        let conn = test_db();
        let rows = Querier::query(&conn, "SELECT name, qty FROM items ORDER BY id", &[]).unwrap();

        assert_eq!(rows.columns, vec!["name", "qty"]);
        assert_eq!(rows.row_count(), 3);
        assert_eq!(rows.rows[0].get::<String>(0).unwrap(), "bolt");
        assert_eq!(rows.rows[1].get::<i64>(1).unwrap(), 12);
        assert_eq!(rows.rows[2].get::<Option<i64>>(1).unwrap(), None);
    }

    #[test]
    fn test_query_with_params() {
        let conn = test_db();
        let rows = Querier::query(
            &conn,
            "SELECT name FROM items WHERE qty > ?1 ORDER BY name",
            &[&20i64],
        )
        .unwrap();
        assert_eq!(rows.row_count(), 1);
        assert_eq!(rows.rows[0].get::<String>(0).unwrap(), "bolt");
    }

    #[test]
    fn test_query_row_returns_first_row() {
        let conn = test_db();
        let row =
            Querier::query_row(&conn, "SELECT COUNT(*) FROM items", &[]).unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 3);
    }

    #[test]
    fn test_query_row_no_rows_is_error() {
        let conn = test_db();
        let result = Querier::query_row(&conn, "SELECT name FROM items WHERE qty > 100", &[]);
        match result {
            Err(LitetxError::Database(rusqlite::Error::QueryReturnedNoRows)) => {}
            other => panic!("Expected QueryReturnedNoRows, got {other:?}"),
        }
    }

    #[test]
    fn test_exec_reports_affected_rows() {
        let conn = test_db();
        let affected =
            Querier::exec(&conn, "UPDATE items SET qty = 0 WHERE qty IS NOT NULL", &[]).unwrap();
        assert_eq!(affected, 2);
    }

    #[test]
    fn test_get_out_of_range_index() {
        let conn = test_db();
        let row = Querier::query_row(&conn, "SELECT name FROM items LIMIT 1", &[]).unwrap();
        assert_eq!(row.len(), 1);
        match row.get::<String>(5) {
            Err(LitetxError::Query(msg)) => assert!(msg.contains("out of range")),
            other => panic!("Expected out-of-range error, got {other:?}"),
        }
    }

    #[test]
    fn test_get_type_mismatch() {
        let conn = test_db();
        let row = Querier::query_row(&conn, "SELECT name FROM items LIMIT 1", &[]).unwrap();
        match row.get::<i64>(0) {
            Err(LitetxError::Database(rusqlite::Error::FromSqlConversionFailure(0, _, _))) => {}
            other => panic!("Expected conversion failure, got {other:?}"),
        }
    }
}
