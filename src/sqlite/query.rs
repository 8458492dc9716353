use std::sync::Arc;

use rusqlite::Statement;
use rusqlite::types::ValueRef;

use crate::error::StoreError;
use crate::results::ResultSet;
use crate::types::Value;

/// Extract a [`Value`] from a `SQLite` row.
///
/// # Errors
///
/// Returns `StoreError` if the column cannot be read.
pub fn sqlite_extract_value_sync(row: &rusqlite::Row, idx: usize) -> Result<Value, StoreError> {
    let value = match row.get_ref(idx)? {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Int(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    };
    Ok(value)
}

/// Step a row-producing statement to completion, copying every row out.
///
/// # Errors
/// Returns `StoreError` if stepping the statement or reading a column fails.
pub fn build_result_set(stmt: &mut Statement) -> Result<ResultSet, StoreError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_column_names(Arc::new(column_names));

    let mut rows_iter = stmt.query([])?;
    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(sqlite_extract_value_sync(row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}

/// Run one statement on `conn` (a plain connection or an open transaction)
/// and normalize whatever it produced into a [`ResultSet`].
///
/// # Errors
/// Returns `StoreError::EngineFailure` if the engine rejects the statement.
pub fn run_statement(conn: &rusqlite::Connection, sql: &str) -> Result<ResultSet, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    if stmt.column_count() > 0 {
        return build_result_set(&mut stmt);
    }
    let rows_affected = stmt.execute([])?;
    let insert_id = (rows_affected > 0).then(|| conn.last_insert_rowid());
    Ok(ResultSet::from_write(rows_affected, insert_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_rows_and_writes() -> Result<(), StoreError> {
        let conn = rusqlite::Connection::open_in_memory()?;
        conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, score REAL, data BLOB)")?;

        let written = run_statement(&conn, "INSERT INTO t (name, score, data) VALUES('a', 1.5, X'01')")?;
        assert_eq!(written.rows_affected, 1);
        assert_eq!(written.insert_id, Some(1));
        assert!(written.results.is_empty());

        let untouched = run_statement(&conn, "UPDATE t SET name = 'b' WHERE id = 99")?;
        assert_eq!(untouched.rows_affected, 0);
        assert_eq!(untouched.insert_id, None);

        let read = run_statement(&conn, "SELECT * FROM t")?;
        assert_eq!(read.results.len(), 1);
        let row = &read.results[0];
        assert_eq!(row.get("id"), Some(&Value::Int(1)));
        assert_eq!(row.get("name"), Some(&Value::Text("a".into())));
        assert_eq!(row.get("score"), Some(&Value::Float(1.5)));
        assert_eq!(row.get("data"), Some(&Value::Blob(vec![1])));
        Ok(())
    }

    #[test]
    fn empty_select_keeps_columns() -> Result<(), StoreError> {
        let conn = rusqlite::Connection::open_in_memory()?;
        conn.execute_batch("CREATE TABLE t (a INTEGER, b TEXT)")?;
        let read = run_statement(&conn, "SELECT * FROM t")?;
        assert!(read.results.is_empty());
        assert_eq!(read.get_column_names().map(|c| c.len()), Some(2));
        Ok(())
    }
}
