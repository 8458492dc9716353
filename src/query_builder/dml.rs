use crate::condition::Condition;
use crate::error::StoreError;
use crate::record::Record;
use crate::types::Value;

use super::condition::compile_condition;
use super::literal::write_literal;

/// Primary-key column recognised when no other key is configured.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Compile a data mapping into an `INSERT` or an `UPDATE` keyed on `id`.
///
/// # Errors
/// See [`compile_assignment_keyed`].
pub fn compile_assignment(table: &str, data: &Record) -> Result<String, StoreError> {
    compile_assignment_keyed(table, data, DEFAULT_PRIMARY_KEY)
}

/// Compile a data mapping into an `INSERT` or an `UPDATE`.
///
/// A non-null `primary_key` entry makes this an
/// `UPDATE <table> SET ... WHERE <key> = <value>` with the key left out of the
/// `SET` list. Anything else is an `INSERT`; a null key column is dropped so
/// the engine assigns the identifier.
///
/// # Errors
/// Returns `StoreError::InvalidArgument` if there is nothing to insert or set,
/// or if a value has no literal form.
pub fn compile_assignment_keyed(
    table: &str,
    data: &Record,
    primary_key: &str,
) -> Result<String, StoreError> {
    match primary_key_value(data, primary_key) {
        Some(key) => {
            let mut sql = format!("UPDATE {table} SET ");
            write_set_list(&mut sql, table, data, primary_key)?;
            sql.push_str(" WHERE ");
            sql.push_str(primary_key);
            sql.push_str(" = ");
            write_literal(&mut sql, key)?;
            Ok(sql)
        }
        None => compile_insert(table, data, primary_key),
    }
}

/// Compile the `update` verb: `UPDATE <table> SET ...` targeted by, in order
/// of precedence, the explicit condition, the record's own primary key, or
/// nothing at all (every row).
///
/// # Errors
/// Returns `StoreError::InvalidArgument` if there is nothing to set, or
/// propagates condition compilation errors.
pub fn compile_update(
    table: &str,
    data: &Record,
    condition: Option<&Condition>,
    primary_key: &str,
) -> Result<String, StoreError> {
    let mut sql = format!("UPDATE {table} SET ");
    write_set_list(&mut sql, table, data, primary_key)?;

    let explicit = compile_condition(condition)?;
    if !explicit.is_empty() {
        sql.push_str(&explicit);
    } else if let Some(key) = primary_key_value(data, primary_key) {
        sql.push_str(" WHERE ");
        sql.push_str(primary_key);
        sql.push_str(" = ");
        write_literal(&mut sql, key)?;
    }
    Ok(sql)
}

/// `DELETE FROM <table>` with condition. No condition means every row.
///
/// # Errors
/// Propagates condition compilation errors.
pub fn compile_delete(table: &str, condition: Option<&Condition>) -> Result<String, StoreError> {
    let mut sql = format!("DELETE FROM {table}");
    sql.push_str(&compile_condition(condition)?);
    Ok(sql)
}

/// The record's primary-key value, if it carries a non-null one. This is
/// what makes [`compile_assignment_keyed`] produce an `UPDATE`.
#[must_use]
pub fn primary_key_value<'a>(data: &'a Record, primary_key: &str) -> Option<&'a Value> {
    data.get(primary_key).filter(|value| !value.is_null())
}

fn compile_insert(table: &str, data: &Record, primary_key: &str) -> Result<String, StoreError> {
    let mut columns = String::new();
    let mut values = String::new();
    let mut count = 0usize;
    for (column, value) in data.iter() {
        if column == primary_key && value.is_null() {
            continue;
        }
        if count > 0 {
            columns.push_str(", ");
            values.push_str(", ");
        }
        columns.push_str(column);
        write_literal(&mut values, value)?;
        count += 1;
    }
    if count == 0 {
        return Err(StoreError::InvalidArgument(format!(
            "nothing to insert into {table}: the data mapping has no columns"
        )));
    }
    Ok(format!("INSERT INTO {table} ({columns}) VALUES({values})"))
}

fn write_set_list(
    out: &mut String,
    table: &str,
    data: &Record,
    primary_key: &str,
) -> Result<(), StoreError> {
    let mut count = 0usize;
    for (column, value) in data.iter().filter(|(column, _)| *column != primary_key) {
        if count > 0 {
            out.push_str(", ");
        }
        out.push_str(column);
        out.push_str(" = ");
        write_literal(out, value)?;
        count += 1;
    }
    if count == 0 {
        return Err(StoreError::InvalidArgument(format!(
            "nothing to set on {table}: the data mapping has no columns besides {primary_key}"
        )));
    }
    Ok(())
}
