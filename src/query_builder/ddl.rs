// Fixed DDL templates. Identifiers and column types are trusted input.

/// `CREATE TABLE IF NOT EXISTS` with an autoincrementing `id` key followed by
/// the given `(column, type)` pairs.
#[must_use]
pub fn create_table_sql(name: &str, columns: &[(&str, &str)]) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {name} (id INTEGER PRIMARY KEY AUTOINCREMENT");
    for (column, column_type) in columns {
        sql.push_str(", ");
        sql.push_str(column);
        sql.push(' ');
        sql.push_str(column_type);
    }
    sql.push(')');
    sql
}

#[must_use]
pub fn drop_table_sql(name: &str) -> String {
    format!("DROP TABLE IF EXISTS {name}")
}

#[must_use]
pub fn rename_table_sql(from: &str, to: &str) -> String {
    format!("ALTER TABLE {from} RENAME TO {to}")
}

#[must_use]
pub fn add_column_sql(table: &str, column: &str, column_type: &str) -> String {
    format!("ALTER TABLE {table} ADD COLUMN {column} {column_type}")
}

/// Indexes are named `<table>_<column>_index`.
#[must_use]
pub fn create_index_sql(table: &str, column: &str) -> String {
    format!("CREATE INDEX IF NOT EXISTS {table}_{column}_index ON {table} ({column})")
}

#[must_use]
pub fn drop_index_sql(table: &str, column: &str) -> String {
    format!("DROP INDEX IF EXISTS {table}_{column}_index")
}
