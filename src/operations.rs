use async_trait::async_trait;

use crate::condition::Condition;
use crate::error::StoreError;
use crate::executor::Executor;
use crate::query_builder::{
    QueryOptions, add_column_sql, compile_assignment_keyed, compile_count, compile_delete,
    compile_select, compile_update, create_index_sql, create_table_sql, drop_index_sql,
    drop_table_sql, primary_key_value, rename_table_sql,
};
use crate::record::Record;
use crate::types::Value;

/// The declarative verbs. Each one compiles its arguments to SQL text and
/// runs it through [`Executor::execute`], so they behave the same on a
/// [`Store`](crate::store::Store) and inside a
/// [`Transaction`](crate::sqlite::Transaction).
///
/// Compilation errors are returned before anything reaches the engine.
#[async_trait]
pub trait Operations: Executor {
    /// Rows of `table` matching `condition`, shaped by `options`, in engine order.
    async fn read(
        &self,
        table: &str,
        condition: Option<&Condition>,
        options: Option<&QueryOptions>,
    ) -> Result<Vec<Record>, StoreError> {
        let sql = compile_select(table, condition, options)?;
        Ok(self.execute(&sql).await?.to_records())
    }

    /// Number of rows of `table` matching `condition`.
    async fn count(&self, table: &str, condition: Option<&Condition>) -> Result<u64, StoreError> {
        let sql = compile_count(table, condition)?;
        let result_set = self.execute(&sql).await?;
        match result_set.scalar() {
            Some(Value::Int(n)) => u64::try_from(*n)
                .map_err(|_| StoreError::ExecutionError(format!("negative row count {n}"))),
            other => Err(StoreError::ExecutionError(format!(
                "COUNT(*) on {table} returned {other:?}"
            ))),
        }
    }

    /// Insert `data`, or update the row it names when it carries a non-null
    /// primary key.
    ///
    /// Returns the engine-assigned id for an insert and `None` for an update.
    async fn write(&self, table: &str, data: &Record) -> Result<Option<i64>, StoreError> {
        let primary_key = self.primary_key();
        let sql = compile_assignment_keyed(table, data, primary_key)?;
        let is_update = primary_key_value(data, primary_key).is_some();
        let result_set = self.execute(&sql).await?;
        if is_update {
            return Ok(None);
        }
        result_set.insert_id.map(Some).ok_or_else(|| {
            StoreError::ExecutionError(format!("insert into {table} reported no row id"))
        })
    }

    /// Set the columns of `data` on the rows matched by `condition`, or on the
    /// row named by `data`'s primary key when no condition is given.
    async fn update(
        &self,
        table: &str,
        data: &Record,
        condition: Option<&Condition>,
    ) -> Result<(), StoreError> {
        let sql = compile_update(table, data, condition, self.primary_key())?;
        self.execute(&sql).await?;
        Ok(())
    }

    /// Delete the rows matched by `condition`; every row when there is none.
    async fn erase(&self, table: &str, condition: Option<&Condition>) -> Result<(), StoreError> {
        let sql = compile_delete(table, condition)?;
        self.execute(&sql).await?;
        Ok(())
    }

    async fn create_table(&self, name: &str, columns: &[(&str, &str)]) -> Result<(), StoreError> {
        self.execute(&create_table_sql(name, columns)).await?;
        Ok(())
    }

    async fn drop_table(&self, name: &str) -> Result<(), StoreError> {
        self.execute(&drop_table_sql(name)).await?;
        Ok(())
    }

    async fn rename_table(&self, from: &str, to: &str) -> Result<(), StoreError> {
        self.execute(&rename_table_sql(from, to)).await?;
        Ok(())
    }

    async fn add_column(&self, table: &str, column: &str, column_type: &str) -> Result<(), StoreError> {
        self.execute(&add_column_sql(table, column, column_type)).await?;
        Ok(())
    }

    async fn create_index(&self, table: &str, column: &str) -> Result<(), StoreError> {
        self.execute(&create_index_sql(table, column)).await?;
        Ok(())
    }

    async fn drop_index(&self, table: &str, column: &str) -> Result<(), StoreError> {
        self.execute(&drop_index_sql(table, column)).await?;
        Ok(())
    }
}

impl<E: Executor + ?Sized> Operations for E {}
