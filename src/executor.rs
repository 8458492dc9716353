use async_trait::async_trait;

use crate::error::StoreError;
use crate::results::ResultSet;

/// The execution primitive: run finished SQL text and resolve once with its
/// normalized outcome.
///
/// Implemented by [`Store`](crate::store::Store), where every statement gets
/// its own transaction, and by [`Transaction`](crate::sqlite::Transaction),
/// where statements join the open one. The verbs in
/// [`Operations`](crate::operations::Operations) are written against this
/// trait, so they work the same on both.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run one statement.
    ///
    /// # Errors
    /// Returns `StoreError::EngineFailure` if the engine rejects the statement,
    /// or a connection/execution error if the worker cannot be reached.
    async fn execute(&self, sql: &str) -> Result<ResultSet, StoreError>;

    /// Column whose presence turns a `write` into an update.
    fn primary_key(&self) -> &str;
}
