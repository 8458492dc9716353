use std::sync::{Arc, OnceLock};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::executor::Executor;
use crate::results::ResultSet;
use crate::store::StoreShared;

/// An explicit transaction on a store's connection.
///
/// Statements run through the handle (directly or via
/// [`Operations`](crate::operations::Operations)) join the transaction.
/// Finish with [`commit`](Self::commit) or [`rollback`](Self::rollback);
/// a handle dropped unfinished is rolled back.
///
/// The first statement that fails marks the transaction as failed. From then
/// on it can only roll back: `commit` rolls back and reports
/// `StoreError::TransactionAborted`.
pub struct Transaction {
    shared: Arc<StoreShared>,
    tx_id: u64,
    finished: bool,
    failure: OnceLock<String>,
}

impl Transaction {
    pub(crate) fn new(shared: Arc<StoreShared>, tx_id: u64) -> Self {
        Self {
            shared,
            tx_id,
            finished: false,
            failure: OnceLock::new(),
        }
    }

    /// Forget the transaction without queueing a rollback; used when the
    /// worker never began it.
    pub(crate) fn disarm(&mut self) {
        self.finished = true;
    }

    /// Identifier assigned by the store, unique per store.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.tx_id
    }

    /// `true` once a statement run through this handle has failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.failure.get().is_some()
    }

    /// Commit the transaction, or roll it back if one of its statements
    /// failed.
    ///
    /// # Errors
    /// Returns `StoreError::TransactionAborted` if a statement had failed,
    /// or `StoreError::EngineFailure` if the commit fails; the transaction is
    /// over either way.
    pub async fn commit(mut self) -> Result<(), StoreError> {
        self.finished = true;
        if let Some(reason) = self.failure.get().cloned() {
            self.shared.worker.rollback_tx(self.tx_id).await?;
            tracing::debug!(store = %self.shared.worker.name(), tx_id = self.tx_id, "failed transaction rolled back at commit");
            return Err(StoreError::TransactionAborted(reason));
        }
        self.shared.worker.commit_tx(self.tx_id).await?;
        tracing::debug!(store = %self.shared.worker.name(), tx_id = self.tx_id, "transaction committed");
        Ok(())
    }

    /// Roll back the transaction.
    ///
    /// # Errors
    /// Returns `StoreError::EngineFailure` if the rollback fails.
    pub async fn rollback(mut self) -> Result<(), StoreError> {
        self.finished = true;
        self.shared.worker.rollback_tx(self.tx_id).await?;
        tracing::debug!(store = %self.shared.worker.name(), tx_id = self.tx_id, "transaction rolled back");
        Ok(())
    }
}

#[async_trait]
impl Executor for Transaction {
    async fn execute(&self, sql: &str) -> Result<ResultSet, StoreError> {
        self.shared.sink.emit(sql);
        let outcome = self.shared.worker.execute_tx(self.tx_id, sql.to_owned()).await;
        if let Err(err) = &outcome {
            let _ = self.failure.set(err.to_string());
        }
        outcome
    }

    fn primary_key(&self) -> &str {
        &self.shared.options.primary_key
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!(store = %self.shared.worker.name(), tx_id = self.tx_id, "transaction dropped unfinished, rolling back");
            self.shared.worker.rollback_tx_detached(self.tx_id);
        }
    }
}

impl std::fmt::Debug for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("store", &self.shared.worker.name())
            .field("tx_id", &self.tx_id)
            .field("finished", &self.finished)
            .field("failed", &self.is_failed())
            .finish()
    }
}
