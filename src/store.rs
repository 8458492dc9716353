use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::{JoinHandle, spawn_blocking};

use crate::error::StoreError;
use crate::executor::Executor;
use crate::results::ResultSet;
use crate::sink::DiagnosticSink;
use crate::sqlite::Transaction;
use crate::sqlite::config::{StoreOptions, StoreOptionsBuilder};
use crate::sqlite::worker::SqliteWorker;

/// Future returned by a [`Store::transact`] batch; it borrows the transaction
/// handle for `'t`.
pub type TxFuture<'t, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 't>>;

/// State shared by a store, its clones, and every transaction opened on it.
/// The worker thread stops once the last of them is dropped.
pub(crate) struct StoreShared {
    pub(crate) worker: SqliteWorker,
    pub(crate) sink: DiagnosticSink,
    pub(crate) options: StoreOptions,
}

/// An open database. Cheap to clone; clones share one worker thread.
///
/// Every statement run through the store itself gets its own implicit
/// transaction. Use [`Store::begin`] or [`Store::transact`] to group several.
///
/// While a transaction is open, statements sent through the store (rather
/// than the transaction handle) wait until it commits or rolls back. Awaiting
/// one of them from inside the transaction's own task never completes.
#[derive(Clone)]
pub struct Store {
    shared: Arc<StoreShared>,
}

impl Store {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> StoreOptionsBuilder {
        StoreOptionsBuilder::new(name)
    }

    /// Open (creating if needed) the store described by `options`.
    ///
    /// File stores are switched to WAL journaling.
    ///
    /// # Errors
    /// Returns `StoreError::ConfigError` for invalid options, or
    /// `StoreError::EngineFailure` if the database cannot be opened.
    pub async fn open(options: StoreOptions) -> Result<Self, StoreError> {
        options.validate()?;
        let path = options.db_path();
        let conn = spawn_blocking(move || open_connection(path))
            .await
            .map_err(|e| {
                StoreError::ConnectionError(format!("sqlite spawn_blocking join error: {e}"))
            })??;
        let worker = SqliteWorker::spawn(conn, &options.name)?;
        tracing::info!(
            store = %options.name,
            path = ?options.db_path(),
            size_hint = ?options.size_hint,
            "store opened"
        );

        Ok(Self {
            shared: Arc::new(StoreShared {
                worker,
                sink: options.sink.clone(),
                options,
            }),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.shared.worker.name()
    }

    /// Advisory size recorded at open time.
    #[must_use]
    pub fn size_hint(&self) -> Option<u64> {
        self.shared.options.size_hint
    }

    #[must_use]
    pub fn options(&self) -> &StoreOptions {
        &self.shared.options
    }

    #[must_use]
    pub fn sink(&self) -> &DiagnosticSink {
        &self.shared.sink
    }

    /// Run `sql` without anyone awaiting the outcome. The result set, or the
    /// error text, goes to the diagnostic sink.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn execute_detached(&self, sql: impl Into<String>) -> JoinHandle<()> {
        let store = self.clone();
        let sql = sql.into();
        tokio::spawn(async move {
            match store.execute(&sql).await {
                Ok(result_set) => store.shared.sink.emit(&result_set),
                Err(err) => {
                    tracing::warn!(store = %store.name(), %sql, "detached statement failed: {err}");
                    store.shared.sink.emit(&serde_json::json!({
                        "sql": sql,
                        "error": err.to_string(),
                    }));
                }
            }
        })
    }

    /// Open an explicit transaction. Dropping the handle without committing
    /// rolls it back, and so does dropping this future once it has been polled.
    ///
    /// # Errors
    /// Returns `StoreError::EngineFailure` if the engine refuses to begin.
    pub async fn begin(&self) -> Result<Transaction, StoreError> {
        let tx_id = self.shared.worker.allocate_tx_id();
        let mut tx = Transaction::new(Arc::clone(&self.shared), tx_id);
        if let Err(err) = self.shared.worker.begin_transaction(tx_id).await {
            tx.disarm();
            return Err(err);
        }
        tracing::debug!(store = %self.name(), tx_id, "transaction started");
        Ok(tx)
    }

    /// Run `batch` inside one transaction: commit if it returns `Ok`, roll
    /// back if it returns `Err`, and hand its result back either way.
    ///
    /// A statement that failed inside the batch aborts the whole transaction,
    /// even when the batch handles the error and returns `Ok`.
    ///
    /// ```rust,no_run
    /// use syncopate::prelude::*;
    ///
    /// # async fn demo(store: &Store) -> Result<(), StoreError> {
    /// let id = store
    ///     .transact(|tx| {
    ///         Box::pin(async move {
    ///             let data = Record::new().with("name", "Ann");
    ///             tx.write("users", &data).await
    ///         })
    ///     })
    ///     .await?;
    /// # let _ = id;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns the batch's own error after rolling back,
    /// `StoreError::TransactionAborted` if the batch returned `Ok` after a
    /// failed statement, or the engine error if beginning or committing fails.
    pub async fn transact<T, F>(&self, batch: F) -> Result<T, StoreError>
    where
        F: for<'t> FnOnce(&'t Transaction) -> TxFuture<'t, T> + Send,
        T: Send,
    {
        let tx = self.begin().await?;
        let outcome = batch(&tx).await;
        match outcome {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(store = %self.name(), "rollback after failed batch: {rollback_err}");
                }
                Err(err)
            }
        }
    }
}

#[async_trait]
impl Executor for Store {
    async fn execute(&self, sql: &str) -> Result<ResultSet, StoreError> {
        self.shared.sink.emit(sql);
        self.shared.worker.execute(sql.to_owned()).await
    }

    fn primary_key(&self) -> &str {
        &self.shared.options.primary_key
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("options", &self.shared.options)
            .finish_non_exhaustive()
    }
}

fn open_connection(path: Option<PathBuf>) -> Result<rusqlite::Connection, StoreError> {
    match path {
        Some(path) => {
            let conn = rusqlite::Connection::open(&path)?;
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
            Ok(conn)
        }
        None => Ok(rusqlite::Connection::open_in_memory()?),
    }
}
