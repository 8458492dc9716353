use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread;

use tokio::sync::oneshot;

use crate::error::StoreError;
use crate::results::ResultSet;

use super::channel::{Command, Reply};
use super::dispatcher::run_sqlite_worker;

/// Handle to the thread that owns a store's `rusqlite::Connection`.
pub(crate) struct SqliteWorker {
    sender: Sender<Command>,
    name: String,
    next_tx_id: AtomicU64,
}

impl SqliteWorker {
    pub(crate) fn spawn(conn: rusqlite::Connection, name: &str) -> Result<Self, StoreError> {
        let (sender, receiver) = mpsc::channel::<Command>();
        let thread_name = format!("sqlite-worker-{name}");
        thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || run_sqlite_worker(conn, &receiver))
            .map_err(|err| {
                StoreError::ConnectionError(format!("failed to spawn SQLite worker thread: {err}"))
            })?;
        tracing::debug!(worker = %thread_name, "sqlite worker started");

        Ok(Self {
            sender,
            name: name.to_owned(),
            next_tx_id: AtomicU64::new(1),
        })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn send_command(&self, command: Command) -> Result<(), StoreError> {
        self.sender
            .send(command)
            .map_err(|_| connection_error("SQLite worker closed"))
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> Command,
        drop_message: &'static str,
    ) -> Result<T, StoreError> {
        let (tx, rx) = oneshot::channel();
        self.send_command(build(tx))?;
        rx.await.map_err(|_| connection_error(drop_message))?
    }

    pub(crate) async fn execute(&self, sql: String) -> Result<ResultSet, StoreError> {
        self.request(
            |respond_to| Command::Execute { sql, respond_to },
            "SQLite worker dropped while executing statement",
        )
        .await
    }

    /// Reserve an id for a transaction that has not been begun yet.
    pub(crate) fn allocate_tx_id(&self) -> u64 {
        self.next_tx_id.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) async fn begin_transaction(&self, tx_id: u64) -> Result<(), StoreError> {
        self.request(
            |respond_to| Command::BeginTransaction { tx_id, respond_to },
            "SQLite worker dropped while beginning transaction",
        )
        .await
    }

    pub(crate) async fn execute_tx(&self, tx_id: u64, sql: String) -> Result<ResultSet, StoreError> {
        self.request(
            |respond_to| Command::ExecuteTx {
                tx_id,
                sql,
                respond_to,
            },
            "SQLite worker dropped while executing transaction statement",
        )
        .await
    }

    pub(crate) async fn commit_tx(&self, tx_id: u64) -> Result<(), StoreError> {
        self.request(
            |respond_to| Command::CommitTx { tx_id, respond_to },
            "SQLite worker dropped while committing",
        )
        .await
    }

    pub(crate) async fn rollback_tx(&self, tx_id: u64) -> Result<(), StoreError> {
        self.request(
            |respond_to| Command::RollbackTx { tx_id, respond_to },
            "SQLite worker dropped while rolling back",
        )
        .await
    }

    /// Queue a rollback without waiting for it; used when a transaction handle
    /// is dropped unfinished.
    pub(crate) fn rollback_tx_detached(&self, tx_id: u64) {
        let (respond_to, _) = oneshot::channel();
        let _ = self.send_command(Command::RollbackTx { tx_id, respond_to });
    }
}

impl Drop for SqliteWorker {
    fn drop(&mut self) {
        let _ = self.sender.send(Command::Shutdown);
    }
}

fn connection_error(message: &str) -> StoreError {
    StoreError::ConnectionError(message.to_owned())
}
