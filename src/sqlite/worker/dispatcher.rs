use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use crate::error::StoreError;
use crate::results::ResultSet;
use crate::sqlite::query::run_statement;

use super::channel::Command;

enum TxExit {
    Finished,
    Shutdown,
}

pub(super) fn run_sqlite_worker(mut conn: rusqlite::Connection, receiver: &Receiver<Command>) {
    // Commands that arrived while a transaction held the connection, in arrival order.
    let mut deferred: VecDeque<Command> = VecDeque::new();

    loop {
        let command = match deferred.pop_front() {
            Some(command) => command,
            None => match receiver.recv() {
                Ok(command) => command,
                Err(_) => break,
            },
        };

        match command {
            Command::Shutdown => break,
            Command::Execute { sql, respond_to } => {
                let _ = respond_to.send(execute_implicit(&mut conn, &sql));
            }
            Command::BeginTransaction { tx_id, respond_to } => match conn.transaction() {
                Ok(tx) => {
                    if respond_to.send(Ok(())).is_err() {
                        // The caller gave up on `begin`; its queued rollback finds
                        // nothing to roll back. Dropping `tx` rolls it back here.
                        continue;
                    }
                    // rusqlite::Transaction is !Send, so it stays on this thread; every
                    // command is routed through the tx loop until commit/rollback.
                    if let TxExit::Shutdown = run_tx_loop(tx_id, tx, receiver, &mut deferred) {
                        break;
                    }
                }
                Err(err) => {
                    let _ = respond_to.send(Err(StoreError::EngineFailure(err)));
                }
            },
            Command::ExecuteTx { tx_id, respond_to, .. } => {
                let _ = respond_to.send(Err(no_active_tx(tx_id)));
            }
            Command::CommitTx { tx_id, respond_to } => {
                let _ = respond_to.send(Err(no_active_tx(tx_id)));
            }
            Command::RollbackTx { tx_id, respond_to } => {
                let _ = respond_to.send(Err(no_active_tx(tx_id)));
            }
        }
    }
    tracing::debug!("sqlite worker stopped");
}

/// Next command for the open transaction: one of its own that was deferred
/// earlier, otherwise whatever arrives next on the channel.
fn next_tx_command(
    tx_id: u64,
    receiver: &Receiver<Command>,
    deferred: &mut VecDeque<Command>,
) -> Option<Command> {
    if let Some(pos) = deferred.iter().position(|command| command.tx_id() == Some(tx_id)) {
        return deferred.remove(pos);
    }
    receiver.recv().ok()
}

fn run_tx_loop(
    tx_id: u64,
    tx: rusqlite::Transaction<'_>,
    receiver: &Receiver<Command>,
    deferred: &mut VecDeque<Command>,
) -> TxExit {
    while let Some(command) = next_tx_command(tx_id, receiver, deferred) {
        match command {
            Command::Shutdown => return TxExit::Shutdown,
            Command::ExecuteTx {
                tx_id: id,
                sql,
                respond_to,
            } if id == tx_id => {
                let _ = respond_to.send(run_statement(&tx, &sql));
            }
            Command::CommitTx { tx_id: id, respond_to } if id == tx_id => {
                let _ = respond_to.send(tx.commit().map_err(StoreError::EngineFailure));
                return TxExit::Finished;
            }
            Command::RollbackTx { tx_id: id, respond_to } if id == tx_id => {
                let _ = respond_to.send(tx.rollback().map_err(StoreError::EngineFailure));
                return TxExit::Finished;
            }
            // Independent work, and commands for transactions begun later (or
            // already over), wait for this one to end.
            other => deferred.push_back(other),
        }
    }
    // Every sender is gone; dropping `tx` rolls back.
    TxExit::Shutdown
}

fn execute_implicit(conn: &mut rusqlite::Connection, sql: &str) -> Result<ResultSet, StoreError> {
    let tx = conn.transaction()?;
    let result_set = run_statement(&tx, sql)?;
    tx.commit()?;
    Ok(result_set)
}

fn no_active_tx(requested: u64) -> StoreError {
    StoreError::ExecutionError(format!(
        "No active SQLite transaction (requested {requested})"
    ))
}
