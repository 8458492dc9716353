use tokio::sync::oneshot;

use crate::error::StoreError;
use crate::results::ResultSet;

pub(crate) type Reply<T> = oneshot::Sender<Result<T, StoreError>>;

pub(crate) enum Command {
    /// Run one statement in its own implicit transaction.
    Execute {
        sql: String,
        respond_to: Reply<ResultSet>,
    },
    /// Open transaction `tx_id`; the id is allocated by the caller.
    BeginTransaction {
        tx_id: u64,
        respond_to: Reply<()>,
    },
    ExecuteTx {
        tx_id: u64,
        sql: String,
        respond_to: Reply<ResultSet>,
    },
    CommitTx {
        tx_id: u64,
        respond_to: Reply<()>,
    },
    RollbackTx {
        tx_id: u64,
        respond_to: Reply<()>,
    },
    Shutdown,
}

impl Command {
    /// The transaction a command belongs to, `None` for independent work.
    pub(crate) fn tx_id(&self) -> Option<u64> {
        match self {
            Command::ExecuteTx { tx_id, .. }
            | Command::CommitTx { tx_id, .. }
            | Command::RollbackTx { tx_id, .. } => Some(*tx_id),
            Command::Execute { .. } | Command::BeginTransaction { .. } | Command::Shutdown => None,
        }
    }
}
