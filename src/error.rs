use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The engine rejected or failed to run the compiled statement.
    #[error(transparent)]
    EngineFailure(#[from] rusqlite::Error),

    /// A condition or data mapping that cannot compile to valid SQL.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    /// A statement inside the transaction failed, so it was rolled back
    /// instead of committed.
    #[error("Transaction aborted: {0}")]
    TransactionAborted(String),
}

impl StoreError {
    /// `true` when the error came back from the engine rather than from the
    /// compiler or the worker plumbing.
    #[must_use]
    pub fn is_engine_failure(&self) -> bool {
        matches!(self, StoreError::EngineFailure(_))
    }

    #[must_use]
    pub fn is_transaction_aborted(&self) -> bool {
        matches!(self, StoreError::TransactionAborted(_))
    }

    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, StoreError::InvalidArgument(_))
    }
}
