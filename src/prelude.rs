//! Convenient imports for common functionality.
//!
//! Brings the store, the verb traits and the value types into scope in one
//! line.

pub use crate::condition::{Condition, Predicate};
pub use crate::error::StoreError;
pub use crate::executor::Executor;
pub use crate::operations::Operations;
pub use crate::query_builder::QueryOptions;
pub use crate::record::Record;
pub use crate::results::{ResultSet, Row};
pub use crate::sink::DiagnosticSink;
pub use crate::sqlite::{StoreLocation, StoreOptions, StoreOptionsBuilder, Transaction};
pub use crate::store::{Store, TxFuture};
pub use crate::types::Value;
