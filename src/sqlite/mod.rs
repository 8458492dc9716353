// SQLite module - the store's only engine
//
// - config: store options and their builder
// - query: statement execution and result extraction
// - transaction: explicit transaction handle
// - worker: the thread that owns the connection

pub mod config;
pub mod query;
pub mod transaction;
pub(crate) mod worker;

pub use config::{STORE_FILE_SUFFIX, StoreLocation, StoreOptions, StoreOptionsBuilder};
pub use query::build_result_set;
pub use transaction::Transaction;
