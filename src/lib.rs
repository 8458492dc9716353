//! Declarative data verbs over an embedded SQLite store.
//!
//! Describe which rows you want with a [`Condition`], what to store with a
//! [`Record`], and the crate compiles that into SQL text and runs it on a
//! dedicated worker thread that owns the connection:
//!
//! ```rust,no_run
//! use syncopate::prelude::*;
//!
//! # async fn demo() -> Result<(), StoreError> {
//! let store = Store::builder("people").in_memory().build().await?;
//! store.create_table("users", &[("name", "TEXT"), ("age", "INTEGER")]).await?;
//!
//! let id = store
//!     .write("users", &Record::new().with("name", "O'Brien").with("age", 41))
//!     .await?;
//!
//! let adults = Condition::new().compare("age", ">=", 18);
//! let rows = store.read("users", Some(&adults), None).await?;
//! assert_eq!(rows[0].get("name"), Some(&Value::Text("O'Brien".into())));
//! # let _ = id;
//! # Ok(())
//! # }
//! ```
//!
//! The compilers in [`query_builder`] are pure and can be used on their own.

pub mod condition;
pub mod error;
pub mod executor;
pub mod operations;
pub mod prelude;
pub mod query_builder;
pub mod record;
pub mod results;
pub mod sink;
pub mod sqlite;
pub mod store;
pub mod types;

pub use condition::{Condition, Predicate};
pub use error::StoreError;
pub use executor::Executor;
pub use operations::Operations;
pub use record::Record;
pub use results::{ResultSet, Row};
pub use sink::DiagnosticSink;
pub use sqlite::{StoreLocation, StoreOptions, StoreOptionsBuilder, Transaction};
pub use store::{Store, TxFuture};
pub use types::Value;
