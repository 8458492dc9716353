use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::query_builder::DEFAULT_PRIMARY_KEY;
use crate::sink::DiagnosticSink;
use crate::store::Store;

/// Suffix appended to a store name to form its database file name.
pub const STORE_FILE_SUFFIX: &str = ".syncopate.db";

/// Where a store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// `<directory>/<name>.syncopate.db`
    Directory(PathBuf),
    /// A private in-memory database, gone when the store is dropped.
    InMemory,
}

/// Options for opening a [`Store`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub name: String,
    pub location: StoreLocation,
    /// Expected size in bytes. Advisory only; recorded and logged.
    pub size_hint: Option<u64>,
    /// Column whose presence turns a `write` into an update.
    pub primary_key: String,
    pub sink: DiagnosticSink,
}

impl StoreOptions {
    /// File-backed store in the current directory.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: StoreLocation::Directory(PathBuf::from(".")),
            size_hint: None,
            primary_key: DEFAULT_PRIMARY_KEY.to_owned(),
            sink: DiagnosticSink::Silent,
        }
    }

    /// Path of the database file, `None` for in-memory stores.
    #[must_use]
    pub fn db_path(&self) -> Option<PathBuf> {
        match &self.location {
            StoreLocation::Directory(dir) => Some(dir.join(format!("{}{STORE_FILE_SUFFIX}", self.name))),
            StoreLocation::InMemory => None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::ConfigError("store name must not be empty".into()));
        }
        if self.primary_key.trim().is_empty() {
            return Err(StoreError::ConfigError("primary key column must not be empty".into()));
        }
        Ok(())
    }
}

/// Fluent builder for [`StoreOptions`].
///
/// ```rust,no_run
/// use syncopate::prelude::*;
///
/// # async fn demo() -> Result<(), StoreError> {
/// let store = Store::builder("notes")
///     .directory("/tmp")
///     .sink(DiagnosticSink::Console)
///     .build()
///     .await?;
/// # let _ = store;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StoreOptionsBuilder {
    opts: StoreOptions,
}

impl StoreOptionsBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            opts: StoreOptions::new(name),
        }
    }

    #[must_use]
    pub fn directory(mut self, directory: impl AsRef<Path>) -> Self {
        self.opts.location = StoreLocation::Directory(directory.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn in_memory(mut self) -> Self {
        self.opts.location = StoreLocation::InMemory;
        self
    }

    #[must_use]
    pub fn size_hint(mut self, bytes: u64) -> Self {
        self.opts.size_hint = Some(bytes);
        self
    }

    #[must_use]
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.opts.primary_key = column.into();
        self
    }

    #[must_use]
    pub fn sink(mut self, sink: DiagnosticSink) -> Self {
        self.opts.sink = sink;
        self
    }

    #[must_use]
    pub fn finish(self) -> StoreOptions {
        self.opts
    }

    /// Open the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the options are invalid or the database cannot be opened.
    pub async fn build(self) -> Result<Store, StoreError> {
        Store::open(self.finish()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_carries_suffix() {
        let opts = StoreOptionsBuilder::new("notes").directory("/data").finish();
        assert_eq!(opts.db_path(), Some(PathBuf::from("/data/notes.syncopate.db")));
        assert_eq!(StoreOptionsBuilder::new("n").in_memory().finish().db_path(), None);
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(StoreOptions::new(" ").validate().is_err());
        let opts = StoreOptionsBuilder::new("ok").primary_key("").finish();
        assert!(matches!(opts.validate(), Err(StoreError::ConfigError(_))));
        assert!(StoreOptions::new("ok").validate().is_ok());
    }
}
