use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::record::Record;
use crate::types::Value;

/// A row from a database query result
///
/// Values are owned copies taken while the statement was being stepped, so a
/// row stays valid after the engine has moved on. Column names are shared by
/// every row of the same result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// The column names for this row (shared across all rows in a result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row, in column declaration order
    pub values: Vec<Value>,
}

impl Row {
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<Value>) -> Self {
        Self {
            column_names,
            values,
        }
    }

    /// Get the index of a column by name
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_names.iter().position(|col| col == column_name)
    }

    /// Get a value from the row by column name
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&Value> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a value from the row by column index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Copy this row into a standalone, writable [`Record`].
    #[must_use]
    pub fn to_record(&self) -> Record {
        let mut record = Record::with_capacity(self.values.len());
        for (name, value) in self.column_names.iter().zip(&self.values) {
            record.set(name.as_str(), value.clone());
        }
        record
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.column_names.iter().zip(&self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
