use std::sync::Arc;

use serde::Serialize;

use crate::record::Record;
use crate::types::Value;

use super::row::Row;

/// Everything a single statement produced.
///
/// Row-producing statements fill `results`; other statements record how many
/// rows they changed and, when that count is non-zero, the engine's last
/// insert rowid. `insert_id` is only meaningful after an `INSERT`; the
/// execution layer does not look at which verb issued the statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<Row>,
    /// Rows returned (queries) or changed (writes)
    pub rows_affected: usize,
    /// Last insert rowid, set when a write changed at least one row
    pub insert_id: Option<i64>,
    #[serde(skip)]
    column_names: Option<Arc<Vec<String>>>,
}

impl ResultSet {
    /// Create a new result set with a known capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            rows_affected: 0,
            insert_id: None,
            column_names: None,
        }
    }

    /// Outcome of a statement that returned no rows.
    #[must_use]
    pub fn from_write(rows_affected: usize, insert_id: Option<i64>) -> ResultSet {
        ResultSet {
            results: Vec::new(),
            rows_affected,
            insert_id,
            column_names: None,
        }
    }

    /// Set the column names for this result set (to be shared by all rows)
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_names = Some(column_names);
    }

    /// Get the column names for this result set
    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Add a row to the result set. Rows added before column names are set
    /// are ignored.
    pub fn add_row_values(&mut self, row_values: Vec<Value>) {
        if let Some(column_names) = &self.column_names {
            self.results.push(Row::new(Arc::clone(column_names), row_values));
            self.rows_affected += 1;
        }
    }

    /// First column of the first row, the shape of an aggregate query.
    #[must_use]
    pub fn scalar(&self) -> Option<&Value> {
        self.results.first().and_then(|row| row.get_by_index(0))
    }

    /// Copy every row into an independent [`Record`].
    #[must_use]
    pub fn to_records(&self) -> Vec<Record> {
        self.results.iter().map(Row::to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_need_column_names() {
        let mut rs = ResultSet::with_capacity(2);
        rs.add_row_values(vec![Value::Int(1)]);
        assert!(rs.results.is_empty());

        rs.set_column_names(Arc::new(vec!["n".into(), "s".into()]));
        rs.add_row_values(vec![Value::Int(1), Value::Text("a".into())]);
        rs.add_row_values(vec![Value::Int(2), Value::Text("b".into())]);
        assert_eq!(rs.rows_affected, 2);
        assert_eq!(rs.scalar(), Some(&Value::Int(1)));

        let mut records = rs.to_records();
        records[0].set("s", "changed");
        assert_eq!(rs.results[0].get("s"), Some(&Value::Text("a".into())));
        assert_eq!(records[1].get("n"), Some(&Value::Int(2)));
    }
}
