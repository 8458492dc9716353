use std::fmt::Write;

use crate::condition::Condition;
use crate::error::StoreError;

use super::condition::compile_condition;

/// Optional modifiers appended to a `SELECT`, always in the order
/// group, order, limit, offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub group: Option<String>,
    pub order: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl QueryOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn group_by(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn order_by(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Compile query options into a SQL suffix.
///
/// SQLite only accepts `OFFSET` after a `LIMIT`, so an offset without a limit
/// is written as `LIMIT -1 OFFSET n` (no upper bound).
#[must_use]
pub fn compile_options(options: Option<&QueryOptions>) -> String {
    let mut out = String::new();
    let Some(options) = options else {
        return out;
    };
    if let Some(group) = &options.group {
        out.push_str(" GROUP BY ");
        out.push_str(group);
    }
    if let Some(order) = &options.order {
        out.push_str(" ORDER BY ");
        out.push_str(order);
    }
    match (options.limit, options.offset) {
        (Some(limit), Some(offset)) => {
            let _ = write!(out, " LIMIT {limit} OFFSET {offset}");
        }
        (Some(limit), None) => {
            let _ = write!(out, " LIMIT {limit}");
        }
        (None, Some(offset)) => {
            let _ = write!(out, " LIMIT -1 OFFSET {offset}");
        }
        (None, None) => {}
    }
    out
}

/// `SELECT * FROM <table>` with condition and options.
///
/// # Errors
/// Propagates condition compilation errors.
pub fn compile_select(
    table: &str,
    condition: Option<&Condition>,
    options: Option<&QueryOptions>,
) -> Result<String, StoreError> {
    let mut sql = format!("SELECT * FROM {table}");
    sql.push_str(&compile_condition(condition)?);
    sql.push_str(&compile_options(options));
    Ok(sql)
}

/// `SELECT COUNT(*) FROM <table>` with condition.
///
/// # Errors
/// Propagates condition compilation errors.
pub fn compile_count(table: &str, condition: Option<&Condition>) -> Result<String, StoreError> {
    let mut sql = format!("SELECT COUNT(*) FROM {table}");
    sql.push_str(&compile_condition(condition)?);
    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_follow_fixed_order() {
        let options = QueryOptions::new()
            .offset(20)
            .limit(10)
            .order_by("name DESC")
            .group_by("team");
        assert_eq!(
            compile_options(Some(&options)),
            " GROUP BY team ORDER BY name DESC LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn offset_without_limit_stays_valid() {
        let options = QueryOptions::new().offset(5);
        assert_eq!(compile_options(Some(&options)), " LIMIT -1 OFFSET 5");
        assert_eq!(compile_options(Some(&QueryOptions::new())), "");
        assert_eq!(compile_options(None), "");
    }

    #[test]
    fn select_and_count() {
        let condition = Condition::new().compare("age", ">", 30);
        assert_eq!(
            compile_select("users", Some(&condition), Some(&QueryOptions::new().limit(1)))
                .unwrap(),
            "SELECT * FROM users WHERE age > 30 LIMIT 1"
        );
        assert_eq!(
            compile_count("users", None).unwrap(),
            "SELECT COUNT(*) FROM users"
        );
    }
}
