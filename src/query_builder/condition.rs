use crate::condition::{Condition, Predicate};
use crate::error::StoreError;

use super::literal::write_literal;

/// Compile a condition into a ` WHERE ...` suffix.
///
/// An absent or empty condition compiles to the empty string so callers can
/// append the result unconditionally.
///
/// # Errors
/// Returns `StoreError::InvalidArgument` when a value has no literal form or a
/// `Compare` predicate uses a set-membership operator (use `Predicate::In`).
pub fn compile_condition(condition: Option<&Condition>) -> Result<String, StoreError> {
    let Some(condition) = condition else {
        return Ok(String::new());
    };

    let mut out = String::new();
    for (idx, (column, predicate)) in condition.iter().enumerate() {
        out.push_str(if idx == 0 { " WHERE " } else { " AND " });
        write_term(&mut out, column, predicate)?;
    }
    Ok(out)
}

fn write_term(out: &mut String, column: &str, predicate: &Predicate) -> Result<(), StoreError> {
    out.push_str(column);
    match predicate {
        Predicate::Equals(value) if value.is_null() => out.push_str(" IS NULL"),
        Predicate::Equals(value) => {
            out.push_str(" = ");
            write_literal(out, value)?;
        }
        Predicate::Compare(operator, value) => {
            let operator = operator.trim();
            if is_membership_operator(operator) {
                return Err(StoreError::InvalidArgument(format!(
                    "operator '{operator}' on column {column} needs a list operand"
                )));
            }
            out.push(' ');
            out.push_str(operator);
            out.push(' ');
            write_literal(out, value)?;
        }
        Predicate::In(operator, values) => {
            out.push(' ');
            out.push_str(operator.trim());
            out.push_str(" (");
            for (idx, value) in values.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_literal(out, value)?;
            }
            out.push(')');
        }
    }
    Ok(())
}

fn is_membership_operator(operator: &str) -> bool {
    let mut words = operator.split_whitespace().map(str::to_ascii_lowercase);
    match (words.next().as_deref(), words.next().as_deref(), words.next()) {
        (Some("in"), None, None) | (Some("not"), Some("in"), None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    #[test]
    fn absent_and_empty_compile_to_nothing() {
        assert_eq!(compile_condition(None).unwrap(), "");
        assert_eq!(compile_condition(Some(&Condition::new())).unwrap(), "");
    }

    #[test]
    fn equality_escapes_text() {
        let condition = Condition::new().equals("name", "O'Brien");
        assert_eq!(
            compile_condition(Some(&condition)).unwrap(),
            " WHERE name = 'O''Brien'"
        );
    }

    #[test]
    fn non_text_scalars_are_bare() {
        let condition = Condition::new().equals("age", 30).equals("active", true);
        assert_eq!(
            compile_condition(Some(&condition)).unwrap(),
            " WHERE age = 30 AND active = true"
        );
    }

    #[test]
    fn null_equality_uses_is_null() {
        let condition = Condition::new().equals("deleted_at", Value::Null);
        assert_eq!(
            compile_condition(Some(&condition)).unwrap(),
            " WHERE deleted_at IS NULL"
        );
    }

    #[test]
    fn operator_is_trimmed_and_case_kept() {
        let condition = Condition::new()
            .compare("age", "> ", 30)
            .compare("name", "LIKE", "O'%");
        assert_eq!(
            compile_condition(Some(&condition)).unwrap(),
            " WHERE age > 30 AND name LIKE 'O''%'"
        );
    }

    #[test]
    fn membership_lists_escape_each_element() {
        let condition = Condition::new()
            .is_in("status", ["a", "b'c"])
            .with("id", Predicate::In("NOT IN".into(), vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(
            compile_condition(Some(&condition)).unwrap(),
            " WHERE status in ('a','b''c') AND id NOT IN (1,2)"
        );
    }

    #[test]
    fn membership_operator_with_scalar_is_rejected() {
        for op in ["in", "IN", " not  in "] {
            let condition = Condition::new().compare("status", op, "('a')");
            let err = compile_condition(Some(&condition)).unwrap_err();
            assert!(err.is_invalid_argument(), "{op}: {err}");
        }
        // "inner" is not a membership operator
        assert!(!is_membership_operator("inner"));
    }

    #[test]
    fn compiling_twice_is_identical() {
        let condition = Condition::new()
            .equals("b", "x")
            .compare("a", "<=", 2.5)
            .not_in("c", [1, 2, 3]);
        let first = compile_condition(Some(&condition)).unwrap();
        let second = compile_condition(Some(&condition)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, " WHERE b = 'x' AND a <= 2.5 AND c not in (1,2,3)");
    }
}
