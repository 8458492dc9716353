use std::fmt::Write;

use crate::error::StoreError;
use crate::types::Value;

/// Double every single quote so `value` can sit inside a `'...'` literal.
#[must_use]
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    write_escaped(&mut out, value);
    out
}

fn write_escaped(out: &mut String, value: &str) {
    let mut position = 0;
    for (i, c) in value.char_indices() {
        if c == '\'' {
            out.push_str(&value[position..i]);
            out.push_str("''");
            position = i + 1;
        }
    }
    out.push_str(&value[position..]);
}

fn write_quoted(out: &mut String, value: &str) {
    out.push('\'');
    write_escaped(out, value);
    out.push('\'');
}

/// Append `value` to `out` as a SQL literal.
///
/// Every text-bearing variant (text, JSON, timestamps) goes through the same
/// quote-doubling path; numbers and booleans are written bare.
///
/// # Errors
/// Returns `StoreError::InvalidArgument` for NaN or infinite floats, which
/// have no SQL literal form, and for text containing NUL, which would cut the
/// statement short.
pub fn write_literal(out: &mut String, value: &Value) -> Result<(), StoreError> {
    match value {
        Value::Int(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Float(f) => {
            if !f.is_finite() {
                return Err(StoreError::InvalidArgument(format!(
                    "non-finite float {f} cannot be written as a SQL literal"
                )));
            }
            // Debug keeps the fractional part (`1.0`), so the engine sees a REAL.
            let _ = write!(out, "{f:?}");
        }
        Value::Text(s) => {
            if s.contains('\0') {
                return Err(StoreError::InvalidArgument(
                    "text literal contains NUL".to_owned(),
                ));
            }
            write_quoted(out, s);
        }
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Timestamp(dt) => {
            let formatted = dt.format("%F %T%.f").to_string();
            write_quoted(out, &formatted);
        }
        Value::Null => out.push_str("NULL"),
        Value::JSON(json) => write_quoted(out, &json.to_string()),
        Value::Blob(bytes) => {
            out.push_str("X'");
            for byte in bytes {
                let _ = write!(out, "{byte:02X}");
            }
            out.push('\'');
        }
    }
    Ok(())
}

/// Render `value` as a standalone SQL literal.
///
/// # Errors
/// See [`write_literal`].
pub fn literal(value: &Value) -> Result<String, StoreError> {
    let mut out = String::new();
    write_literal(&mut out, value)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn doubles_every_quote() {
        assert_eq!(escape_literal("O'Brien"), "O''Brien");
        assert_eq!(escape_literal("''"), "''''");
        assert_eq!(escape_literal("no quotes"), "no quotes");
        assert_eq!(escape_literal("é'ü"), "é''ü");
    }

    #[test]
    fn escaping_reverses_cleanly() {
        for original in ["'", "a'b'c", "'leading", "trailing'", "plain", ""] {
            let escaped = escape_literal(original);
            assert_eq!(escaped.replace("''", "'"), original);
        }
    }

    #[test]
    fn renders_scalars() {
        assert_eq!(literal(&Value::Int(-7)).unwrap(), "-7");
        assert_eq!(literal(&Value::Float(2.5)).unwrap(), "2.5");
        assert_eq!(literal(&Value::Float(3.0)).unwrap(), "3.0");
        assert_eq!(literal(&Value::Bool(true)).unwrap(), "true");
        assert_eq!(literal(&Value::Null).unwrap(), "NULL");
        assert_eq!(literal(&Value::Blob(vec![0x0a, 0xff])).unwrap(), "X'0AFF'");
    }

    #[test]
    fn quotes_text_like_values() {
        assert_eq!(literal(&Value::Text("it's".into())).unwrap(), "'it''s'");
        assert_eq!(
            literal(&Value::JSON(json!({"k": "it's"}))).unwrap(),
            r#"'{"k":"it''s"}'"#
        );
        let dt = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(literal(&Value::Timestamp(dt)).unwrap(), "'2024-01-02 03:04:05'");
    }

    #[test]
    fn rejects_non_finite_floats() {
        assert!(literal(&Value::Float(f64::NAN)).unwrap_err().is_invalid_argument());
        assert!(literal(&Value::Float(f64::INFINITY)).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn rejects_text_with_nul() {
        let err = literal(&Value::Text("a\0b".into())).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("NUL"));
    }
}
