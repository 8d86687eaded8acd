//! Per-kind value formatting.
//!
//! [`format_value`] converts one argument into SQL-ready text for the
//! placeholder it was matched against. The accepted-set check runs first;
//! everything after it follows the per-kind rules:
//!
//! - `?d`: base-10 integer literal (bool -> 0/1, null -> 0, numeric
//!   strings truncate toward zero)
//! - `?f`: decimal floating literal, null -> `NULL`
//! - `?#`: backtick-quoted identifier(s)
//! - `?a`: comma-separated list, or `` `key` = value `` assignments
//! - `?`: dispatch on the value variant; also the recursive rule for
//!   `?a` members

use crate::error::{TplError, TplResult};
use crate::escape::EscapeLiteral;
use crate::scan::Placeholder;
use crate::value::{Value, numeric_str};

/// Format `value` for `kind`, or fail when the value's type is outside
/// the kind's accepted set.
pub(crate) fn format_value<E: EscapeLiteral>(
    value: &Value,
    kind: Placeholder,
    escaper: &E,
) -> TplResult<String> {
    if !kind.accepts(value) {
        return Err(TplError::invalid_type(kind.as_str(), value.type_name()));
    }
    match kind {
        Placeholder::Generic => Ok(generic(value, escaper)),
        Placeholder::Int => digit(value),
        Placeholder::Float => float(value),
        Placeholder::List => Ok(list(value, escaper)),
        Placeholder::Ident => Ok(ident(value)),
    }
}

/// A formatted value that signals "skip" when produced inside the
/// conditional fragment: empty string, zero, or the NULL literal.
pub(crate) fn is_falsy(text: &str) -> bool {
    text.is_empty() || text == "0" || text == "NULL"
}

/// The generic (`?`) rule, also applied recursively to `?a` members.
///
/// Booleans map to `1` / empty string; a float truncates to its integer
/// part, matching the engine this format was lifted from.
fn generic<E: EscapeLiteral>(value: &Value, escaper: &E) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => (f.trunc() as i64).to_string(),
        Value::Str(s) => {
            let escaped = escaper.escape_literal(s);
            let mut out = String::with_capacity(escaped.len() + 2);
            out.push('\'');
            out.push_str(&escaped);
            out.push('\'');
            out
        }
        Value::Seq(_) | Value::Map(_) => list(value, escaper),
        Value::Skip => String::new(),
    }
}

/// The `?d` rule.
fn digit(value: &Value) -> TplResult<String> {
    match value {
        Value::Int(i) => Ok(i.to_string()),
        Value::Bool(b) => Ok(if *b { "1" } else { "0" }.to_string()),
        Value::Null => Ok("0".to_string()),
        Value::Str(s) => match numeric_str(s) {
            Some(i) => Ok(i.to_string()),
            None => Err(TplError::invalid_type("?d", "string")),
        },
        Value::Skip => Ok(String::new()),
        other => Err(TplError::invalid_type("?d", other.type_name())),
    }
}

/// The `?f` rule.
fn float(value: &Value) -> TplResult<String> {
    match value {
        Value::Float(f) if f.is_finite() => Ok(f.to_string()),
        Value::Float(_) => Err(TplError::invalid_type("?f", "non-finite float")),
        Value::Null => Ok("NULL".to_string()),
        Value::Skip => Ok(String::new()),
        other => Err(TplError::invalid_type("?f", other.type_name())),
    }
}

/// The `?#` rule. A non-string sequence element renders the literal
/// text `skip`, kept for output compatibility with the engine this
/// format was lifted from.
fn ident(value: &Value) -> String {
    match value {
        Value::Str(s) => quote_ident(s),
        Value::Seq(items) => {
            let mut out = String::new();
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                match item {
                    Value::Str(s) => out.push_str(&quote_ident(s)),
                    _ => out.push_str("skip"),
                }
            }
            out
        }
        _ => String::new(),
    }
}

/// The `?a` rule.
fn list<E: EscapeLiteral>(value: &Value, escaper: &E) -> String {
    match value {
        Value::Seq(items) => {
            let mut out = String::new();
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&generic(item, escaper));
            }
            out
        }
        Value::Map(pairs) => {
            let mut out = String::new();
            for (i, (key, item)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&quote_ident(key));
                out.push_str(" = ");
                out.push_str(&generic(item, escaper));
            }
            out
        }
        _ => String::new(),
    }
}

/// Backtick-quote an identifier, doubling embedded backticks.
fn quote_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('`');
    for ch in name.chars() {
        if ch == '`' {
            out.push('`');
            out.push('`');
        } else {
            out.push(ch);
        }
    }
    out.push('`');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::MysqlEscape;

    fn fmt(value: &Value, kind: Placeholder) -> TplResult<String> {
        format_value(value, kind, &MysqlEscape)
    }

    #[test]
    fn digit_formats_integers_exactly() {
        assert_eq!(fmt(&Value::Int(5), Placeholder::Int).unwrap(), "5");
        assert_eq!(fmt(&Value::Int(-17), Placeholder::Int).unwrap(), "-17");
        assert_eq!(fmt(&Value::Int(0), Placeholder::Int).unwrap(), "0");
    }

    #[test]
    fn digit_maps_bool_and_null() {
        assert_eq!(fmt(&Value::Bool(true), Placeholder::Int).unwrap(), "1");
        assert_eq!(fmt(&Value::Bool(false), Placeholder::Int).unwrap(), "0");
        assert_eq!(fmt(&Value::Null, Placeholder::Int).unwrap(), "0");
    }

    #[test]
    fn digit_truncates_numeric_strings() {
        assert_eq!(
            fmt(&Value::Str("3.9".into()), Placeholder::Int).unwrap(),
            "3"
        );
        assert_eq!(
            fmt(&Value::Str("42".into()), Placeholder::Int).unwrap(),
            "42"
        );
    }

    #[test]
    fn digit_rejects_floats() {
        let err = fmt(&Value::Float(1.5), Placeholder::Int).unwrap_err();
        assert!(err.is_invalid_type());
    }

    #[test]
    fn digit_rejects_non_numeric_strings() {
        assert!(fmt(&Value::Str("abc".into()), Placeholder::Int).is_err());
    }

    #[test]
    fn float_renders_decimal_form() {
        assert_eq!(fmt(&Value::Float(3.5), Placeholder::Float).unwrap(), "3.5");
        assert_eq!(fmt(&Value::Float(3.0), Placeholder::Float).unwrap(), "3");
        assert_eq!(fmt(&Value::Null, Placeholder::Float).unwrap(), "NULL");
    }

    #[test]
    fn float_rejects_non_finite() {
        assert!(fmt(&Value::Float(f64::NAN), Placeholder::Float).is_err());
        assert!(fmt(&Value::Float(f64::INFINITY), Placeholder::Float).is_err());
    }

    #[test]
    fn float_rejects_integers() {
        assert!(fmt(&Value::Int(1), Placeholder::Float).is_err());
    }

    #[test]
    fn generic_quotes_strings_via_escaper() {
        assert_eq!(
            fmt(&Value::Str("it's".into()), Placeholder::Generic).unwrap(),
            "'it\\'s'"
        );
    }

    #[test]
    fn generic_null_and_bool() {
        assert_eq!(fmt(&Value::Null, Placeholder::Generic).unwrap(), "NULL");
        assert_eq!(fmt(&Value::Bool(true), Placeholder::Generic).unwrap(), "1");
        assert_eq!(fmt(&Value::Bool(false), Placeholder::Generic).unwrap(), "");
    }

    #[test]
    fn generic_truncates_floats() {
        assert_eq!(fmt(&Value::Float(2.7), Placeholder::Generic).unwrap(), "2");
        assert_eq!(
            fmt(&Value::Float(-2.7), Placeholder::Generic).unwrap(),
            "-2"
        );
    }

    #[test]
    fn ident_quotes_single_name() {
        assert_eq!(
            fmt(&Value::Str("name".into()), Placeholder::Ident).unwrap(),
            "`name`"
        );
    }

    #[test]
    fn ident_doubles_embedded_backticks() {
        assert_eq!(
            fmt(&Value::Str("we`ird".into()), Placeholder::Ident).unwrap(),
            "`we``ird`"
        );
    }

    #[test]
    fn ident_quotes_each_sequence_element() {
        let v = Value::seq(["a", "b"]);
        assert_eq!(fmt(&v, Placeholder::Ident).unwrap(), "`a`, `b`");
    }

    #[test]
    fn ident_non_string_element_renders_skip_literal() {
        let v = Value::Seq(vec![Value::Str("a".into()), Value::Int(1)]);
        assert_eq!(fmt(&v, Placeholder::Ident).unwrap(), "`a`, skip");
    }

    #[test]
    fn list_sequence_uses_generic_rule_per_element() {
        let v = Value::Seq(vec![
            Value::Int(1),
            Value::Str("x".into()),
            Value::Null,
            Value::Float(2.5),
        ]);
        assert_eq!(fmt(&v, Placeholder::List).unwrap(), "1, 'x', NULL, 2");
    }

    #[test]
    fn list_mapping_renders_assignments_in_order() {
        let v = Value::map([("a", Value::Int(1)), ("b", Value::Str("x".into()))]);
        assert_eq!(fmt(&v, Placeholder::List).unwrap(), "`a` = 1, `b` = 'x'");
    }

    #[test]
    fn list_rejects_scalars() {
        assert!(fmt(&Value::Int(1), Placeholder::List).is_err());
        assert!(fmt(&Value::Str("x".into()), Placeholder::List).is_err());
    }

    #[test]
    fn skip_sentinel_formats_empty_everywhere() {
        for kind in [
            Placeholder::Generic,
            Placeholder::Int,
            Placeholder::Float,
            Placeholder::List,
            Placeholder::Ident,
        ] {
            assert_eq!(fmt(&Value::Skip, kind).unwrap(), "");
        }
    }

    #[test]
    fn falsy_detection() {
        assert!(is_falsy(""));
        assert!(is_falsy("0"));
        assert!(is_falsy("NULL"));
        assert!(!is_falsy("1"));
        assert!(!is_falsy("'x'"));
        assert!(!is_falsy("0.5"));
    }
}
