//! Conditional fragment handling.
//!
//! A template may carry one optional `{...}` span. [`extract`] splits it
//! off the main body; [`process`] substitutes its placeholders and decides
//! whether the fragment survives. A falsy formatted value (empty string,
//! `0`, or `NULL`) anywhere in the fragment drops the whole fragment,
//! surrounding literal text included.

use crate::builder::ArgCursor;
use crate::error::TplResult;
use crate::escape::EscapeLiteral;
use crate::format::{format_value, is_falsy};
use crate::scan::{Token, lex};

/// Split the first `{...}` span off the template.
///
/// Returns the main body with the span removed, and the fragment text
/// without its braces. An unmatched `{` (or a `}` with no `{` before it)
/// means no fragment; the braces stay literal text. Only the first
/// matched pair is recognized.
pub(crate) fn extract(template: &str) -> Option<(String, &str)> {
    let open = template.find('{')?;
    let close = template[open..].find('}')? + open;
    let fragment = &template[open + 1..close];

    let mut body = String::with_capacity(template.len() - fragment.len() - 2);
    body.push_str(&template[..open]);
    body.push_str(&template[close + 1..]);
    Some((body, fragment))
}

/// Substitute the fragment's placeholders against the re-based argument
/// pool.
///
/// Returns the rendered text and whether the fragment should be kept.
/// On a skip signal the text produced so far is returned with
/// `keep = false`; the caller discards it. A fragment without
/// placeholders, or one reached with the pool already empty, is returned
/// verbatim with `keep = true`.
pub(crate) fn process<E: EscapeLiteral>(
    fragment: &str,
    cursor: &mut ArgCursor<'_>,
    escaper: &E,
) -> TplResult<(String, bool)> {
    let tokens = lex(fragment);
    let has_placeholders = tokens
        .iter()
        .any(|t| matches!(t, Token::Placeholder(_)));
    if !has_placeholders || cursor.is_exhausted() {
        return Ok((fragment.to_string(), true));
    }

    let mut out = String::with_capacity(fragment.len());
    for token in tokens {
        match token {
            Token::Literal(span) => out.push_str(&fragment[span]),
            Token::Placeholder(kind) => {
                let value = cursor.next()?;
                let text = format_value(value, kind, escaper)?;
                if is_falsy(&text) {
                    return Ok((out, false));
                }
                out.push_str(&text);
            }
        }
    }
    Ok((out, true))
}
