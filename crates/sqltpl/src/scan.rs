//! Placeholder scanning.
//!
//! [`lex`] turns a template into a token stream of literal spans and typed
//! placeholders. The same stream drives both the main-body and the
//! conditional-fragment substitution passes; scanning never looks at the
//! argument list.
//!
//! A `?` is a placeholder only when followed by one of `d`, `f`, `a`, `#`,
//! whitespace, or end of input. Anything else (`?x`, `?5`) stays literal
//! text.

use std::ops::Range;

use crate::value::{Value, numeric_str};

/// Placeholder kind, in template syntax order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `?`: generic value.
    Generic,
    /// `?d`: integer literal.
    Int,
    /// `?f`: floating literal.
    Float,
    /// `?a`: list or key/value set.
    List,
    /// `?#`: identifier(s).
    Ident,
}

impl Placeholder {
    /// The template token for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Placeholder::Generic => "?",
            Placeholder::Int => "?d",
            Placeholder::Float => "?f",
            Placeholder::List => "?a",
            Placeholder::Ident => "?#",
        }
    }

    /// Whether `value` is in this kind's accepted set.
    ///
    /// The skip sentinel is accepted everywhere. `?d` accepts strings
    /// only when they parse as a number. `?` accepts sequences and
    /// mappings because the generic rule delegates those to the `?a`
    /// rule.
    pub fn accepts(&self, value: &Value) -> bool {
        if matches!(value, Value::Skip) {
            return true;
        }
        match self {
            Placeholder::Generic => true,
            Placeholder::Int => match value {
                Value::Int(_) | Value::Bool(_) | Value::Null => true,
                Value::Str(s) => numeric_str(s).is_some(),
                _ => false,
            },
            Placeholder::Float => matches!(value, Value::Float(_) | Value::Null),
            Placeholder::List => matches!(value, Value::Seq(_) | Value::Map(_)),
            Placeholder::Ident => matches!(value, Value::Str(_) | Value::Seq(_)),
        }
    }
}

/// One lexed piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Byte range of literal text in the input.
    Literal(Range<usize>),
    /// A typed placeholder.
    Placeholder(Placeholder),
}

/// Lex a template into literal spans and placeholder tokens.
///
/// A template without placeholders yields a single literal token (or
/// nothing for the empty string); that is not an error.
pub fn lex(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut lit_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'?' {
            let (kind, len) = match bytes.get(i + 1) {
                Some(b'd') => (Some(Placeholder::Int), 2),
                Some(b'f') => (Some(Placeholder::Float), 2),
                Some(b'a') => (Some(Placeholder::List), 2),
                Some(b'#') => (Some(Placeholder::Ident), 2),
                Some(c) if c.is_ascii_whitespace() => (Some(Placeholder::Generic), 1),
                None => (Some(Placeholder::Generic), 1),
                Some(_) => (None, 0),
            };
            if let Some(kind) = kind {
                if lit_start < i {
                    tokens.push(Token::Literal(lit_start..i));
                }
                tokens.push(Token::Placeholder(kind));
                i += len;
                lit_start = i;
                continue;
            }
        }
        i += 1;
    }

    if lit_start < bytes.len() {
        tokens.push(Token::Literal(lit_start..bytes.len()));
    }
    tokens
}
