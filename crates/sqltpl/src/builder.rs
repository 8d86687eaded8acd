//! Query building entry point.
//!
//! [`QueryBuilder`] holds only the escaping delegate; per-call argument
//! consumption lives in an explicit [`ArgCursor`], so one builder value
//! can serve any number of concurrent `build` calls.
//!
//! # Example
//! ```
//! use sqltpl::{args, build_query};
//!
//! let sql = build_query("SELECT * FROM t WHERE id = ?d", &args![5])?;
//! assert_eq!(sql, "SELECT * FROM t WHERE id = 5");
//! # Ok::<(), sqltpl::TplError>(())
//! ```

use tracing::{debug, trace};

use crate::error::{TplError, TplResult};
use crate::escape::{EscapeLiteral, MysqlEscape};
use crate::format::format_value;
use crate::fragment;
use crate::scan::{Token, lex};
use crate::value::Value;

/// Positional cursor over the argument pool.
///
/// Arguments are consumed front-to-back, once each; running dry at a
/// placeholder yields `InsufficientArguments`.
#[derive(Debug)]
pub(crate) struct ArgCursor<'a> {
    args: &'a [Value],
    pos: usize,
}

impl<'a> ArgCursor<'a> {
    pub(crate) fn new(args: &'a [Value]) -> Self {
        Self { args, pos: 0 }
    }

    /// Consume the next argument.
    pub(crate) fn next(&mut self) -> TplResult<&'a Value> {
        let value = self
            .args
            .get(self.pos)
            .ok_or(TplError::InsufficientArguments {
                needed: self.pos + 1,
                supplied: self.args.len(),
            })?;
        self.pos += 1;
        Ok(value)
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.pos >= self.args.len()
    }

    /// Fresh 0-indexed cursor over the unconsumed remainder.
    pub(crate) fn rebase(&self) -> ArgCursor<'a> {
        ArgCursor::new(&self.args[self.pos..])
    }
}

/// The templating engine: substitutes typed placeholders and resolves
/// the optional conditional fragment.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder<E = MysqlEscape> {
    escaper: E,
}

impl<E: EscapeLiteral> QueryBuilder<E> {
    /// Create a builder around an escaping delegate.
    pub fn new(escaper: E) -> Self {
        Self { escaper }
    }

    /// Render `template`, consuming `args` left-to-right: main-body
    /// placeholders first, fragment placeholders second.
    ///
    /// A kept fragment is appended after the main body regardless of its
    /// original position; the result is trimmed. A template with zero
    /// placeholders ignores the arguments and is returned unchanged
    /// (trimmed). Surplus arguments are ignored.
    pub fn build(&self, template: &str, args: &[Value]) -> TplResult<String> {
        debug!(args = args.len(), "building query");

        if !lex(template)
            .iter()
            .any(|t| matches!(t, Token::Placeholder(_)))
        {
            return Ok(template.trim().to_string());
        }

        let (body, frag) = match fragment::extract(template) {
            Some((body, frag)) => (body, Some(frag)),
            None => (template.to_string(), None),
        };

        let mut cursor = ArgCursor::new(args);
        let mut out = String::with_capacity(template.len());
        for token in lex(&body) {
            match token {
                Token::Literal(span) => out.push_str(&body[span]),
                Token::Placeholder(kind) => {
                    let value = cursor.next()?;
                    let text = format_value(value, kind, &self.escaper)?;
                    trace!(
                        placeholder = kind.as_str(),
                        value = value.type_name(),
                        "substituted"
                    );
                    out.push_str(&text);
                }
            }
        }

        if let Some(frag) = frag {
            let mut rest = cursor.rebase();
            let (text, keep) = fragment::process(frag, &mut rest, &self.escaper)?;
            if keep {
                out.push_str(&text);
                debug!("conditional fragment kept");
            } else {
                debug!("conditional fragment dropped");
            }
        }

        Ok(out.trim().to_string())
    }
}

/// Render a template with the bundled MySQL-style escaper.
pub fn build_query(template: &str, args: &[Value]) -> TplResult<String> {
    QueryBuilder::new(MysqlEscape).build(template, args)
}
