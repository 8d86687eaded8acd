//! Tagged argument values.
//!
//! Arguments are converted into [`Value`] at the call boundary, so every
//! placeholder can check its accepted set against a closed variant list
//! instead of inspecting runtime type names. [`Value::Map`] keeps its pairs
//! in insertion order; rendered assignment lists follow that order.
//!
//! # Example
//! ```
//! use sqltpl::Value;
//!
//! let v = Value::from(serde_json::json!({"a": 1, "b": "x"}));
//! assert_eq!(v.type_name(), "mapping");
//! ```

/// An argument value matched positionally against a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Boolean, rendered as `1` / empty string under the generic rule.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Text, escaped and single-quoted under the generic rule.
    Str(String),
    /// Ordered sequence of values.
    Seq(Vec<Value>),
    /// Ordered key/value pairs.
    Map(Vec<(String, Value)>),
    /// The skip sentinel produced by [`skip`]. Formats to the empty
    /// string everywhere and is never emitted as literal SQL.
    Skip,
}

/// Produce the skip sentinel.
///
/// Placed in the argument list at the position a conditional-fragment
/// placeholder would consume, it forces the whole fragment to be omitted.
pub fn skip() -> Value {
    Value::Skip
}

impl Value {
    /// Runtime type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "mapping",
            Value::Skip => "skip",
        }
    }

    /// Build a sequence value from anything convertible.
    pub fn seq<V>(items: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Value>,
    {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Build a mapping value from key/value pairs, keeping their order.
    pub fn map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Parse a numeric string as an integer, truncating toward zero.
///
/// Accepts plain integers and decimal forms (`"3.9"` -> 3, `"-2.5"` -> -2).
pub(crate) fn numeric_str(s: &str) -> Option<i64> {
    let t = s.trim();
    if let Ok(i) = t.parse::<i64>() {
        return Some(i);
    }
    t.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::seq(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

/// Build a `Vec<Value>` argument list from mixed expressions.
///
/// ```
/// use sqltpl::{args, skip, Value};
///
/// let a = args![5, "name", skip()];
/// assert_eq!(a.len(), 3);
/// assert_eq!(a[2], Value::Skip);
/// ```
#[macro_export]
macro_rules! args {
    () => { Vec::<$crate::Value>::new() };
    ($($v:expr),+ $(,)?) => { vec![$($crate::Value::from($v)),+] };
}
