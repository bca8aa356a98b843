//! The JSON value model produced by [`parse`](crate::parse).
//!
//! Integers and floats are kept apart (the kind is fixed by literal shape at
//! parse time). Objects use an insertion-ordered map so that walking a tree is
//! deterministic, although callers must not depend on source order.
//!
//! The emptiness predicates are deliberately lenient: an empty array, an empty
//! object, and a scalar without text all count as "empty", which the parser
//! relies on to detect the end of an array.

use crate::error::{Result, ZsonError};
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// String-keyed members of a JSON object.
pub type Map = IndexMap<String, Value>;

/// A parsed JSON document node.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

/// The two numeric kinds a literal can commit to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Value {
    /// True for a non-empty array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(items) if !items.is_empty())
    }

    /// True for an object with at least one member.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(map) if !map.is_empty())
    }

    /// True for a scalar whose text is non-empty.
    pub fn is_simple(&self) -> bool {
        match self {
            Value::Bool(_) | Value::Number(_) => true,
            Value::String(text) => !text.is_empty(),
            _ => false,
        }
    }

    /// True when there is no scalar payload. Arrays and objects qualify.
    pub fn is_null(&self) -> bool {
        !matches!(self, Value::Bool(_) | Value::Number(_) | Value::String(_))
    }

    /// True when the node is neither a non-empty container nor a non-empty scalar.
    pub fn is_empty(&self) -> bool {
        !self.is_array() && !self.is_object() && !self.is_simple()
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// The scalar payload rendered as text, or `None` without a scalar payload.
    pub fn scalar_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::String(text) => Some(Cow::Borrowed(text)),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        self.scalar_text().map(Cow::into_owned)
    }

    pub fn as_int(&self) -> Result<i32> {
        self.parse_scalar("int")
    }

    pub fn as_long(&self) -> Result<i64> {
        self.parse_scalar("long")
    }

    pub fn as_float(&self) -> Result<f32> {
        self.parse_scalar("float")
    }

    pub fn as_double(&self) -> Result<f64> {
        self.parse_scalar("double")
    }

    pub fn as_byte(&self) -> Result<i8> {
        self.parse_scalar("byte")
    }

    /// `true` when the text equals `true` ignoring case; anything else is `false`.
    pub fn as_bool(&self) -> bool {
        self.scalar_text()
            .is_some_and(|text| text.eq_ignore_ascii_case("true"))
    }

    /// Parse the scalar text as `T`, reporting `target` on failure.
    pub(crate) fn parse_scalar<T: FromStr>(&self, target: &'static str) -> Result<T> {
        let text = self.scalar_text().ok_or_else(|| ZsonError::NumericFormat {
            value: "null".to_string(),
            target,
        })?;
        text.parse::<T>().map_err(|_| ZsonError::NumericFormat {
            value: text.into_owned(),
            target,
        })
    }

    /// Short name of the variant, used in mismatch diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(Number::Integer(_)) => "integer",
            Value::Number(Number::Float(_)) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{n}"),
            Number::Float(x) => f.write_str(&format_float(*x)),
        }
    }
}

/// Render a float so that it re-parses as a float: always with a `.`, never
/// with an exponent.
pub(crate) fn format_float(x: f64) -> String {
    if let Some(special) = non_finite(x) {
        return special.to_string();
    }
    with_point(x.to_string())
}

pub(crate) fn format_float32(x: f32) -> String {
    if let Some(special) = non_finite(f64::from(x)) {
        return special.to_string();
    }
    with_point(x.to_string())
}

fn non_finite(x: f64) -> Option<&'static str> {
    if x.is_nan() {
        Some("NaN")
    } else if x.is_infinite() {
        Some(if x > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        None
    }
}

fn with_point(text: String) -> String {
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Compact JSON rendering. Quotes and backslashes inside strings and keys are
/// escaped so that the output re-parses to the same tree.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(text) => write_quoted(f, text),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_quoted(f, key)?;
                    write!(f, ":{item}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Quote `text`, escaping quotes and backslashes.
fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{ch}")?;
    }
    f.write_str("\"")
}

impl FromStr for Value {
    type Err = ZsonError;

    fn from_str(source: &str) -> Result<Self> {
        crate::parser::parse(source)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::Integer(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(Number::Float(x))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::String(text)
    }
}
