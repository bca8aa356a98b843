//! Lenient recursive-descent JSON reader.
//!
//! This is not a conforming JSON parser, and its deviations are part of the
//! contract:
//!
//! - Keys and strings may be quoted with `'` or `"`.
//! - A backslash contributes the following character literally (`\q` is `q`,
//!   `\n` is `n`). There is no `\uXXXX` decoding here; run
//!   [`unicode::decode`](crate::unicode::decode) over the text first if needed.
//! - An empty quoted string has no payload and reads as `null`.
//! - Bare literals are classified by shape, first match wins: integer
//!   (`-?[1-9][0-9]*` or `0`), decimal (`[1-9][0-9]*.[0-9]*`, `0.[0-9]*` or
//!   `0`), `true`/`false`, `null`. Anything else is a
//!   [`ParseLiteral`](ZsonError::ParseLiteral) error. Negative decimals and
//!   exponents are therefore rejected.
//! - An array stops at the first empty element (`null`, `""`, `[]`, `{}`).
//! - Truncated or unbalanced input is not diagnosed; the reader stops at the
//!   end of the text and returns whatever it has built.

use crate::error::{Result, ZsonError};
use crate::value::{Map, Number, Value};

/// Parse `source` into a [`Value`] tree.
///
/// The only guaranteed error is an unclassifiable bare literal; an integer
/// literal outside the `i64` range fails with `NumericFormat`.
pub fn parse(source: &str) -> Result<Value> {
    Reader::new(source).parse()
}

/// Cursor over the source characters plus a scratch buffer for the token
/// being accumulated.
struct Reader<'a> {
    source: &'a str,
    chars: Vec<char>,
    position: usize,
    token: String,
}

impl<'a> Reader<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            position: 0,
            token: String::new(),
        }
    }

    /// Object first, then array, then a bare value.
    fn parse(mut self) -> Result<Value> {
        self.skip_blank();
        match self.peek() {
            Some('{') => self.object(),
            Some('[') => self.array(),
            _ => self.value(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// Called with the cursor on `{`.
    fn object(&mut self) -> Result<Value> {
        self.position += 1;
        let mut map = Map::new();
        self.skip_blank();
        if self.peek() == Some('}') {
            self.position += 1;
            return Ok(Value::Object(map));
        }

        loop {
            let key = self.key();
            if key.is_empty() {
                break;
            }

            // closing quote, then the colon
            self.position += 1;
            self.skip_blank();
            self.position += 1;

            let value = self.value()?;
            map.insert(key, value);
            self.skip_blank();
            if matches!(self.peek(), Some('}') | None) {
                break;
            }
            // ','
            self.position += 1;
        }
        // '}'
        self.position += 1;
        Ok(Value::Object(map))
    }

    /// Called with the cursor on `[`.
    fn array(&mut self) -> Result<Value> {
        self.position += 1;
        let mut items = Vec::new();
        self.skip_blank();
        if self.peek() == Some(']') {
            self.position += 1;
            return Ok(Value::Array(items));
        }

        loop {
            let node = self.value()?;
            if node.is_empty() {
                break;
            }
            items.push(node);
            self.skip_blank();
            if matches!(self.peek(), Some(']') | None) {
                break;
            }
            // ','
            self.position += 1;
        }
        // ']'
        self.position += 1;
        Ok(Value::Array(items))
    }

    /// Read a quoted key. Whatever character opens the key is taken as its
    /// quote; the key also ends at `}`. Control characters are dropped.
    fn key(&mut self) -> String {
        self.skip_blank();
        let Some(quote) = self.peek() else {
            return String::new();
        };
        self.position += 1;

        while let Some(ch) = self.peek() {
            if ch < ' ' {
                self.position += 1;
                continue;
            }
            if ch == '\\' && self.position + 1 < self.chars.len() {
                self.token.push(self.chars[self.position + 1]);
                self.position += 2;
                continue;
            }
            if ch == quote || ch == '}' {
                break;
            }
            self.token.push(ch);
            self.position += 1;
        }

        std::mem::take(&mut self.token)
    }

    fn value(&mut self) -> Result<Value> {
        self.skip_blank();
        match self.peek() {
            Some('{') => self.object(),
            Some('[') => self.array(),
            Some(quote @ ('\'' | '"')) => Ok(self.string(quote)),
            _ => self.literal(),
        }
    }

    /// Called with the cursor on the opening quote.
    fn string(&mut self, quote: char) -> Value {
        self.position += 1;
        while let Some(ch) = self.peek() {
            self.position += 1;
            if ch == '\\' {
                if let Some(escaped) = self.peek() {
                    self.token.push(escaped);
                    self.position += 1;
                }
                continue;
            }
            if ch == quote {
                break;
            }
            self.token.push(ch);
        }

        match self.take_token() {
            Some(text) => Value::String(text),
            None => Value::Null,
        }
    }

    /// Accumulate an unquoted token up to `,`, `}` or `]` and classify it.
    fn literal(&mut self) -> Result<Value> {
        while let Some(ch) = self.peek() {
            if ch <= ' ' {
                self.position += 1;
                continue;
            }
            if ch == '\\' {
                self.position += 1;
                if let Some(escaped) = self.peek() {
                    self.token.push(escaped);
                    self.position += 1;
                }
                continue;
            }
            if matches!(ch, ',' | '}' | ']') {
                break;
            }
            self.token.push(ch);
            self.position += 1;
        }

        match self.take_token() {
            Some(text) => classify(text, self.source),
            None => Ok(Value::Null),
        }
    }

    fn skip_blank(&mut self) {
        while matches!(self.peek(), Some(ch) if ch <= ' ') {
            self.position += 1;
        }
    }

    /// Drain the scratch buffer; an empty token has no payload.
    fn take_token(&mut self) -> Option<String> {
        let token = std::mem::take(&mut self.token);
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }
}

/// Decide what a bare literal is. The checks run in a fixed order.
fn classify(text: String, source: &str) -> Result<Value> {
    if is_integer_literal(&text) {
        return match text.parse::<i64>() {
            Ok(n) => Ok(Value::Number(Number::Integer(n))),
            Err(_) => Err(ZsonError::NumericFormat {
                value: text,
                target: "long",
            }),
        };
    }
    if is_decimal_literal(&text) {
        return match text.parse::<f64>() {
            Ok(x) => Ok(Value::Number(Number::Float(x))),
            Err(_) => Err(ZsonError::NumericFormat {
                value: text,
                target: "double",
            }),
        };
    }
    match text.as_str() {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        "null" => Ok(Value::Null),
        _ => Err(ZsonError::ParseLiteral {
            literal: text,
            source_text: source.to_string(),
        }),
    }
}

/// `-?[1-9][0-9]*` or exactly `0`.
fn is_integer_literal(text: &str) -> bool {
    if text == "0" {
        return true;
    }
    let digits = text.strip_prefix('-').unwrap_or(text);
    leading_nonzero_digits(digits)
}

/// `[1-9][0-9]*.[0-9]*`, `0.[0-9]*`, or exactly `0`.
fn is_decimal_literal(text: &str) -> bool {
    if text == "0" {
        return true;
    }
    let Some((whole, fraction)) = text.split_once('.') else {
        return false;
    };
    (whole == "0" || leading_nonzero_digits(whole)) && fraction.bytes().all(|b| b.is_ascii_digit())
}

fn leading_nonzero_digits(text: &str) -> bool {
    let mut bytes = text.bytes();
    matches!(bytes.next(), Some(b'1'..=b'9')) && bytes.all(|b| b.is_ascii_digit())
}
