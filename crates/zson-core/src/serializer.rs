//! Host → JSON text.
//!
//! A host value is offered to the handlers in [`SerializeHandler::ORDER`]; the
//! first one that claims it writes it. Containers recurse with `depth + 1`.
//!
//! Output is built in a single `String`. Every element is followed by its
//! separator (`,`, plus a line break when pretty printing) and the final
//! separator is cut off once the container is complete. In pretty mode a
//! top-level container is followed by a line break. Values nobody claims,
//! which is only ever a null with `ignore_null` on, leave no trace: no key, no
//! separator.
//!
//! # Example
//! ```
//! use zson_core::{serialize, Host, HostMap, Options};
//!
//! let map: HostMap = [("a", Host::Int(1)), ("b", Host::Null)].into_iter().collect();
//! assert_eq!(serialize(&Host::Map(map), &Options::default()).unwrap(), r#"{"a":1}"#);
//! ```

use crate::date::DatePattern;
use crate::host::{Host, Record};
use crate::options::Options;
use crate::shape::Storage;
use crate::unicode;
use crate::value::{format_float, format_float32};
use tracing::trace;

/// Serialize `host` with `options`. Returns `None` when the top-level value
/// is not claimed by any handler.
pub fn serialize(host: &Host, options: &Options) -> Option<String> {
    Serializer::new(options.clone()).serialize(host)
}

/// Serialize-direction converters, tried in [`ORDER`](Self::ORDER).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializeHandler {
    /// Booleans and every numeric kind, written as bare literals.
    BoolNumber,
    /// Text, chars and enum members, written quoted.
    TextEnum,
    Date,
    /// Arrays and collections.
    Sequence,
    Map,
    /// Records.
    Object,
    /// `null`, only when nulls are not ignored.
    Null,
}

impl SerializeHandler {
    pub const ORDER: [SerializeHandler; 7] = [
        SerializeHandler::BoolNumber,
        SerializeHandler::TextEnum,
        SerializeHandler::Date,
        SerializeHandler::Sequence,
        SerializeHandler::Map,
        SerializeHandler::Object,
        SerializeHandler::Null,
    ];

    pub fn claims(self, host: &Host, options: &Options) -> bool {
        match self {
            SerializeHandler::BoolNumber => matches!(
                host,
                Host::Bool(_)
                    | Host::Byte(_)
                    | Host::Short(_)
                    | Host::Int(_)
                    | Host::Long(_)
                    | Host::Float(_)
                    | Host::Double(_)
                    | Host::BigInteger(_)
                    | Host::BigDecimal(_)
            ),
            SerializeHandler::TextEnum => matches!(
                host,
                Host::String(_) | Host::StringBuilder(_) | Host::Char(_) | Host::Enum(_)
            ),
            SerializeHandler::Date => matches!(host, Host::Date(_)),
            SerializeHandler::Sequence => matches!(host, Host::Array(_) | Host::Collection(_)),
            SerializeHandler::Map => matches!(host, Host::Map(_)),
            SerializeHandler::Object => matches!(host, Host::Record(_)),
            SerializeHandler::Null => host.is_null() && !options.ignore_null,
        }
    }

    /// The first handler that claims `host`.
    pub fn select(host: &Host, options: &Options) -> Option<Self> {
        Self::ORDER
            .into_iter()
            .find(|handler| handler.claims(host, options))
    }
}

/// A reusable serializer holding its options and compiled date pattern.
#[derive(Debug, Clone)]
pub struct Serializer {
    options: Options,
    dates: DatePattern,
}

impl Serializer {
    pub fn new(options: Options) -> Self {
        let dates = DatePattern::new(&options.date_format);
        Self { options, dates }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn serialize(&self, host: &Host) -> Option<String> {
        let mut out = String::new();
        if !self.write_value(host, 0, &mut out) {
            return None;
        }
        // the closing token of a top-level container ends its line too
        if self.options.is_pretty() && is_container(host) {
            out.push('\n');
        }
        if self.options.unicode_output {
            out = unicode::encode(&out);
        }
        Some(out)
    }

    /// Write `host` at nesting `depth`. Returns `false`, writing nothing, when
    /// no handler claims it.
    fn write_value(&self, host: &Host, depth: usize, out: &mut String) -> bool {
        let Some(handler) = SerializeHandler::select(host, &self.options) else {
            return false;
        };
        trace!(?handler, kind = host.kind_name(), depth, "serialize");

        match handler {
            SerializeHandler::BoolNumber => write_literal(host, out),
            SerializeHandler::TextEnum => {
                let text = match host {
                    Host::Char(c) => c.to_string(),
                    Host::Enum(member) => member.name().to_string(),
                    other => other.as_str().unwrap_or_default().to_string(),
                };
                self.write_quoted(&text, out);
            }
            SerializeHandler::Date => {
                if let Host::Date(date) = host {
                    self.write_quoted(&self.dates.format(date), out);
                }
            }
            SerializeHandler::Sequence => {
                let items: Box<dyn Iterator<Item = &Host> + '_> = match host {
                    Host::Array(items) => Box::new(items.iter()),
                    Host::Collection(items) => items.iter(),
                    _ => Box::new(std::iter::empty()),
                };
                self.write_sequence(items, depth, out);
            }
            SerializeHandler::Map => {
                if let Host::Map(map) = host {
                    let entries = map.iter().map(|(key, value)| (key.as_str(), value));
                    self.write_members(entries, depth, out);
                }
            }
            SerializeHandler::Object => {
                if let Host::Record(record) = host {
                    self.write_record(record, depth, out);
                }
            }
            SerializeHandler::Null => out.push_str("null"),
        }
        true
    }

    fn write_sequence<'h>(
        &self,
        items: impl Iterator<Item = &'h Host>,
        depth: usize,
        out: &mut String,
    ) {
        out.push('[');
        let start = out.len();
        self.open(out);
        let mut written = false;
        for item in items {
            let mark = out.len();
            self.indent(depth + 1, out);
            if !self.write_value(item, depth + 1, out) {
                out.truncate(mark);
                continue;
            }
            self.separator(out);
            written = true;
        }
        self.close(start, written, depth, out);
        out.push(']');
    }

    /// Write `{"key":value,...}`. Keys are written verbatim.
    fn write_members<'h>(
        &self,
        entries: impl Iterator<Item = (&'h str, &'h Host)>,
        depth: usize,
        out: &mut String,
    ) {
        out.push('{');
        let start = out.len();
        self.open(out);
        let mut written = false;
        for (key, value) in entries {
            let mark = out.len();
            self.indent(depth + 1, out);
            out.push('"');
            out.push_str(key);
            out.push_str("\":");
            if !self.write_value(value, depth + 1, out) {
                out.truncate(mark);
                continue;
            }
            self.separator(out);
            written = true;
        }
        self.close(start, written, depth, out);
        out.push('}');
    }

    /// Instance fields of the record's class, then of each parent. The walk
    /// stops at the first opaque class, and after the record's own class when
    /// parent attributes are ignored.
    fn write_record(&self, record: &Record, depth: usize, out: &mut String) {
        let class_limit = if self.options.ignore_parent_attributes {
            1
        } else {
            usize::MAX
        };

        let fields = record
            .class()
            .ancestry()
            .take(class_limit)
            .take_while(|class| !self.options.is_opaque(class.name))
            .flat_map(|class| class.fields.iter())
            .filter(|field| field.storage == Storage::Instance)
            .filter_map(|field| record.get(field.name).map(|value| (field.name, value)));
        self.write_members(fields, depth, out);
    }

    fn write_quoted(&self, text: &str, out: &mut String) {
        out.push('"');
        if self.options.escape_special_chars {
            for ch in text.chars() {
                match ch {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    '\t' => out.push_str("\\t"),
                    _ => out.push(ch),
                }
            }
        } else {
            out.push_str(text);
        }
        out.push('"');
    }

    fn open(&self, out: &mut String) {
        if self.options.is_pretty() {
            out.push('\n');
        }
    }

    fn separator(&self, out: &mut String) {
        out.push(',');
        if self.options.is_pretty() {
            out.push('\n');
        }
    }

    /// Drop the trailing separator and put the closing token on its own line.
    /// An empty container collapses back to `[]` or `{}`.
    fn close(&self, start: usize, written: bool, depth: usize, out: &mut String) {
        if !written {
            out.truncate(start);
            return;
        }
        let separator = if self.options.is_pretty() { 2 } else { 1 };
        out.truncate(out.len() - separator);
        if self.options.is_pretty() {
            out.push('\n');
            self.indent(depth, out);
        }
    }

    fn indent(&self, depth: usize, out: &mut String) {
        out.extend(std::iter::repeat_n(' ', depth * self.options.indent));
    }
}

fn is_container(host: &Host) -> bool {
    matches!(
        host,
        Host::Array(_) | Host::Collection(_) | Host::Map(_) | Host::Record(_)
    )
}

fn write_literal(host: &Host, out: &mut String) {
    match host {
        Host::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Host::Byte(n) => out.push_str(&n.to_string()),
        Host::Short(n) => out.push_str(&n.to_string()),
        Host::Int(n) => out.push_str(&n.to_string()),
        Host::Long(n) => out.push_str(&n.to_string()),
        Host::Float(x) => out.push_str(&format_float32(*x)),
        Host::Double(x) => out.push_str(&format_float(*x)),
        Host::BigInteger(n) => out.push_str(&n.to_string()),
        Host::BigDecimal(d) => out.push_str(&d.to_string()),
        _ => {}
    }
}
