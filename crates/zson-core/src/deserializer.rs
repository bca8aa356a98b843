//! JSON text → host, guided by a target [`Shape`].
//!
//! The parsed [`Value`] and the shape are offered to the handlers in
//! [`DeserializeHandler::ORDER`]; the first one that claims the shape's class
//! converts the value, recursing into element and field shapes.
//!
//! Failures fall into two groups. Errors from a handler reached directly (a
//! bad number at the top level, a map with non-`String` keys, a bad element
//! inside an array) propagate. Errors while populating a record field, and
//! failed record construction, are *reported* instead: logged with
//! `tracing::warn!`, collected in the call's report, and the walk carries on
//! with the remaining fields.

use crate::date::DatePattern;
use crate::error::{Result, ZsonError};
use crate::host::{Collection, EnumValue, Host, HostMap, Record};
use crate::options::Options;
use crate::parser::parse;
use crate::reflect::{Reflect, TypeRef};
use crate::shape::{Class, ClassDescriptor, CollectionClass, Shape};
use crate::value::{Map, Number, Value};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, trace, warn};

/// Parse `text` and convert it into `shape`.
pub fn deserialize(text: &str, shape: &Shape, options: &Options) -> Result<Host> {
    Deserializer::new(options.clone()).deserialize(text, shape)
}

/// Like [`deserialize`], also returning the errors reported along the way.
pub fn deserialize_reporting(
    text: &str,
    shape: &Shape,
    options: &Options,
) -> Result<(Host, Vec<ZsonError>)> {
    Deserializer::new(options.clone()).deserialize_reporting(text, shape)
}

/// Convert into the type argument of a [`TypeRef`] marker.
///
/// ```
/// use std::collections::BTreeMap;
/// use zson_core::{deserialize_marked, Options, TypeRef};
///
/// let marker = TypeRef::<Vec<BTreeMap<String, i64>>>::new();
/// let rows = deserialize_marked("[{'b':2,'a':1}]", marker, &Options::default()).unwrap();
/// assert_eq!(rows[0]["a"], 1);
/// ```
pub fn deserialize_marked<T: Reflect>(text: &str, marker: TypeRef<T>, options: &Options) -> Result<T> {
    let host = deserialize(text, &marker.shape(), options)?;
    T::from_host(host)
}

/// Convert without type information: objects become order-preserving maps,
/// arrays linked lists, and scalars keep their parsed kind.
pub fn deserialize_untyped(text: &str, options: &Options) -> Result<Host> {
    deserialize(text, &Shape::untyped(), options)
}

/// Deserialize-direction converters, tried in [`ORDER`](Self::ORDER).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeserializeHandler {
    /// Booleans, numbers and chars, read from the scalar text.
    Primitive,
    Text,
    Date,
    Enum,
    Array,
    Collection,
    Map,
    /// Records and the untyped fallback. Claims every shape.
    Object,
}

impl DeserializeHandler {
    pub const ORDER: [DeserializeHandler; 8] = [
        DeserializeHandler::Primitive,
        DeserializeHandler::Text,
        DeserializeHandler::Date,
        DeserializeHandler::Enum,
        DeserializeHandler::Array,
        DeserializeHandler::Collection,
        DeserializeHandler::Map,
        DeserializeHandler::Object,
    ];

    pub fn claims(self, shape: &Shape) -> bool {
        let class = shape.class();
        match self {
            DeserializeHandler::Primitive => matches!(
                class,
                Class::Bool
                    | Class::Byte
                    | Class::Short
                    | Class::Int
                    | Class::Long
                    | Class::Float
                    | Class::Double
                    | Class::Char
                    | Class::BigInteger
                    | Class::BigDecimal
            ),
            DeserializeHandler::Text => matches!(class, Class::String | Class::StringBuilder),
            DeserializeHandler::Date => matches!(class, Class::Date),
            DeserializeHandler::Enum => matches!(class, Class::Enum(_)),
            DeserializeHandler::Array => matches!(class, Class::Array(_)),
            DeserializeHandler::Collection => matches!(class, Class::Collection(_)),
            DeserializeHandler::Map => matches!(class, Class::Map(_)),
            DeserializeHandler::Object => true,
        }
    }

    /// The first handler that claims `shape`.
    pub fn select(shape: &Shape) -> Self {
        Self::ORDER
            .into_iter()
            .find(|handler| handler.claims(shape))
            .unwrap_or(DeserializeHandler::Object)
    }
}

/// A reusable deserializer holding its options and compiled date pattern.
#[derive(Debug, Clone)]
pub struct Deserializer {
    options: Options,
    dates: DatePattern,
}

impl Deserializer {
    pub fn new(options: Options) -> Self {
        let dates = DatePattern::new(&options.date_format);
        Self { options, dates }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn deserialize(&self, text: &str, shape: &Shape) -> Result<Host> {
        self.deserialize_reporting(text, shape).map(|(host, _)| host)
    }

    pub fn deserialize_reporting(&self, text: &str, shape: &Shape) -> Result<(Host, Vec<ZsonError>)> {
        let value = parse(text)?;
        self.convert_reporting(&value, shape)
    }

    /// Convert an already parsed tree.
    pub fn convert(&self, value: &Value, shape: &Shape) -> Result<Host> {
        self.convert_reporting(value, shape).map(|(host, _)| host)
    }

    pub fn convert_reporting(&self, value: &Value, shape: &Shape) -> Result<(Host, Vec<ZsonError>)> {
        let mut report = Vec::new();
        let host = self.convert_value(value, shape, 0, &mut report)?;
        Ok((host, report))
    }

    fn convert_value(
        &self,
        value: &Value,
        shape: &Shape,
        depth: usize,
        report: &mut Vec<ZsonError>,
    ) -> Result<Host> {
        let handler = DeserializeHandler::select(shape);
        trace!(?handler, %shape, found = value.kind_name(), depth, "deserialize");

        match handler {
            DeserializeHandler::Primitive => primitive(value, shape.class()),
            DeserializeHandler::Text => text(value, shape.class()),
            DeserializeHandler::Date => self.date(value),
            DeserializeHandler::Enum => enumeration(value, shape.class()),
            DeserializeHandler::Array => self.array(value, shape, depth, report),
            DeserializeHandler::Collection => self.collection(value, shape, depth, report),
            DeserializeHandler::Map => self.map(value, shape, depth, report),
            DeserializeHandler::Object => match shape.class() {
                Class::Record(class) => self.record(value, *class, depth, report),
                _ => Ok(untyped(value)),
            },
        }
    }

    fn date(&self, value: &Value) -> Result<Host> {
        match value {
            Value::Null => Ok(Host::Null),
            Value::Array(_) | Value::Object(_) => Err(ZsonError::mismatch("Date", value.kind_name())),
            _ => {
                let text = value.as_string().unwrap_or_default();
                self.dates.parse(&text).map(Host::Date)
            }
        }
    }

    fn array(
        &self,
        value: &Value,
        shape: &Shape,
        depth: usize,
        report: &mut Vec<ZsonError>,
    ) -> Result<Host> {
        let Class::Array(component) = shape.class() else {
            return Err(ZsonError::mismatch(shape.to_string(), value.kind_name()));
        };
        match value {
            Value::Null => Ok(Host::Null),
            Value::Array(items) => items
                .iter()
                .map(|item| self.convert_value(item, component, depth + 1, report))
                .collect::<Result<Vec<_>>>()
                .map(Host::Array),
            other => Err(ZsonError::mismatch(shape.to_string(), other.kind_name())),
        }
    }

    fn collection(
        &self,
        value: &Value,
        shape: &Shape,
        depth: usize,
        report: &mut Vec<ZsonError>,
    ) -> Result<Host> {
        let Class::Collection(class) = *shape.class() else {
            return Err(ZsonError::mismatch(shape.to_string(), value.kind_name()));
        };
        let items = match value {
            Value::Null => return Ok(Host::Null),
            Value::Array(items) => items,
            other => return Err(ZsonError::mismatch(shape.to_string(), other.kind_name())),
        };

        let element = element_shape(shape, 0);
        let mut collection = instantiate_collection(class);
        for item in items {
            collection.add(self.convert_value(item, &element, depth + 1, report)?);
        }
        Ok(Host::Collection(collection))
    }

    fn map(
        &self,
        value: &Value,
        shape: &Shape,
        depth: usize,
        report: &mut Vec<ZsonError>,
    ) -> Result<Host> {
        let Class::Map(class) = *shape.class() else {
            return Err(ZsonError::mismatch(shape.to_string(), value.kind_name()));
        };
        if let Some(key) = shape.args().first() {
            if *key.class() != Class::String {
                return Err(ZsonError::UnsupportedKeyType {
                    key: key.to_string(),
                });
            }
        }
        let entries = match value {
            Value::Null => return Ok(Host::Null),
            Value::Object(entries) => entries,
            other => return Err(ZsonError::mismatch(shape.to_string(), other.kind_name())),
        };

        let element = element_shape(shape, 1);
        let mut map = HostMap::construct(class).unwrap_or_else(|| {
            debug!(?class, "map interface, using LinkedHashMap");
            HostMap::LinkedHashMap(IndexMap::new())
        });
        for (key, item) in entries {
            map.insert(key.clone(), self.convert_value(item, &element, depth + 1, report)?);
        }
        Ok(Host::Map(map))
    }

    /// Construct the record, then write every JSON member that names a
    /// writable property somewhere in the class chain. Other members are
    /// skipped.
    fn record(
        &self,
        value: &Value,
        class: &'static ClassDescriptor,
        depth: usize,
        report: &mut Vec<ZsonError>,
    ) -> Result<Host> {
        if matches!(value, Value::Null) {
            return Ok(Host::Null);
        }
        if !class.constructible {
            reported(
                report,
                ZsonError::Construction {
                    class: class.name.to_string(),
                    message: "no accessible no-argument constructor".to_string(),
                },
                class.name,
                None,
            );
            return Ok(Host::Null);
        }

        let mut record = Record::new(class);
        let Value::Object(members) = value else {
            reported(
                report,
                ZsonError::mismatch(class.name, value.kind_name()),
                class.name,
                None,
            );
            return Ok(Host::Record(record));
        };
        self.populate(&mut record, members, depth, report);
        Ok(Host::Record(record))
    }

    fn populate(&self, record: &mut Record, members: &Map, depth: usize, report: &mut Vec<ZsonError>) {
        let class = record.class();
        for (name, member) in members {
            let Some(field) = class.property(name) else {
                trace!(class = class.name, field = %name, "no such property, skipped");
                continue;
            };
            if !field.writable {
                trace!(class = class.name, field = %name, "read-only property, skipped");
                continue;
            }

            let converted = self
                .convert_value(member, &(field.shape)(), depth + 1, report)
                .and_then(|host| record.set(field.name, host));
            if let Err(err) = converted {
                reported(report, err, class.name, Some(field.name));
            }
        }
    }
}

fn reported(report: &mut Vec<ZsonError>, err: ZsonError, class: &str, field: Option<&str>) {
    warn!(class, field, error = %err, "deserialize error reported");
    report.push(err);
}

/// The shape of type argument `index`, or untyped when the shape is raw.
fn element_shape(shape: &Shape, index: usize) -> Shape {
    shape.args().get(index).cloned().unwrap_or_else(Shape::untyped)
}

/// Construct `class`, narrowing interfaces: `SortedSet` → `TreeSet`, `Set` →
/// `HashSet`, anything else → `LinkedList`.
fn instantiate_collection(class: CollectionClass) -> Collection {
    if let Some(collection) = Collection::construct(class) {
        return collection;
    }
    let fallback = match class {
        CollectionClass::SortedSet => CollectionClass::TreeSet,
        CollectionClass::Set => CollectionClass::HashSet,
        _ => CollectionClass::LinkedList,
    };
    debug!(?class, ?fallback, "collection class not constructible");
    Collection::construct(fallback).unwrap_or_default()
}

fn primitive(value: &Value, class: &Class) -> Result<Host> {
    match class {
        Class::Bool => {
            if value.is_null() {
                return Err(ZsonError::NumericFormat {
                    value: "null".to_string(),
                    target: "boolean",
                });
            }
            Ok(Host::Bool(value.as_bool()))
        }
        Class::Byte => value.as_byte().map(Host::Byte),
        Class::Short => value.parse_scalar::<i16>("short").map(Host::Short),
        Class::Int => value.as_int().map(Host::Int),
        Class::Long => value.as_long().map(Host::Long),
        Class::Float => value.as_float().map(Host::Float),
        Class::Double => value.as_double().map(Host::Double),
        Class::BigInteger => value.parse_scalar::<i128>("BigInteger").map(Host::BigInteger),
        Class::BigDecimal => {
            let text = value.scalar_text().unwrap_or_default();
            Decimal::from_str(&text)
                .map(Host::BigDecimal)
                .map_err(|_| ZsonError::NumericFormat {
                    value: if value.is_null() { "null".to_string() } else { text.into_owned() },
                    target: "BigDecimal",
                })
        }
        Class::Char => value
            .scalar_text()
            .and_then(|text| text.chars().next())
            .map(Host::Char)
            .ok_or_else(|| ZsonError::NumericFormat {
                value: value.as_string().unwrap_or_else(|| "null".to_string()),
                target: "char",
            }),
        other => Err(ZsonError::mismatch(other.to_string(), value.kind_name())),
    }
}

fn text(value: &Value, class: &Class) -> Result<Host> {
    match value {
        Value::Null => Ok(Host::Null),
        Value::Array(_) | Value::Object(_) => Err(ZsonError::mismatch(class.to_string(), value.kind_name())),
        _ => {
            let text = value.as_string().unwrap_or_default();
            Ok(match class {
                Class::StringBuilder => Host::StringBuilder(text),
                _ => Host::String(text),
            })
        }
    }
}

/// Members are matched by name; no match is a null, not an error.
fn enumeration(value: &Value, class: &Class) -> Result<Host> {
    let Class::Enum(descriptor) = class else {
        return Err(ZsonError::mismatch(class.to_string(), value.kind_name()));
    };
    let Some(text) = value.scalar_text() else {
        return Ok(Host::Null);
    };
    match EnumValue::named(*descriptor, &text) {
        Some(member) => Ok(Host::Enum(member)),
        None => {
            debug!(enumeration = descriptor.name, member = %text, "no enum member with this name");
            Ok(Host::Null)
        }
    }
}

/// Objects become `LinkedHashMap`s and arrays `LinkedList`s; scalars keep the
/// kind the parser gave them.
fn untyped(value: &Value) -> Host {
    match value {
        Value::Null => Host::Null,
        Value::Bool(b) => Host::Bool(*b),
        Value::Number(Number::Integer(n)) => Host::Long(*n),
        Value::Number(Number::Float(x)) => Host::Double(*x),
        Value::String(text) => Host::String(text.clone()),
        Value::Array(items) => Host::Collection(items.iter().map(untyped).collect()),
        Value::Object(members) => Host::Map(
            members
                .iter()
                .map(|(key, member)| (key.clone(), untyped(member)))
                .collect(),
        ),
    }
}
