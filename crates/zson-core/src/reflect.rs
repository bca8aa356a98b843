//! Static typing on top of the host model.
//!
//! [`Reflect`] ties a Rust type to the [`Shape`] the deserializer should build
//! for it, and converts values of that type to and from [`Host`]. Record and
//! enum types get their impls from the [`record!`](crate::record) and
//! [`enumeration!`](crate::enumeration) macros; the impls here cover
//! primitives, text, dates, options and the standard containers.

use crate::error::{Result, ZsonError};
use crate::host::{Collection, Host, HostMap};
use crate::shape::{Class, CollectionClass, MapClass, Shape};
use chrono::NaiveDateTime;
use indexmap::{IndexMap, IndexSet};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::Hash;
use std::marker::PhantomData;

/// A Rust type that maps onto a host shape.
pub trait Reflect: Sized {
    /// The shape to deserialize into, including generic arguments.
    fn shape() -> Shape;

    fn to_host(&self) -> Host;

    fn from_host(host: Host) -> Result<Self>;

    /// Slot value of a freshly constructed record field of this type.
    fn default_host() -> Host {
        Host::Null
    }
}

/// Marker carrying a generic target type, e.g. `TypeRef::<Vec<Person>>::new()`.
/// Its only capability is yielding the shape of `T`.
pub struct TypeRef<T>(PhantomData<fn() -> T>);

impl<T> TypeRef<T> {
    pub const fn new() -> Self {
        TypeRef(PhantomData)
    }
}

impl<T: Reflect> TypeRef<T> {
    pub fn shape(&self) -> Shape {
        T::shape()
    }
}

impl<T> Default for TypeRef<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypeRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypeRef<T> {}

impl<T> std::fmt::Debug for TypeRef<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypeRef<{}>", std::any::type_name::<T>())
    }
}

fn mismatch<T>(expected: &str, host: &Host) -> Result<T> {
    Err(ZsonError::mismatch(expected, host.kind_name()))
}

macro_rules! reflect_integer {
    ($($ty:ty => $class:ident, $target:literal, $default:expr;)*) => {
        $(
            impl Reflect for $ty {
                fn shape() -> Shape {
                    Shape::of(Class::$class)
                }

                fn to_host(&self) -> Host {
                    Host::$class(*self)
                }

                /// Accepts any integer host that fits.
                fn from_host(host: Host) -> Result<Self> {
                    let wide: i128 = match host {
                        Host::Byte(n) => n.into(),
                        Host::Short(n) => n.into(),
                        Host::Int(n) => n.into(),
                        Host::Long(n) => n.into(),
                        Host::BigInteger(n) => n,
                        other => return mismatch($target, &other),
                    };
                    <$ty>::try_from(wide).map_err(|_| ZsonError::NumericFormat {
                        value: wide.to_string(),
                        target: $target,
                    })
                }

                fn default_host() -> Host {
                    $default
                }
            }
        )*
    };
}

reflect_integer! {
    i8 => Byte, "byte", Host::Byte(0);
    i16 => Short, "short", Host::Short(0);
    i32 => Int, "int", Host::Int(0);
    i64 => Long, "long", Host::Long(0);
    i128 => BigInteger, "BigInteger", Host::BigInteger(0);
}

impl Reflect for f32 {
    fn shape() -> Shape {
        Shape::of(Class::Float)
    }

    fn to_host(&self) -> Host {
        Host::Float(*self)
    }

    fn from_host(host: Host) -> Result<Self> {
        match host {
            Host::Float(x) => Ok(x),
            Host::Double(x) => Ok(x as f32),
            other => mismatch("float", &other),
        }
    }

    fn default_host() -> Host {
        Host::Float(0.0)
    }
}

impl Reflect for f64 {
    fn shape() -> Shape {
        Shape::of(Class::Double)
    }

    fn to_host(&self) -> Host {
        Host::Double(*self)
    }

    fn from_host(host: Host) -> Result<Self> {
        match host {
            Host::Double(x) => Ok(x),
            Host::Float(x) => Ok(x.into()),
            other => mismatch("double", &other),
        }
    }

    fn default_host() -> Host {
        Host::Double(0.0)
    }
}

impl Reflect for bool {
    fn shape() -> Shape {
        Shape::of(Class::Bool)
    }

    fn to_host(&self) -> Host {
        Host::Bool(*self)
    }

    fn from_host(host: Host) -> Result<Self> {
        match host {
            Host::Bool(b) => Ok(b),
            other => mismatch("boolean", &other),
        }
    }

    fn default_host() -> Host {
        Host::Bool(false)
    }
}

impl Reflect for char {
    fn shape() -> Shape {
        Shape::of(Class::Char)
    }

    fn to_host(&self) -> Host {
        Host::Char(*self)
    }

    fn from_host(host: Host) -> Result<Self> {
        match host {
            Host::Char(c) => Ok(c),
            other => mismatch("char", &other),
        }
    }

    fn default_host() -> Host {
        Host::Char('\0')
    }
}

impl Reflect for Decimal {
    fn shape() -> Shape {
        Shape::of(Class::BigDecimal)
    }

    fn to_host(&self) -> Host {
        Host::BigDecimal(*self)
    }

    fn from_host(host: Host) -> Result<Self> {
        match host {
            Host::BigDecimal(d) => Ok(d),
            other => mismatch("BigDecimal", &other),
        }
    }

    fn default_host() -> Host {
        Host::BigDecimal(Decimal::ZERO)
    }
}

/// A null host reads as the empty string.
impl Reflect for String {
    fn shape() -> Shape {
        Shape::of(Class::String)
    }

    fn to_host(&self) -> Host {
        Host::String(self.clone())
    }

    fn from_host(host: Host) -> Result<Self> {
        match host {
            Host::String(text) | Host::StringBuilder(text) => Ok(text),
            Host::Char(c) => Ok(c.to_string()),
            Host::Null => Ok(String::new()),
            other => mismatch("String", &other),
        }
    }
}

impl Reflect for NaiveDateTime {
    fn shape() -> Shape {
        Shape::of(Class::Date)
    }

    fn to_host(&self) -> Host {
        Host::Date(*self)
    }

    fn from_host(host: Host) -> Result<Self> {
        match host {
            Host::Date(date) => Ok(date),
            other => mismatch("Date", &other),
        }
    }

    fn default_host() -> Host {
        Host::Date(NaiveDateTime::default())
    }
}

impl Reflect for Host {
    fn shape() -> Shape {
        Shape::untyped()
    }

    fn to_host(&self) -> Host {
        self.clone()
    }

    fn from_host(host: Host) -> Result<Self> {
        Ok(host)
    }
}

/// `None` is null; the shape is that of `T`.
impl<T: Reflect> Reflect for Option<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn to_host(&self) -> Host {
        self.as_ref().map_or(Host::Null, T::to_host)
    }

    fn from_host(host: Host) -> Result<Self> {
        match host {
            Host::Null => Ok(None),
            other => T::from_host(other).map(Some),
        }
    }
}

/// Elements of an array or collection host; null is an empty sequence.
fn elements<T: Reflect>(host: Host, expected: &str) -> Result<impl Iterator<Item = Result<T>>> {
    let items = match host {
        Host::Array(items) => items,
        Host::Collection(items) => items.into_vec(),
        Host::Null => Vec::new(),
        other => return Err(ZsonError::mismatch(expected, other.kind_name())),
    };
    Ok(items.into_iter().map(T::from_host))
}

/// Entries of a map host; null is an empty map.
fn entries<T: Reflect>(host: Host, expected: &str) -> Result<impl Iterator<Item = Result<(String, T)>>> {
    let entries = match host {
        Host::Map(map) => map.into_entries(),
        Host::Null => Vec::new(),
        other => return Err(ZsonError::mismatch(expected, other.kind_name())),
    };
    Ok(entries
        .into_iter()
        .map(|(key, value)| T::from_host(value).map(|value| (key, value))))
}

macro_rules! reflect_sequence {
    ($($ty:ident [$($bound:tt)*] => $class:ident, $variant:ident;)*) => {
        $(
            impl<T: Reflect $($bound)*> Reflect for $ty<T> {
                fn shape() -> Shape {
                    Shape::collection_of(CollectionClass::$class, T::shape())
                }

                fn to_host(&self) -> Host {
                    Host::Collection(Collection::$variant(self.iter().map(T::to_host).collect()))
                }

                fn from_host(host: Host) -> Result<Self> {
                    elements(host, stringify!($class))?.collect()
                }
            }
        )*
    };
}

reflect_sequence! {
    Vec [] => ArrayList, ArrayList;
    LinkedList [] => LinkedList, LinkedList;
    VecDeque [] => ArrayDeque, ArrayDeque;
    BTreeSet [+ Ord] => TreeSet, TreeSet;
    IndexSet [+ Hash + Eq] => HashSet, HashSet;
}

/// Elements are sorted by their host value so output is deterministic.
impl<T: Reflect + Hash + Eq> Reflect for HashSet<T> {
    fn shape() -> Shape {
        Shape::collection_of(CollectionClass::HashSet, T::shape())
    }

    fn to_host(&self) -> Host {
        let mut items: Vec<Host> = self.iter().map(T::to_host).collect();
        items.sort();
        Host::Collection(Collection::HashSet(items.into_iter().collect()))
    }

    fn from_host(host: Host) -> Result<Self> {
        elements(host, "HashSet")?.collect()
    }
}

impl<T: Reflect> Reflect for Box<[T]> {
    fn shape() -> Shape {
        Shape::array_of(T::shape())
    }

    fn to_host(&self) -> Host {
        Host::Array(self.iter().map(T::to_host).collect())
    }

    fn from_host(host: Host) -> Result<Self> {
        elements(host, "array")?.collect()
    }
}

/// Entries are sorted by key so output is deterministic.
impl<T: Reflect> Reflect for HashMap<String, T> {
    fn shape() -> Shape {
        Shape::map_of(MapClass::HashMap, T::shape())
    }

    fn to_host(&self) -> Host {
        let mut keys: Vec<&String> = self.keys().collect();
        keys.sort();
        let map = keys
            .into_iter()
            .map(|key| (key.clone(), self[key].to_host()))
            .collect();
        Host::Map(HostMap::HashMap(map))
    }

    fn from_host(host: Host) -> Result<Self> {
        entries(host, "HashMap")?.collect()
    }
}

impl<T: Reflect> Reflect for IndexMap<String, T> {
    fn shape() -> Shape {
        Shape::map_of(MapClass::LinkedHashMap, T::shape())
    }

    fn to_host(&self) -> Host {
        Host::Map(HostMap::LinkedHashMap(
            self.iter().map(|(key, value)| (key.clone(), value.to_host())).collect(),
        ))
    }

    fn from_host(host: Host) -> Result<Self> {
        entries(host, "LinkedHashMap")?.collect()
    }
}

impl<T: Reflect> Reflect for BTreeMap<String, T> {
    fn shape() -> Shape {
        Shape::map_of(MapClass::TreeMap, T::shape())
    }

    fn to_host(&self) -> Host {
        Host::Map(HostMap::TreeMap(
            self.iter().map(|(key, value)| (key.clone(), value.to_host())).collect(),
        ))
    }

    fn from_host(host: Host) -> Result<Self> {
        entries(host, "TreeMap")?.collect()
    }
}
