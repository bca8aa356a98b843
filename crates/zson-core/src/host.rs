//! The dynamic host object graph.
//!
//! [`Host`] is what the serializer walks and what the deserializer builds. It
//! keeps the distinctions a statically typed object graph has and JSON does not:
//! the width of a number, text versus enum member versus date, array versus
//! list versus set, and which record class an object belongs to.
//!
//! `Host` has a total order, equality and hashing (floats compare by
//! `total_cmp` and hash by bit pattern), so hosts can be stored in the
//! hash-backed and tree-backed sets.

use crate::error::{Result, ZsonError};
use crate::shape::{ClassDescriptor, CollectionClass, EnumDescriptor, MapClass};
use chrono::NaiveDateTime;
use indexmap::{IndexMap, IndexSet};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, LinkedList, VecDeque};
use std::hash::{Hash, Hasher};

/// A host value.
#[derive(Debug, Clone, Default)]
pub enum Host {
    #[default]
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    BigInteger(i128),
    BigDecimal(Decimal),
    String(String),
    StringBuilder(String),
    Date(NaiveDateTime),
    Enum(EnumValue),
    Array(Vec<Host>),
    Collection(Collection),
    Map(HostMap),
    Record(Record),
}

impl Host {
    pub fn is_null(&self) -> bool {
        matches!(self, Host::Null)
    }

    /// Short type name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Host::Null => "null",
            Host::Bool(_) => "boolean",
            Host::Byte(_) => "byte",
            Host::Short(_) => "short",
            Host::Int(_) => "int",
            Host::Long(_) => "long",
            Host::Float(_) => "float",
            Host::Double(_) => "double",
            Host::Char(_) => "char",
            Host::BigInteger(_) => "BigInteger",
            Host::BigDecimal(_) => "BigDecimal",
            Host::String(_) => "String",
            Host::StringBuilder(_) => "StringBuilder",
            Host::Date(_) => "Date",
            Host::Enum(member) => member.descriptor().name,
            Host::Array(_) => "array",
            Host::Collection(_) => "collection",
            Host::Map(_) => "map",
            Host::Record(record) => record.class().name,
        }
    }

    /// Text content of `String` and `StringBuilder` hosts.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Host::String(text) | Host::StringBuilder(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Host::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HostMap> {
        match self {
            Host::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Host::Collection(items) => Some(items),
            _ => None,
        }
    }

    /// Position in the cross-variant ordering.
    fn rank(&self) -> u8 {
        match self {
            Host::Null => 0,
            Host::Bool(_) => 1,
            Host::Byte(_) => 2,
            Host::Short(_) => 3,
            Host::Int(_) => 4,
            Host::Long(_) => 5,
            Host::Float(_) => 6,
            Host::Double(_) => 7,
            Host::Char(_) => 8,
            Host::BigInteger(_) => 9,
            Host::BigDecimal(_) => 10,
            Host::String(_) => 11,
            Host::StringBuilder(_) => 12,
            Host::Date(_) => 13,
            Host::Enum(_) => 14,
            Host::Array(_) => 15,
            Host::Collection(_) => 16,
            Host::Map(_) => 17,
            Host::Record(_) => 18,
        }
    }
}

impl Ord for Host {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Host::Bool(a), Host::Bool(b)) => a.cmp(b),
            (Host::Byte(a), Host::Byte(b)) => a.cmp(b),
            (Host::Short(a), Host::Short(b)) => a.cmp(b),
            (Host::Int(a), Host::Int(b)) => a.cmp(b),
            (Host::Long(a), Host::Long(b)) => a.cmp(b),
            (Host::Float(a), Host::Float(b)) => a.total_cmp(b),
            (Host::Double(a), Host::Double(b)) => a.total_cmp(b),
            (Host::Char(a), Host::Char(b)) => a.cmp(b),
            (Host::BigInteger(a), Host::BigInteger(b)) => a.cmp(b),
            (Host::BigDecimal(a), Host::BigDecimal(b)) => a.cmp(b),
            (Host::String(a), Host::String(b)) => a.cmp(b),
            (Host::StringBuilder(a), Host::StringBuilder(b)) => a.cmp(b),
            (Host::Date(a), Host::Date(b)) => a.cmp(b),
            (Host::Enum(a), Host::Enum(b)) => a.cmp(b),
            (Host::Array(a), Host::Array(b)) => a.cmp(b),
            (Host::Collection(a), Host::Collection(b)) => a.cmp(b),
            (Host::Map(a), Host::Map(b)) => a.cmp(b),
            (Host::Record(a), Host::Record(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Host {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Host {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Host {}

impl Hash for Host {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Host::Null => {}
            Host::Bool(b) => b.hash(state),
            Host::Byte(n) => n.hash(state),
            Host::Short(n) => n.hash(state),
            Host::Int(n) => n.hash(state),
            Host::Long(n) => n.hash(state),
            Host::Float(x) => x.to_bits().hash(state),
            Host::Double(x) => x.to_bits().hash(state),
            Host::Char(c) => c.hash(state),
            Host::BigInteger(n) => n.hash(state),
            Host::BigDecimal(d) => d.hash(state),
            Host::String(text) | Host::StringBuilder(text) => text.hash(state),
            Host::Date(date) => date.hash(state),
            Host::Enum(member) => member.hash(state),
            Host::Array(items) => items.hash(state),
            Host::Collection(items) => items.hash(state),
            Host::Map(map) => map.hash(state),
            Host::Record(record) => record.hash(state),
        }
    }
}

macro_rules! host_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Host {
                fn from(value: $ty) -> Self {
                    Host::$variant(value)
                }
            }
        )*
    };
}

host_from! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    i128 => BigInteger,
    Decimal => BigDecimal,
    String => String,
    NaiveDateTime => Date,
    EnumValue => Enum,
    Vec<Host> => Array,
    Collection => Collection,
    HostMap => Map,
    Record => Record,
}

impl From<&str> for Host {
    fn from(text: &str) -> Self {
        Host::String(text.to_string())
    }
}

/// A member of an enumeration.
#[derive(Debug, Clone, Copy)]
pub struct EnumValue {
    descriptor: &'static EnumDescriptor,
    ordinal: usize,
}

impl EnumValue {
    /// The member called `name`, if the enumeration has one.
    pub fn named(descriptor: &'static EnumDescriptor, name: &str) -> Option<Self> {
        descriptor
            .ordinal_of(name)
            .map(|ordinal| Self { descriptor, ordinal })
    }

    pub fn descriptor(&self) -> &'static EnumDescriptor {
        self.descriptor
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.members[self.ordinal]
    }
}

impl Ord for EnumValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.descriptor
            .name
            .cmp(other.descriptor.name)
            .then(self.ordinal.cmp(&other.ordinal))
    }
}

impl PartialOrd for EnumValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EnumValue {}

impl Hash for EnumValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor.name.hash(state);
        self.ordinal.hash(state);
    }
}

/// A collection instance. Sets drop duplicates on insertion; the hash-backed
/// set iterates in insertion order.
#[derive(Debug, Clone)]
pub enum Collection {
    ArrayList(Vec<Host>),
    LinkedList(LinkedList<Host>),
    ArrayDeque(VecDeque<Host>),
    HashSet(IndexSet<Host>),
    TreeSet(BTreeSet<Host>),
}

impl Collection {
    /// No-argument construction. Interfaces and classes without a public
    /// constructor yield `None`.
    pub fn construct(class: CollectionClass) -> Option<Self> {
        match class {
            CollectionClass::ArrayList => Some(Collection::ArrayList(Vec::new())),
            CollectionClass::LinkedList => Some(Collection::LinkedList(LinkedList::new())),
            CollectionClass::ArrayDeque => Some(Collection::ArrayDeque(VecDeque::new())),
            CollectionClass::HashSet => Some(Collection::HashSet(IndexSet::new())),
            CollectionClass::TreeSet => Some(Collection::TreeSet(BTreeSet::new())),
            CollectionClass::Collection
            | CollectionClass::List
            | CollectionClass::Queue
            | CollectionClass::Set
            | CollectionClass::SortedSet
            | CollectionClass::Unmodifiable => None,
        }
    }

    pub fn class(&self) -> CollectionClass {
        match self {
            Collection::ArrayList(_) => CollectionClass::ArrayList,
            Collection::LinkedList(_) => CollectionClass::LinkedList,
            Collection::ArrayDeque(_) => CollectionClass::ArrayDeque,
            Collection::HashSet(_) => CollectionClass::HashSet,
            Collection::TreeSet(_) => CollectionClass::TreeSet,
        }
    }

    pub fn add(&mut self, item: Host) {
        match self {
            Collection::ArrayList(items) => items.push(item),
            Collection::LinkedList(items) => items.push_back(item),
            Collection::ArrayDeque(items) => items.push_back(item),
            Collection::HashSet(items) => {
                items.insert(item);
            }
            Collection::TreeSet(items) => {
                items.insert(item);
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Collection::ArrayList(items) => items.len(),
            Collection::LinkedList(items) => items.len(),
            Collection::ArrayDeque(items) => items.len(),
            Collection::HashSet(items) => items.len(),
            Collection::TreeSet(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = &Host> + '_> {
        match self {
            Collection::ArrayList(items) => Box::new(items.iter()),
            Collection::LinkedList(items) => Box::new(items.iter()),
            Collection::ArrayDeque(items) => Box::new(items.iter()),
            Collection::HashSet(items) => Box::new(items.iter()),
            Collection::TreeSet(items) => Box::new(items.iter()),
        }
    }

    pub fn into_vec(self) -> Vec<Host> {
        match self {
            Collection::ArrayList(items) => items,
            Collection::LinkedList(items) => items.into_iter().collect(),
            Collection::ArrayDeque(items) => items.into_iter().collect(),
            Collection::HashSet(items) => items.into_iter().collect(),
            Collection::TreeSet(items) => items.into_iter().collect(),
        }
    }
}

/// An empty linked list.
impl Default for Collection {
    fn default() -> Self {
        Collection::LinkedList(LinkedList::new())
    }
}

impl FromIterator<Host> for Collection {
    /// Collects into a linked list, the default sequence container.
    fn from_iter<I: IntoIterator<Item = Host>>(iter: I) -> Self {
        Collection::LinkedList(iter.into_iter().collect())
    }
}

impl Ord for Collection {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.class() as u8)
            .cmp(&(other.class() as u8))
            .then_with(|| self.iter().cmp(other.iter()))
    }
}

impl PartialOrd for Collection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Collection {}

impl Hash for Collection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.class() as u8).hash(state);
        for item in self.iter() {
            item.hash(state);
        }
    }
}

/// A string-keyed map instance.
#[derive(Debug, Clone)]
pub enum HostMap {
    /// Hash-backed; iterates in insertion order so output stays deterministic.
    HashMap(IndexMap<String, Host>),
    LinkedHashMap(IndexMap<String, Host>),
    TreeMap(BTreeMap<String, Host>),
}

impl HostMap {
    /// No-argument construction; the `Map` interface yields `None`.
    pub fn construct(class: MapClass) -> Option<Self> {
        match class {
            MapClass::HashMap => Some(HostMap::HashMap(IndexMap::new())),
            MapClass::LinkedHashMap => Some(HostMap::LinkedHashMap(IndexMap::new())),
            MapClass::TreeMap => Some(HostMap::TreeMap(BTreeMap::new())),
            MapClass::Map => None,
        }
    }

    pub fn class(&self) -> MapClass {
        match self {
            HostMap::HashMap(_) => MapClass::HashMap,
            HostMap::LinkedHashMap(_) => MapClass::LinkedHashMap,
            HostMap::TreeMap(_) => MapClass::TreeMap,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Host>) {
        let (key, value) = (key.into(), value.into());
        match self {
            HostMap::HashMap(map) | HostMap::LinkedHashMap(map) => {
                map.insert(key, value);
            }
            HostMap::TreeMap(map) => {
                map.insert(key, value);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Host> {
        match self {
            HostMap::HashMap(map) | HostMap::LinkedHashMap(map) => map.get(key),
            HostMap::TreeMap(map) => map.get(key),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            HostMap::HashMap(map) | HostMap::LinkedHashMap(map) => map.len(),
            HostMap::TreeMap(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = (&String, &Host)> + '_> {
        match self {
            HostMap::HashMap(map) | HostMap::LinkedHashMap(map) => Box::new(map.iter()),
            HostMap::TreeMap(map) => Box::new(map.iter()),
        }
    }

    pub fn into_entries(self) -> Vec<(String, Host)> {
        match self {
            HostMap::HashMap(map) | HostMap::LinkedHashMap(map) => map.into_iter().collect(),
            HostMap::TreeMap(map) => map.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Host>> FromIterator<(K, V)> for HostMap {
    /// Collects into an order-preserving map.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        HostMap::LinkedHashMap(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl Ord for HostMap {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.class() as u8)
            .cmp(&(other.class() as u8))
            .then_with(|| self.iter().cmp(other.iter()))
    }
}

impl PartialOrd for HostMap {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HostMap {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HostMap {}

impl Hash for HostMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.class() as u8).hash(state);
        for entry in self.iter() {
            entry.hash(state);
        }
    }
}

/// An instance of a record class: one slot per instance-level field across
/// the class chain.
#[derive(Debug, Clone)]
pub struct Record {
    class: &'static ClassDescriptor,
    values: IndexMap<&'static str, Host>,
}

impl Record {
    /// A fresh instance with every slot at its field default.
    pub fn new(class: &'static ClassDescriptor) -> Self {
        let values = class
            .slots()
            .map(|field| (field.name, (field.default)()))
            .collect();
        Self { class, values }
    }

    /// Unwrap a host that must be an instance of `class`.
    pub fn from_host(host: Host, class: &'static ClassDescriptor) -> Result<Self> {
        match host {
            Host::Record(record) if record.class == class => Ok(record),
            other => Err(ZsonError::mismatch(class.name, other.kind_name())),
        }
    }

    pub fn class(&self) -> &'static ClassDescriptor {
        self.class
    }

    pub fn get(&self, name: &str) -> Option<&Host> {
        self.values.get(name)
    }

    /// Builder-style slot assignment. Names that are not slots are ignored.
    pub fn with(mut self, name: &str, value: impl Into<Host>) -> Self {
        self.put(name, value.into());
        self
    }

    /// Overwrite a slot without checks. Names that are not slots are ignored.
    pub fn put(&mut self, name: &str, value: Host) {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
        }
    }

    /// Property write. Fails when there is no such slot, or when a null would
    /// land in a slot whose default is not null.
    pub fn set(&mut self, name: &str, value: Host) -> Result<()> {
        let class = self.class;
        let Some(slot) = self.values.get_mut(name) else {
            return Err(ZsonError::Construction {
                class: class.name.to_string(),
                message: format!("no property named {name}"),
            });
        };
        if value.is_null() && !slot.is_null() {
            let required = class
                .property(name)
                .is_some_and(|field| !(field.default)().is_null());
            if required {
                return Err(ZsonError::Construction {
                    class: class.name.to_string(),
                    message: format!("cannot assign null to non-nullable property {name}"),
                });
            }
        }
        *slot = value;
        Ok(())
    }

    /// Move a slot's value out, leaving null behind.
    pub fn take(&mut self, name: &str) -> Host {
        self.values
            .get_mut(name)
            .map(std::mem::take)
            .unwrap_or_default()
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.class
            .name
            .cmp(other.class.name)
            .then_with(|| self.values.iter().cmp(other.values.iter()))
    }
}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class.name.hash(state);
        for entry in &self.values {
            entry.hash(state);
        }
    }
}
