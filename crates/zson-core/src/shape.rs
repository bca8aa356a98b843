//! Target shapes and the static descriptors that stand in for runtime
//! reflection.
//!
//! A [`Shape`] names what the deserializer should build: a [`Class`] plus, for
//! generic containers, the shapes of its type arguments. Record and enum
//! classes point at `'static` descriptor tables, which are normally emitted by
//! the [`record!`](crate::record) and [`enumeration!`](crate::enumeration)
//! macros but can also be written by hand (for parent chains, transient or
//! static fields, and read-only properties).

use crate::host::Host;
use std::fmt;

/// A class identity optionally parameterized by nested shapes, e.g.
/// `List<Map<String, Integer>>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    class: Class,
    args: Vec<Shape>,
}

/// The raw class of a [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub enum Class {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    BigInteger,
    BigDecimal,
    String,
    StringBuilder,
    Date,
    Enum(&'static EnumDescriptor),
    /// Fixed-size array with its component shape.
    Array(Box<Shape>),
    Collection(CollectionClass),
    Map(MapClass),
    Record(&'static ClassDescriptor),
    /// No type information: the untyped fallback.
    Object,
}

/// Collection classes: interfaces (narrowed on construction) and concrete
/// containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionClass {
    Collection,
    List,
    Queue,
    Set,
    SortedSet,
    ArrayList,
    LinkedList,
    ArrayDeque,
    HashSet,
    TreeSet,
    /// A concrete read-only view with no no-argument constructor.
    Unmodifiable,
}

/// Map classes. `Map` is the interface; the rest are concrete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapClass {
    Map,
    HashMap,
    LinkedHashMap,
    TreeMap,
}

impl Shape {
    pub fn of(class: Class) -> Self {
        Self {
            class,
            args: Vec::new(),
        }
    }

    pub fn parameterized(class: Class, args: Vec<Shape>) -> Self {
        Self { class, args }
    }

    /// The untyped target.
    pub fn untyped() -> Self {
        Self::of(Class::Object)
    }

    pub fn array_of(component: Shape) -> Self {
        Self::of(Class::Array(Box::new(component)))
    }

    pub fn collection_of(class: CollectionClass, element: Shape) -> Self {
        Self::parameterized(Class::Collection(class), vec![element])
    }

    pub fn list_of(element: Shape) -> Self {
        Self::collection_of(CollectionClass::List, element)
    }

    pub fn set_of(element: Shape) -> Self {
        Self::collection_of(CollectionClass::Set, element)
    }

    pub fn sorted_set_of(element: Shape) -> Self {
        Self::collection_of(CollectionClass::SortedSet, element)
    }

    /// `Map<String, value>` with the given map class.
    pub fn map_of(class: MapClass, value: Shape) -> Self {
        Self::parameterized(Class::Map(class), vec![Self::of(Class::String), value])
    }

    pub fn record(class: &'static ClassDescriptor) -> Self {
        Self::of(Class::Record(class))
    }

    pub fn enumeration(descriptor: &'static EnumDescriptor) -> Self {
        Self::of(Class::Enum(descriptor))
    }

    pub fn class(&self) -> &Class {
        &self.class
    }

    pub fn args(&self) -> &[Shape] {
        &self.args
    }

    pub fn is_parameterized(&self) -> bool {
        !self.args.is_empty()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class)?;
        if self.args.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(">")
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::Bool => f.write_str("boolean"),
            Class::Byte => f.write_str("byte"),
            Class::Short => f.write_str("short"),
            Class::Int => f.write_str("int"),
            Class::Long => f.write_str("long"),
            Class::Float => f.write_str("float"),
            Class::Double => f.write_str("double"),
            Class::Char => f.write_str("char"),
            Class::BigInteger => f.write_str("BigInteger"),
            Class::BigDecimal => f.write_str("BigDecimal"),
            Class::String => f.write_str("String"),
            Class::StringBuilder => f.write_str("StringBuilder"),
            Class::Date => f.write_str("Date"),
            Class::Enum(descriptor) => f.write_str(descriptor.name),
            Class::Array(component) => write!(f, "{component}[]"),
            Class::Collection(class) => write!(f, "{class:?}"),
            Class::Map(class) => write!(f, "{class:?}"),
            Class::Record(descriptor) => f.write_str(descriptor.name),
            Class::Object => f.write_str("Object"),
        }
    }
}

impl CollectionClass {
    /// Interfaces carry no constructor of their own.
    pub fn is_interface(self) -> bool {
        matches!(
            self,
            CollectionClass::Collection
                | CollectionClass::List
                | CollectionClass::Queue
                | CollectionClass::Set
                | CollectionClass::SortedSet
        )
    }
}

/// How a field is stored on its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Storage {
    Instance,
    /// Excluded from serialization, still settable as a property.
    Transient,
    /// Belongs to the class, not the instance: neither serialized nor a property.
    Static,
}

/// One declared field of a record class.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    /// Declared shape, including generic arguments.
    pub shape: fn() -> Shape,
    /// Slot value of a freshly constructed instance.
    pub default: fn() -> Host,
    pub storage: Storage,
    /// Whether the property has a setter.
    pub writable: bool,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, shape: fn() -> Shape, default: fn() -> Host) -> Self {
        Self {
            name,
            shape,
            default,
            storage: Storage::Instance,
            writable: true,
        }
    }

    pub const fn transient(mut self) -> Self {
        self.storage = Storage::Transient;
        self
    }

    pub const fn class_level(mut self) -> Self {
        self.storage = Storage::Static;
        self
    }

    pub const fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }
}

/// Static description of a record class: its fields in declaration order and
/// its parent, if any.
#[derive(Debug)]
pub struct ClassDescriptor {
    pub name: &'static str,
    pub parent: Option<&'static ClassDescriptor>,
    pub fields: &'static [FieldDescriptor],
    /// Whether a no-argument constructor exists.
    pub constructible: bool,
}

impl ClassDescriptor {
    /// This class followed by its parents, nearest first.
    pub fn ancestry(&'static self) -> impl Iterator<Item = &'static ClassDescriptor> {
        std::iter::successors(Some(self), |class| class.parent)
    }

    /// Instance-level fields across the whole chain; these are the slots a
    /// constructed record carries.
    pub fn slots(&'static self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.ancestry()
            .flat_map(|class| class.fields.iter())
            .filter(|field| field.storage != Storage::Static)
    }

    /// The settable property called `name`, searched from this class upward.
    /// Read-only properties are found (and then ignored by the caller).
    pub fn property(&'static self, name: &str) -> Option<&'static FieldDescriptor> {
        self.slots().find(|field| field.name == name)
    }
}

impl PartialEq for ClassDescriptor {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.name == other.name
    }
}

/// Static description of an enumeration: member names in declaration order.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct EnumDescriptor {
    pub name: &'static str,
    pub members: &'static [&'static str],
}

impl EnumDescriptor {
    pub fn ordinal_of(&self, member: &str) -> Option<usize> {
        self.members.iter().position(|candidate| *candidate == member)
    }
}
