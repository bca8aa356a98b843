//! # zson-core
//!
//! A lenient JSON value model and parser, plus a type-directed mapper between
//! JSON text and host object graphs.
//!
//! The mapper works in both directions through two fixed chains of
//! converters. Serializing walks a [`Host`] value and writes JSON text;
//! deserializing parses text into a [`Value`] tree and builds a [`Host`] that
//! matches a target [`Shape`]. Record and enum classes are described by static
//! descriptors, usually registered with the [`record!`] and [`enumeration!`]
//! macros, and the [`Reflect`] trait converts hosts to and from ordinary Rust
//! types.
//!
//! ## Quick start
//!
//! ```rust
//! use zson_core::{from_str, record, to_string};
//!
//! record! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct User {
//!         pub name: String,
//!         pub tags: Vec<String>,
//!     }
//! }
//!
//! // single quotes and unknown members are accepted
//! let user: User = from_str("{'name':'Ann','tags':['a','b'],'extra':1}").unwrap();
//! assert_eq!(user.tags, ["a", "b"]);
//!
//! assert_eq!(to_string(&user).unwrap(), r#"{"name":"Ann","tags":["a","b"]}"#);
//! ```
//!
//! ## Modules
//!
//! - [`value`] / [`parser`]: the JSON tree and its lenient reader
//! - [`unicode`]: `\uXXXX` escape codec for wide characters
//! - [`host`] / [`shape`]: host values, target shapes and class descriptors
//! - [`reflect`]: typed Rust values ↔ host values
//! - [`serializer`] / [`deserializer`]: the two converter chains
//! - [`options`]: configuration shared by both chains
//! - [`date`]: date pattern translation
//! - [`error`]: error types

pub mod date;
pub mod deserializer;
pub mod error;
pub mod host;
mod interop;
mod macros;
pub mod options;
pub mod parser;
pub mod reflect;
pub mod serializer;
pub mod shape;
pub mod unicode;
pub mod value;

pub use deserializer::{
    deserialize, deserialize_marked, deserialize_reporting, deserialize_untyped, DeserializeHandler,
    Deserializer,
};
pub use error::{Result, ZsonError};
pub use host::{Collection, EnumValue, Host, HostMap, Record};
pub use options::Options;
pub use parser::parse;
pub use reflect::{Reflect, TypeRef};
pub use serializer::{serialize, SerializeHandler, Serializer};
pub use shape::{
    Class, ClassDescriptor, CollectionClass, EnumDescriptor, FieldDescriptor, MapClass, Shape,
    Storage,
};
pub use value::{Map, Number, Value};

/// Serialize a typed value with default options.
pub fn to_string<T: Reflect>(value: &T) -> Option<String> {
    serialize(&value.to_host(), &Options::default())
}

/// Serialize a typed value with `options`.
pub fn to_string_with<T: Reflect>(value: &T, options: &Options) -> Option<String> {
    serialize(&value.to_host(), options)
}

/// Deserialize into a typed value with default options.
pub fn from_str<T: Reflect>(text: &str) -> Result<T> {
    from_str_with(text, &Options::default())
}

/// Deserialize into a typed value with `options`.
pub fn from_str_with<T: Reflect>(text: &str, options: &Options) -> Result<T> {
    deserialize_marked(text, TypeRef::new(), options)
}
