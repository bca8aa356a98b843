//! Error types for parsing, value access and object mapping.

use thiserror::Error;

/// Errors that can occur while parsing JSON text or mapping it onto host values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ZsonError {
    /// A bare literal matched none of the recognized literal shapes
    /// (integer, decimal, `true`/`false`, `null`). Carries the full source text.
    #[error("parse json error near {literal} at {source_text}")]
    ParseLiteral {
        literal: String,
        source_text: String,
    },

    /// A scalar's text could not be parsed as the requested numeric or char kind.
    #[error("cannot read {value:?} as {target}")]
    NumericFormat { value: String, target: &'static str },

    /// A scalar's text did not match the configured date pattern.
    #[error("can't parse date {value:?} with pattern {pattern:?}")]
    DateFormat { value: String, pattern: String },

    /// A map target declared a key type other than `String`.
    #[error("only supports String keys, found {key}")]
    UnsupportedKeyType { key: String },

    /// No-argument construction of a record, or a property write, failed.
    /// Reported through the error channel; never aborts a deserialize call.
    #[error("cannot construct {class}: {message}")]
    Construction { class: String, message: String },

    /// A value of the wrong kind was supplied for a shape.
    #[error("expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },
}

impl ZsonError {
    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        ZsonError::ShapeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Convenience alias used throughout zson-core.
pub type Result<T> = std::result::Result<T, ZsonError>;
