//! Canonical JSON text form of models.
//!
//! The format is a minified subset of JSON with deliberately narrow rules:
//!
//! | Construct | Form |
//! |-----------|------|
//! | object    | `{"key":value,...}` in insertion order |
//! | array     | `[value,...]` |
//! | string    | `"..."` with only `\\` and `\"` escaped |
//! | number    | `-?digits(.digits)?` |
//! | boolean   | `true` / `false` |
//!
//! Everything else inside a string (newlines, unicode, other backslash
//! sequences) passes through untouched, in both directions. There is no
//! `null` and no exponent notation.
//!
//! [`print`] renders values to this form through the [`ToJson`] trait;
//! [`parse`](parse()) turns text back into a plain [`Object`], which
//! [`Model::from`](crate::Model) accepts.

mod error;
pub mod parse;
pub mod print;

use std::fmt;

use indexmap::IndexMap;

use crate::number::Number;

pub use error::{ParseError, ParseErrorKind};
pub use parse::{parse, parse_with, DuplicateKeys, ParseConfig, DEFAULT_MAX_DEPTH};
pub use print::{quote, quote_display, to_json, to_pair, ToJson};

/// A JSON object with keys in document order.
///
/// Equality between objects ignores key order, like most map types; use
/// [`Model`](crate::Model) when order must take part in comparisons.
pub type Object = IndexMap<String, Json>;

/// The plain nested form produced by [`Model::to_map`](crate::Model::to_map)
/// and by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Json {
    String(String),
    Number(Number),
    Bool(bool),
    Array(Vec<Json>),
    Object(Object),
}

impl Json {
    /// Extracts the string, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Json::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the array, if present.
    pub fn as_array(&self) -> Option<&[Json]> {
        match self {
            Json::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Extracts the object, if present.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Json::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl From<&str> for Json {
    fn from(s: &str) -> Self {
        Json::String(s.to_string())
    }
}

impl From<String> for Json {
    fn from(s: String) -> Self {
        Json::String(s)
    }
}

impl From<bool> for Json {
    fn from(b: bool) -> Self {
        Json::Bool(b)
    }
}

impl From<Number> for Json {
    fn from(n: Number) -> Self {
        Json::Number(n)
    }
}

impl From<Object> for Json {
    fn from(map: Object) -> Self {
        Json::Object(map)
    }
}

impl<T: Into<Json>> From<Vec<T>> for Json {
    fn from(items: Vec<T>) -> Self {
        Json::Array(items.into_iter().map(Into::into).collect())
    }
}
