//! Values stored in a [`Model`].
//!
//! A [`Value`] is a tagged variant over everything a model key can hold:
//! strings, numbers, booleans, nested models and sequences. Equality is
//! structural and recursive.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::json::ToJson;
use crate::model::Model;
use crate::number::Number;

/// A single value held under a model key.
///
/// # Example
///
/// ```
/// use quire_model::{Model, Value};
///
/// let v = Value::from("text");
/// assert!(v.is_string());
/// assert_eq!(v.as_str(), Some("text"));
///
/// let nested = Value::from(Model::new().with("a", 1));
/// assert_eq!(nested.to_string(), r#"{"a":1}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Text.
    String(String),
    /// Decimal number.
    Number(Number),
    /// Boolean.
    Bool(bool),
    /// Nested model.
    Model(Model),
    /// Ordered sequence of values.
    List(Vec<Value>),
}

impl Value {
    /// Wraps any displayable value as a string value.
    ///
    /// This is how values of types the model does not know about are
    /// stored: they are stringified once, on the way in.
    pub fn display(value: impl fmt::Display) -> Value {
        Value::String(value.to_string())
    }

    /// Short name of the variant, used in type mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Model(_) => "model",
            Value::List(_) => "list",
        }
    }

    /// Returns `true` if this is a `String` value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if this is a `Number` value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if this is a `Bool` value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if this is a nested `Model`.
    pub fn is_model(&self) -> bool {
        matches!(self, Value::Model(_))
    }

    /// Returns `true` if this is a `List` value.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Extracts the string, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number, if present.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Extracts the boolean, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the nested model, if present.
    pub fn as_model(&self) -> Option<&Model> {
        match self {
            Value::Model(m) => Some(m),
            _ => None,
        }
    }

    /// Extracts the nested model mutably, if present.
    pub fn as_model_mut(&mut self) -> Option<&mut Model> {
        match self {
            Value::Model(m) => Some(m),
            _ => None,
        }
    }

    /// Extracts the sequence, if present.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Strings display as their raw text; everything else displays as JSON.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Number(n) => fmt::Display::fmt(n, f),
            Value::Bool(b) => fmt::Display::fmt(b, f),
            Value::Model(m) => fmt::Display::fmt(m, f),
            Value::List(_) => f.write_str(&self.to_json()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(n) => n.serialize(serializer),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Model(m) => m.serialize(serializer),
            Value::List(items) => serializer.collect_seq(items),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Model> for Value {
    fn from(m: Model) -> Self {
        Value::Model(m)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Typed extraction used by [`Model::get_as`] and friends.
///
/// `from_value` returns `None` when the value is of a different kind; the
/// caller turns that into a [`ModelError::TypeMismatch`](crate::ModelError)
/// carrying the key and [`FromValue::EXPECTED`].
pub trait FromValue: Sized {
    /// Human-readable name of the target kind.
    const EXPECTED: &'static str;

    /// Converts the value, or returns `None` if it has the wrong kind.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for Number {
    const EXPECTED: &'static str = "number";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_number().cloned()
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_number().and_then(Number::as_i64)
    }
}

impl FromValue for u64 {
    const EXPECTED: &'static str = "unsigned integer";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_number().and_then(Number::as_u64)
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "number";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_number().map(Number::as_f64)
    }
}

impl FromValue for Model {
    const EXPECTED: &'static str = "model";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_model().cloned()
    }
}

impl FromValue for Vec<Value> {
    const EXPECTED: &'static str = "list";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_list().map(<[Value]>::to_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_checks() {
        assert!(Value::from("a").is_string());
        assert!(Value::from(1).is_number());
        assert!(Value::from(true).is_bool());
        assert!(Value::from(Model::new()).is_model());
        assert!(Value::from(vec![1, 2]).is_list());
        assert!(!Value::from("a").is_number());
    }

    #[test]
    fn strings_display_raw_and_containers_display_as_json() {
        assert_eq!(Value::from("He said \"hi\"").to_string(), "He said \"hi\"");
        assert_eq!(Value::from(vec![Value::from(1), Value::from("x")]).to_string(), r#"[1,"x"]"#);
        assert_eq!(Value::from(false).to_string(), "false");
    }

    #[test]
    fn display_wrapper_stringifies_foreign_types() {
        let v = Value::display(std::net::Ipv4Addr::LOCALHOST);
        assert_eq!(v, Value::from("127.0.0.1"));
    }

    #[test]
    fn from_value_respects_kinds() {
        assert_eq!(String::from_value(&Value::from("x")), Some("x".to_string()));
        assert_eq!(String::from_value(&Value::from(1)), None);
        assert_eq!(i64::from_value(&Value::from(-3)), Some(-3));
        assert_eq!(i64::from_value(&Value::Number("1.5".parse().unwrap())), None);
        assert_eq!(f64::from_value(&Value::from(2)), Some(2.0));
        assert_eq!(bool::from_value(&Value::from("true")), None);
    }

    #[test]
    fn equality_is_structural() {
        let a = Value::from(Model::new().with("k", vec![1, 2]));
        let b = Value::from(Model::new().with("k", 1).with("k", 2));
        assert_eq!(a, b);
        assert_ne!(Value::from(1), Value::from("1"));
    }
}
