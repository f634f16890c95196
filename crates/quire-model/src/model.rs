//! The ordered, multi-valued, nested model.
//!
//! Every key owns a sequence of values. The singular/plural distinction that
//! shows up in JSON (`"k":1` versus `"k":[1,2]`) is applied only at the
//! boundary: [`Model::to_map`], [`Model::entries`], printing and
//! serialization. Inside the model, one value is just a sequence of length one.
//!
//! # Example
//!
//! ```
//! use quire_model::Model;
//!
//! let mut model = Model::new();
//! model.add("2", "3").add("2", "2");
//! assert_eq!(model.to_string(), r#"{"2":["3","2"]}"#);
//!
//! let users = Model::new().with(
//!     "user",
//!     Model::new().with("name", "Dan").with("tel", "34567890"),
//! );
//! let parsed: Model = users.to_string().parse().unwrap();
//! assert_eq!(parsed, users);
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{ModelError, Result};
use crate::json::{self, Json, Object, ParseConfig, ParseError, ToJson};
use crate::value::{FromValue, Value};

/// An ordered associative structure where each key holds one or more values.
///
/// Keys iterate in first-insertion order and are unique. Values under a key
/// keep the order they were added in. Two models are equal when they have the
/// same keys in the same order with equal value sequences, recursively.
#[derive(Debug, Clone, Default)]
pub struct Model {
    entries: IndexMap<String, Vec<Value>>,
}

impl Model {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a model by adding each pair in order.
    ///
    /// Repeated keys accumulate values exactly as repeated [`add`](Self::add)
    /// calls would.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        pairs.into_iter().collect()
    }

    /// Builds a model from its plain map form, the inverse of [`to_map`](Self::to_map).
    ///
    /// Scalars become single values, arrays become multi-value keys and
    /// objects become nested models.
    pub fn from_map(map: &Object) -> Self {
        Model::from(map.clone())
    }

    /// Parses canonical JSON text into a model.
    pub fn parse(text: &str) -> std::result::Result<Self, ParseError> {
        json::parse(text).map(Model::from)
    }

    /// Parses JSON text with explicit parser settings.
    pub fn parse_with(text: &str, config: &ParseConfig) -> std::result::Result<Self, ParseError> {
        json::parse_with(text, config).map(Model::from)
    }

    /// Appends a value under `key`, creating the key at the end if it is new.
    ///
    /// Never overwrites. A [`Value::List`] contributes each of its elements
    /// as a separate value.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let values = self.entries.entry(key.into()).or_default();
        push_value(values, value.into());
        self
    }

    /// Consuming form of [`add`](Self::add), convenient for building nested models.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add(key, value);
        self
    }

    /// Replaces every value under `key` with `value`.
    ///
    /// An existing key keeps its position. An absent key is appended, as
    /// with [`add`](Self::add).
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let values = self.entries.entry(key.into()).or_default();
        values.clear();
        push_value(values, value.into());
        self
    }

    /// The first value under `key`, or `None` if the key is missing or empty.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).and_then(|values| values.first())
    }

    /// The first value under `key`, converted to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TypeMismatch`] if the value exists but is not a `T`.
    pub fn get_as<T: FromValue>(&self, key: &str) -> Result<Option<T>> {
        self.get(key).map(|value| convert(key, value)).transpose()
    }

    /// All values under `key` in insertion order; empty if the key is absent.
    pub fn get_values(&self, key: &str) -> &[Value] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All values under `key`, each converted to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TypeMismatch`] on the first value that is not a `T`.
    pub fn get_values_as<T: FromValue>(&self, key: &str) -> Result<Vec<T>> {
        self.get_values(key)
            .iter()
            .map(|value| convert(key, value))
            .collect()
    }

    /// Removes `key` and returns its first value.
    ///
    /// Returns `None` and leaves the model untouched when the key is absent.
    /// Remaining keys keep their relative order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries
            .shift_remove(key)
            .and_then(|values| values.into_iter().next())
    }

    /// Removes `key` and returns its first value converted to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TypeMismatch`] if the first value is not a `T`;
    /// the model is left unchanged in that case.
    pub fn remove_as<T: FromValue>(&mut self, key: &str) -> Result<Option<T>> {
        let converted = self.get_as::<T>(key)?;
        self.entries.shift_remove(key);
        Ok(converted)
    }

    /// Iterates keys with their values, applying the singular/plural rule.
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            inner: self.entries.iter(),
        }
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Returns `true` if `key` is present, even with no values.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the model has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// An independent duplicate of this model.
    ///
    /// Same as [`Clone::clone`]: nested models and values are copied, so
    /// mutating the copy never affects the original.
    pub fn copy(&self) -> Model {
        self.clone()
    }

    /// Converts to the plain map form.
    ///
    /// A key with exactly one value maps to that value; any other count maps
    /// to an array. Nested models become nested objects.
    pub fn to_map(&self) -> Object {
        self.entries
            .iter()
            .map(|(key, values)| (key.clone(), values_to_json(values)))
            .collect()
    }
}

fn push_value(values: &mut Vec<Value>, value: Value) {
    match value {
        Value::List(items) => values.extend(items),
        other => values.push(other),
    }
}

fn convert<T: FromValue>(key: &str, value: &Value) -> Result<T> {
    T::from_value(value).ok_or_else(|| ModelError::TypeMismatch {
        key: key.to_string(),
        expected: T::EXPECTED,
        found: value.kind_name(),
    })
}

fn values_to_json(values: &[Value]) -> Json {
    match values {
        [single] => value_to_json(single),
        many => Json::Array(many.iter().map(value_to_json).collect()),
    }
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::String(s) => Json::String(s.clone()),
        Value::Number(n) => Json::Number(n.clone()),
        Value::Bool(b) => Json::Bool(*b),
        Value::Model(m) => Json::Object(m.to_map()),
        Value::List(items) => Json::Array(items.iter().map(value_to_json).collect()),
    }
}

fn json_to_value(json: Json) -> Value {
    match json {
        Json::String(s) => Value::String(s),
        Json::Number(n) => Value::Number(n),
        Json::Bool(b) => Value::Bool(b),
        Json::Object(map) => Value::Model(Model::from(map)),
        Json::Array(items) => Value::List(items.into_iter().map(json_to_value).collect()),
    }
}

impl From<Object> for Model {
    fn from(map: Object) -> Self {
        let entries = map
            .into_iter()
            .map(|(key, json)| {
                let values = match json {
                    Json::Array(items) => items.into_iter().map(json_to_value).collect(),
                    scalar => vec![json_to_value(scalar)],
                };
                (key, values)
            })
            .collect();
        Model { entries }
    }
}

impl From<Model> for Json {
    fn from(model: Model) -> Self {
        Json::Object(model.to_map())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Model {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut model = Model::new();
        for (key, value) in iter {
            model.add(key, value);
        }
        model
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Model {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

/// Order-sensitive: `IndexMap`'s own equality ignores order.
impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for Model {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl FromStr for Model {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Model::parse(s)
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, entry) in self.entries() {
            map.serialize_entry(key, &entry)?;
        }
        map.end()
    }
}

/// The values of one key, as seen from outside the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    /// Exactly one value.
    One(&'a Value),
    /// Zero or several values.
    Many(&'a [Value]),
}

impl<'a> Entry<'a> {
    fn from_values(values: &'a [Value]) -> Self {
        match values {
            [single] => Entry::One(single),
            many => Entry::Many(many),
        }
    }

    /// The first value, if any.
    pub fn first(&self) -> Option<&'a Value> {
        match *self {
            Entry::One(value) => Some(value),
            Entry::Many(values) => values.first(),
        }
    }

    /// All values as a slice.
    pub fn values(&self) -> &'a [Value] {
        match *self {
            Entry::One(value) => std::slice::from_ref(value),
            Entry::Many(values) => values,
        }
    }
}

impl Serialize for Entry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Entry::One(value) => value.serialize(serializer),
            Entry::Many(values) => serializer.collect_seq(values.iter()),
        }
    }
}

/// Iterator returned by [`Model::entries`].
pub struct Entries<'a> {
    inner: indexmap::map::Iter<'a, String, Vec<Value>>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, Entry<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, values)| (key.as_str(), Entry::from_values(values)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}
