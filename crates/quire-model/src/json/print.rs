//! Rendering values to canonical JSON text.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;

use super::Json;
use crate::model::{Entry, Model};
use crate::number::Number;
use crate::value::Value;

/// Types that can be written as canonical JSON.
///
/// Implementors append to a shared buffer so nested structures render in a
/// single pass. Output never contains whitespace between tokens.
pub trait ToJson {
    /// Appends the JSON form of `self` to `out`.
    fn write_json(&self, out: &mut String);

    /// Returns the JSON form of `self`.
    fn to_json(&self) -> String {
        let mut out = String::new();
        self.write_json(&mut out);
        out
    }
}

/// Renders any [`ToJson`] value.
///
/// ```
/// use quire_model::json::to_json;
/// use quire_model::Model;
///
/// let model = Model::new().with("root", Model::new().with("child", 1).with("child", -5));
/// assert_eq!(to_json(&model), r#"{"root":{"child":[1,-5]}}"#);
/// assert_eq!(to_json("a \"b\""), r#""a \"b\"""#);
/// ```
pub fn to_json<T: ToJson + ?Sized>(value: &T) -> String {
    value.to_json()
}

/// Quotes text, escaping only backslashes and double quotes.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    write_quoted(&mut out, text);
    out
}

/// Quotes the `Display` form of a value.
///
/// This is the fallback for values the printer has no structure for.
pub fn quote_display(value: &impl fmt::Display) -> String {
    quote(&value.to_string())
}

/// Renders one `"key":value` pair.
pub fn to_pair<V: ToJson + ?Sized>(key: impl fmt::Display, value: &V) -> String {
    let mut out = quote_display(&key);
    out.push(':');
    value.write_json(&mut out);
    out
}

fn write_quoted(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out.push('"');
}

fn write_array<'a, T, I>(out: &mut String, items: I)
where
    T: ToJson + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    out.push('[');
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        item.write_json(out);
    }
    out.push(']');
}

fn write_object<'a, K, V, I>(out: &mut String, pairs: I)
where
    K: AsRef<str> + ?Sized + 'a,
    V: ToJson + 'a,
    I: IntoIterator<Item = (&'a K, V)>,
{
    out.push('{');
    for (i, (key, value)) in pairs.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_quoted(out, key.as_ref());
        out.push(':');
        value.write_json(out);
    }
    out.push('}');
}

impl ToJson for str {
    fn write_json(&self, out: &mut String) {
        write_quoted(out, self);
    }
}

impl ToJson for String {
    fn write_json(&self, out: &mut String) {
        write_quoted(out, self);
    }
}

impl ToJson for bool {
    fn write_json(&self, out: &mut String) {
        out.push_str(if *self { "true" } else { "false" });
    }
}

impl ToJson for Number {
    fn write_json(&self, out: &mut String) {
        out.push_str(self.as_str());
    }
}

macro_rules! impl_to_json_integer {
    ($($ty:ty),*) => {
        $(
            impl ToJson for $ty {
                fn write_json(&self, out: &mut String) {
                    out.push_str(&self.to_string());
                }
            }
        )*
    };
}

impl_to_json_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T: ToJson + ?Sized> ToJson for &T {
    fn write_json(&self, out: &mut String) {
        (**self).write_json(out);
    }
}

impl<T: ToJson> ToJson for [T] {
    fn write_json(&self, out: &mut String) {
        write_array(out, self);
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn write_json(&self, out: &mut String) {
        write_array(out, self);
    }
}

impl<K: AsRef<str>, V: ToJson, S> ToJson for IndexMap<K, V, S> {
    fn write_json(&self, out: &mut String) {
        write_object(out, self.iter());
    }
}

impl<K: AsRef<str>, V: ToJson> ToJson for BTreeMap<K, V> {
    fn write_json(&self, out: &mut String) {
        write_object(out, self.iter());
    }
}

impl ToJson for Json {
    fn write_json(&self, out: &mut String) {
        match self {
            Json::String(s) => write_quoted(out, s),
            Json::Number(n) => n.write_json(out),
            Json::Bool(b) => b.write_json(out),
            Json::Array(items) => write_array(out, items),
            Json::Object(map) => map.write_json(out),
        }
    }
}

impl ToJson for Value {
    fn write_json(&self, out: &mut String) {
        match self {
            Value::String(s) => write_quoted(out, s),
            Value::Number(n) => n.write_json(out),
            Value::Bool(b) => b.write_json(out),
            Value::Model(m) => m.write_json(out),
            Value::List(items) => write_array(out, items),
        }
    }
}

impl ToJson for Entry<'_> {
    fn write_json(&self, out: &mut String) {
        match self {
            Entry::One(value) => value.write_json(out),
            Entry::Many(values) => write_array(out, *values),
        }
    }
}

impl ToJson for Model {
    fn write_json(&self, out: &mut String) {
        write_object(out, self.entries());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_escape_only_backslash_and_quote() {
        assert_eq!(quote("plain"), r#""plain""#);
        assert_eq!(quote(r#"He said "Hello""#), r#""He said \"Hello\"""#);
        assert_eq!(quote(r"a\b"), r#""a\\b""#);
        assert_eq!(quote("line\nbreak\tü"), "\"line\nbreak\tü\"");
    }

    #[test]
    fn scalars_render_as_literals() {
        assert_eq!(to_json(&true), "true");
        assert_eq!(to_json(&false), "false");
        assert_eq!(to_json(&-17i32), "-17");
        assert_eq!(to_json(&Number::from_f64(2.5).unwrap()), "2.5");
    }

    #[test]
    fn sequences_and_maps_are_minified() {
        assert_eq!(to_json(&vec![1, 2, 3]), "[1,2,3]");
        assert_eq!(to_json(&Vec::<i32>::new()), "[]");

        let mut map = BTreeMap::new();
        map.insert("b", vec!["x"]);
        map.insert("a", vec![]);
        assert_eq!(to_json(&map), r#"{"a":[],"b":["x"]}"#);
    }

    #[test]
    fn pairs_quote_display_keys() {
        assert_eq!(to_pair(7, "v"), r#""7":"v""#);
        assert_eq!(to_pair("k", &vec![true]), r#""k":[true]"#);
    }

    #[test]
    fn unknown_values_are_quoted_display() {
        let addr = std::net::Ipv4Addr::new(10, 0, 0, 1);
        assert_eq!(quote_display(&addr), r#""10.0.0.1""#);
    }

    #[test]
    fn renders_nested_model_with_mixed_values() {
        let model = Model::new().with(
            "root",
            Model::new()
                .with("foo", "bar")
                .with("foo", Model::new().with("baz", 1).with("baz", 2)),
        );
        assert_eq!(to_json(&model), r#"{"root":{"foo":["bar",{"baz":[1,2]}]}}"#);
    }

    #[test]
    fn model_and_its_map_render_identically() {
        let model = Model::new()
            .with("a", "x")
            .with("b", Model::new().with("c", true).with("c", false))
            .with("d", 3);
        assert_eq!(model.to_json(), model.to_map().to_json());
        assert_eq!(Model::new().to_json(), "{}");
    }
}
