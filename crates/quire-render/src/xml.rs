//! XML output for models.
//!
//! Every key becomes an element named after it. A key holding several values
//! repeats its element once per value, nested models become child elements and
//! scalars become escaped text:
//!
//! ```rust
//! use quire_model::Model;
//! use quire_render::xml::to_xml;
//!
//! let model = Model::new().with(
//!     "root",
//!     Model::new()
//!         .with("foo", "bar")
//!         .with("foo", Model::new().with("baz", "lo")),
//! );
//!
//! assert_eq!(
//!     to_xml(&model).unwrap(),
//!     "<root><foo>bar</foo><foo><baz>lo</baz></foo></root>"
//! );
//! ```
//!
//! Keys that are not valid XML names are rewritten: invalid characters become
//! `_` and names that do not start with a letter or underscore get a leading
//! `_`. Keys that end up with the same name stay where they were, so siblings
//! keep the model's order. A model with several top-level keys produces
//! sibling elements with no common root.
//!
//! XML has no arrays: a list value is flattened, nested lists included, and
//! each element repeats the key's element. `{"grid":[[1,2],3]}` renders as
//! `<grid>1</grid><grid>2</grid><grid>3</grid>`.

use quick_xml::se::Serializer;
use quire_model::{Model, Value};
use serde::ser::SerializeMap;
use serde::Serialize;

use crate::error::RenderError;
use crate::renderers::Stringify;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Renders `model` as compact XML.
pub fn to_xml(model: &Model) -> Result<String, RenderError> {
    XmlRenderer::new().render(model)
}

/// Renders `model` as XML indented by `width` spaces per level.
pub fn to_xml_indented(model: &Model, width: usize) -> Result<String, RenderError> {
    XmlRenderer::new().indent(width).render(model)
}

/// Configurable XML renderer, usable as a [`Stringify`] registration.
///
/// ```rust
/// use quire_model::{Model, Value};
/// use quire_render::xml::XmlRenderer;
/// use quire_render::Renderers;
///
/// let renderers = Renderers::<Value>::new().add_stringifier(Value::is_model, XmlRenderer::new());
/// let value = Value::from(Model::new().with("a", 1));
/// assert_eq!(renderers.render(&value).unwrap(), "<a>1</a>");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XmlRenderer {
    indent: Option<usize>,
    declaration: bool,
}

impl XmlRenderer {
    /// Compact output without a declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indents nested elements by `width` spaces per level.
    pub fn indent(mut self, width: usize) -> Self {
        self.indent = Some(width);
        self
    }

    /// Prefixes the output with an XML declaration.
    pub fn declaration(mut self, enabled: bool) -> Self {
        self.declaration = enabled;
        self
    }

    /// Renders `model` with these settings.
    pub fn render(&self, model: &Model) -> Result<String, RenderError> {
        let mut out = String::new();
        if self.declaration {
            out.push_str(DECLARATION);
        }
        for (key, entry) in model.entries() {
            let name = sanitize_xml_name(key);
            for value in leaves(entry.values()) {
                if self.indent.is_some() && !out.is_empty() {
                    out.push('\n');
                }
                self.write_element(&mut out, &name, &XmlValue(value))?;
            }
        }
        Ok(out)
    }

    fn write_element<T: Serialize + ?Sized>(
        &self,
        out: &mut String,
        name: &str,
        value: &T,
    ) -> Result<(), RenderError> {
        let mut serializer = Serializer::with_root(&mut *out, Some(name))?;
        if let Some(width) = self.indent {
            serializer.indent(' ', width);
        }
        value.serialize(serializer)?;
        Ok(())
    }
}

impl Stringify<Model> for XmlRenderer {
    fn stringify(&self, value: &Model) -> Result<String, RenderError> {
        self.render(value)
    }
}

impl Stringify<Value> for XmlRenderer {
    /// Models render as elements; other values render as escaped text.
    fn stringify(&self, value: &Value) -> Result<String, RenderError> {
        match value {
            Value::Model(model) => self.render(model),
            other => Ok(quick_xml::escape::escape(other.to_string().as_str()).into_owned()),
        }
    }
}

/// A model as an XML element body: one child per value, in model order.
struct XmlModel<'a>(&'a Model);

impl Serialize for XmlModel<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, entry) in self.0.entries() {
            let name = sanitize_xml_name(key);
            for value in leaves(entry.values()) {
                map.serialize_entry(&name, &XmlValue(value))?;
            }
        }
        map.end()
    }
}

/// One value as an element body; numbers keep their canonical text.
struct XmlValue<'a>(&'a Value);

impl Serialize for XmlValue<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::String(text) => serializer.serialize_str(text),
            Value::Number(number) => serializer.serialize_str(number.as_str()),
            Value::Bool(flag) => serializer.serialize_bool(*flag),
            Value::Model(model) => XmlModel(model).serialize(serializer),
            Value::List(items) => serializer.collect_seq(leaves(items).into_iter().map(XmlValue)),
        }
    }
}

/// The values with every list flattened, depth first.
fn leaves(values: &[Value]) -> Vec<&Value> {
    fn collect<'a>(values: &'a [Value], out: &mut Vec<&'a Value>) {
        for value in values {
            match value {
                Value::List(items) => collect(items, out),
                other => out.push(other),
            }
        }
    }
    let mut out = Vec::with_capacity(values.len());
    collect(values, &mut out);
    out
}

/// Ensures a string is a valid XML element name.
///
/// XML names must start with a letter or underscore. Subsequent characters
/// may be letters, digits, hyphens, underscores, or periods.
fn sanitize_xml_name(name: &str) -> String {
    if name.is_empty() {
        return "_".to_string();
    }
    let mut result = String::with_capacity(name.len() + 1);
    for (i, c) in name.chars().enumerate() {
        if i == 0 && !(c.is_ascii_alphabetic() || c == '_') {
            result.push('_');
            if c.is_ascii_alphanumeric() {
                result.push(c);
            }
        } else if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
            result.push(c);
        } else {
            result.push('_');
        }
    }
    result
}
