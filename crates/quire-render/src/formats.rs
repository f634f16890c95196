//! Named formats built from renderer registries.
//!
//! [`Formats`] maps a format name (`"html"`, `"xml"`, `"currency"`, ...) to its
//! own [`Renderers`] registry, alongside a default registry used when no
//! format is named. A format set can inherit from a parent. Registries are
//! layered rather than replaced: a child's entries for a format are tried
//! first, then the parent's entries for the same format, and the same holds
//! for the default registry.
//!
//! ```rust
//! use quire_render::Formats;
//!
//! let formats = Formats::<String>::with_default_encoders()
//!     .add_infallible("shout", |_| true, |s| s.to_uppercase());
//!
//! assert_eq!(formats.render("html", &"<b>".to_string()).unwrap(), "&lt;b&gt;");
//! assert_eq!(formats.render("shout", &"hey".to_string()).unwrap(), "HEY");
//! assert!(formats.render("csv", &"x".to_string()).is_err());
//! ```
//!
//! ## Default Encoders
//!
//! | Format | Output |
//! |--------|--------|
//! | `raw`  | `Display` text, unchanged |
//! | `html` | `Display` text with markup characters escaped |
//! | `xml`  | `Display` text with markup characters escaped |
//! | `json` | `Display` text as a quoted JSON string |

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use quire_model::json::quote;

use crate::error::RenderError;
use crate::renderers::{Renderers, Stringify};

/// Named [`Renderers`] plus a default registry.
pub struct Formats<T: ?Sized> {
    default: Renderers<T>,
    named: HashMap<String, Renderers<T>>,
    parent: Option<Arc<Formats<T>>>,
}

impl<T: ?Sized + 'static> Formats<T> {
    /// Creates an empty format set with no parent.
    pub fn new() -> Self {
        Self {
            default: Renderers::new(),
            named: HashMap::new(),
            parent: None,
        }
    }

    /// Creates an empty format set that falls back to `parent`.
    pub fn with_parent(parent: impl Into<Arc<Formats<T>>>) -> Self {
        Self {
            parent: Some(parent.into()),
            ..Self::new()
        }
    }

    /// Registers a stringifier under `format`.
    pub fn add<P, F>(mut self, format: impl Into<String>, predicate: P, stringify: F) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        F: Fn(&T) -> Result<String, RenderError> + Send + Sync + 'static,
    {
        self.named
            .entry(format.into())
            .or_default()
            .push(predicate, stringify);
        self
    }

    /// Registers an infallible stringifier under `format`.
    pub fn add_infallible<P, F>(self, format: impl Into<String>, predicate: P, stringify: F) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.add(format, predicate, move |value: &T| Ok(stringify(value)))
    }

    /// Registers a stringifier in the default registry.
    pub fn add_default<P, F>(mut self, predicate: P, stringify: F) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        F: Fn(&T) -> Result<String, RenderError> + Send + Sync + 'static,
    {
        self.default.push(predicate, stringify);
        self
    }

    /// Replaces this set's own registry for `format`.
    ///
    /// A parent's registry of the same name is still consulted after it.
    pub fn insert(mut self, format: impl Into<String>, renderers: Renderers<T>) -> Self {
        self.named.insert(format.into(), renderers);
        self
    }

    /// Returns true when `format` is known here or in a parent.
    pub fn contains(&self, format: &str) -> bool {
        self.named.contains_key(format)
            || self
                .parent
                .as_deref()
                .is_some_and(|parent| parent.contains(format))
    }

    /// The registries for `format` in lookup order: this set's own first,
    /// then each parent's.
    pub fn registries(&self, format: &str) -> Vec<&Renderers<T>> {
        let mut registries = Vec::new();
        let mut current = Some(self);
        while let Some(formats) = current {
            registries.extend(formats.named.get(format));
            current = formats.parent.as_deref();
        }
        registries
    }

    /// The default registry of this format set.
    pub fn default_renderers(&self) -> &Renderers<T> {
        &self.default
    }

    /// All format names, including inherited ones, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        self.collect_names(&mut names);
        names.into_iter().collect()
    }

    fn collect_names(&self, names: &mut BTreeSet<String>) {
        names.extend(self.named.keys().cloned());
        if let Some(parent) = &self.parent {
            parent.collect_names(names);
        }
    }

    /// Finds the stringifier `format` would use for `value`: the first match
    /// across [`registries`](Self::registries), in order.
    pub fn find(&self, format: &str, value: &T) -> Option<&dyn Stringify<T>> {
        self.registries(format)
            .into_iter()
            .find_map(|renderers| renderers.find(value))
    }

    /// Finds the default stringifier for `value`, consulting parents.
    pub fn find_default(&self, value: &T) -> Option<&dyn Stringify<T>> {
        self.default.find(value).or_else(|| {
            self.parent
                .as_deref()
                .and_then(|parent| parent.find_default(value))
        })
    }
}

impl<T: ?Sized + fmt::Display + 'static> Formats<T> {
    /// Creates a format set with the `raw`, `html`, `xml` and `json` encoders.
    pub fn with_default_encoders() -> Self {
        Self::new().add_default_encoders()
    }

    /// Adds the `raw`, `html`, `xml` and `json` encoders.
    pub fn add_default_encoders(self) -> Self {
        self.add_infallible("raw", |_| true, |value| value.to_string())
            .add_infallible("html", |_| true, |value| escape_markup(value))
            .add_infallible("xml", |_| true, |value| escape_markup(value))
            .add_infallible("json", |_| true, |value| quote(&value.to_string()))
    }

    /// Renders `value` in the named format.
    ///
    /// Values the format has no entry for render through `Display`.
    pub fn render(&self, format: &str, value: &T) -> Result<String, RenderError> {
        if !self.contains(format) {
            tracing::debug!(format, "unknown format requested");
            return Err(RenderError::UnknownFormat(format.to_string()));
        }
        match self.find(format, value) {
            Some(stringifier) => stringifier.stringify(value),
            None => Ok(value.to_string()),
        }
    }

    /// Renders `value` with the default registry, or its `Display` form.
    pub fn render_default(&self, value: &T) -> Result<String, RenderError> {
        match self.find_default(value) {
            Some(stringifier) => stringifier.stringify(value),
            None => Ok(value.to_string()),
        }
    }
}

fn escape_markup<T: fmt::Display + ?Sized>(value: &T) -> String {
    quick_xml::escape::escape(value.to_string().as_str()).into_owned()
}

impl<T: ?Sized + 'static> Default for Formats<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Formats<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formats")
            .field("default", &self.default)
            .field("named", &self.named)
            .field("parent", &self.parent)
            .finish()
    }
}
