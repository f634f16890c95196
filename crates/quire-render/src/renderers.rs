//! Predicate-dispatched value renderers.
//!
//! A [`Renderers`] registry holds an ordered list of `(predicate, stringifier)`
//! pairs. Rendering a value walks the list in registration order and uses the
//! first entry whose predicate accepts the value. When nothing matches, the
//! value's `Display` form is used.
//!
//! ```rust
//! use quire_render::Renderers;
//!
//! let renderers = Renderers::<i64>::new()
//!     .add_infallible(|n| *n < 0, |n| format!("({})", -n))
//!     .add_infallible(|n| *n == 0, |_| "nil".to_string());
//!
//! assert_eq!(renderers.render(&-42).unwrap(), "(42)");
//! assert_eq!(renderers.render(&0).unwrap(), "nil");
//! assert_eq!(renderers.render(&7).unwrap(), "7");
//! ```
//!
//! ## Ordering
//!
//! Earlier registrations win. Register the most specific predicates first:
//!
//! | Registered | Value `3` renders as |
//! |------------|----------------------|
//! | `is_odd → "odd"`, then `always → "num"` | `odd` |
//! | `always → "num"`, then `is_odd → "odd"` | `num` |
//!
//! ## Optional Lookup
//!
//! [`Renderers::find`] answers whether a registered rendering exists without
//! falling back to `Display`; [`Renderers::render_registered`] renders only in
//! that case. Both work for values that do not implement `Display`.

use std::fmt;

use crate::error::RenderError;

/// Converts a value to its textual form.
///
/// Closures of the form `Fn(&T) -> Result<String, RenderError>` implement
/// this trait automatically, so most registrations never name it. Implement
/// it directly for reusable renderers such as
/// [`XmlRenderer`](crate::xml::XmlRenderer).
pub trait Stringify<T: ?Sized>: Send + Sync {
    /// Renders `value` to text.
    fn stringify(&self, value: &T) -> Result<String, RenderError>;
}

impl<T: ?Sized, F> Stringify<T> for F
where
    F: Fn(&T) -> Result<String, RenderError> + Send + Sync,
{
    fn stringify(&self, value: &T) -> Result<String, RenderError> {
        self(value)
    }
}

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

struct Registration<T: ?Sized> {
    predicate: Predicate<T>,
    stringifier: Box<dyn Stringify<T>>,
}

/// An ordered registry of `(predicate, stringifier)` pairs.
///
/// `T` may be unsized, so a registry can dispatch over `str` or
/// `dyn Any + Send + Sync` as well as concrete types. The registry is
/// `Send + Sync` and can be shared read-only once built.
pub struct Renderers<T: ?Sized> {
    entries: Vec<Registration<T>>,
}

impl<T: ?Sized + 'static> Renderers<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers a fallible stringifier for values accepted by `predicate`.
    pub fn add<P, F>(mut self, predicate: P, stringify: F) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        F: Fn(&T) -> Result<String, RenderError> + Send + Sync + 'static,
    {
        self.push(predicate, stringify);
        self
    }

    /// Registers a stringifier that cannot fail.
    pub fn add_infallible<P, F>(self, predicate: P, stringify: F) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.add(predicate, move |value: &T| Ok(stringify(value)))
    }

    /// Registers a [`Stringify`] implementor for values accepted by `predicate`.
    pub fn add_stringifier<P, S>(mut self, predicate: P, stringifier: S) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        S: Stringify<T> + 'static,
    {
        self.register(Box::new(predicate), Box::new(stringifier));
        self
    }

    /// Registers a fallible stringifier in place.
    pub fn push<P, F>(&mut self, predicate: P, stringify: F) -> &mut Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        F: Fn(&T) -> Result<String, RenderError> + Send + Sync + 'static,
    {
        self.register(Box::new(predicate), Box::new(stringify));
        self
    }

    fn register(&mut self, predicate: Predicate<T>, stringifier: Box<dyn Stringify<T>>) {
        self.entries.push(Registration {
            predicate,
            stringifier,
        });
    }

    /// Returns the stringifier of the first entry accepting `value`.
    pub fn find(&self, value: &T) -> Option<&dyn Stringify<T>> {
        self.position(value)
            .map(|index| self.entries[index].stringifier.as_ref())
    }

    /// Renders `value` only when a registered entry accepts it.
    pub fn render_registered(&self, value: &T) -> Option<Result<String, RenderError>> {
        self.find(value).map(|stringifier| stringifier.stringify(value))
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, value: &T) -> Option<usize> {
        let index = self
            .entries
            .iter()
            .position(|entry| (entry.predicate)(value));
        match index {
            Some(index) => tracing::trace!(index, "renderer matched"),
            None => tracing::trace!(entries = self.entries.len(), "no renderer matched"),
        }
        index
    }
}

impl<T: ?Sized + fmt::Display + 'static> Renderers<T> {
    /// Renders `value` with the first matching entry, or its `Display` form.
    ///
    /// Errors raised by the matching stringifier are returned unchanged.
    pub fn render(&self, value: &T) -> Result<String, RenderError> {
        self.render_registered(value)
            .unwrap_or_else(|| Ok(value.to_string()))
    }
}

impl<T: ?Sized + 'static> Default for Renderers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Renderers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderers")
            .field("entries", &self.entries.len())
            .finish()
    }
}
