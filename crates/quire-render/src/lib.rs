//! # Quire Render - Predicate-dispatched rendering for quire models
//!
//! `quire-render` turns values into text by asking an ordered list of
//! predicates which renderer applies. On top of that registry it provides
//! named formats, XML output for [`Model`](quire_model::Model)s and a
//! MiniJinja template engine that renders through the registry.
//!
//! ## Core Concepts
//!
//! - [`Renderers`]: ordered `(predicate, stringifier)` pairs, first match wins,
//!   `Display` as the fallback
//! - [`Stringify`]: the stringifier trait, implemented by closures
//! - [`Formats`]: named registries (`html`, `xml`, `json`, ...) with parent
//!   inheritance
//! - [`xml`]: model to XML
//! - [`template`]: MiniJinja integration
//!
//! ## Quick Start
//!
//! ```rust
//! use quire_model::{Model, Value};
//! use quire_render::Renderers;
//!
//! let renderers = Renderers::<Value>::new()
//!     .add_infallible(Value::is_bool, |v| {
//!         if v.as_bool() == Some(true) { "yes".into() } else { "no".into() }
//!     });
//!
//! let model = Model::new().with("active", true).with("name", "widget");
//! let active = model.get("active").unwrap();
//! let name = model.get("name").unwrap();
//!
//! assert_eq!(renderers.render(active).unwrap(), "yes");
//! assert_eq!(renderers.render(name).unwrap(), "widget");
//! ```

mod error;
mod formats;
mod renderers;
pub mod template;
pub mod xml;

pub use error::{BoxError, RenderError};
pub use formats::Formats;
pub use renderers::{Renderers, Stringify};
pub use template::TemplateEngine;
pub use xml::{to_xml, XmlRenderer};
