//! # Quire - Ordered models, canonical JSON and predicate-dispatched rendering
//!
//! Quire bundles [`quire_model`] and [`quire_render`] behind one import:
//!
//! - [`Model`]: insertion-ordered keys, several values per key, free nesting
//! - [`json`]: canonical minified JSON printing and parsing that round-trip
//! - [`Renderers`] and [`Formats`]: first-match-wins value rendering
//! - [`xml`] and [`template`]: XML and MiniJinja output for models
//!
//! ## Quick Start
//!
//! ```rust
//! use quire::prelude::*;
//!
//! let model = Model::new()
//!     .with("user", Model::new().with("name", "Dan").with("tel", "34567890"))
//!     .with("user", Model::new().with("name", "Mat").with("tel", "978532"));
//!
//! let json = model.to_string();
//! assert_eq!(
//!     json,
//!     r#"{"user":[{"name":"Dan","tel":"34567890"},{"name":"Mat","tel":"978532"}]}"#
//! );
//! assert_eq!(Model::parse(&json).unwrap(), model);
//!
//! let names = quire::render("{% for u in user %}{{ u.name }} {% endfor %}", &model).unwrap();
//! assert_eq!(names, "Dan Mat ");
//! ```
//!
//! ## Which Render Function?
//!
//! | Function | Use When |
//! |----------|----------|
//! | [`render`] | One-off template with the default encoders |
//! | [`render_with`] | One-off template with your own [`Formats`] |
//! | [`TemplateEngine`] | Named templates, template directories, repeated rendering |
//! | [`to_xml`] | Model as XML elements |

pub mod prelude;

pub use quire_model::json;
pub use quire_model::{
    Entries, Entry, FromValue, Json, Model, ModelError, Number, Object, ParseError, Value,
};
pub use quire_render::template;
pub use quire_render::xml;
pub use quire_render::{
    to_xml, BoxError, Formats, RenderError, Renderers, Stringify, TemplateEngine, XmlRenderer,
};

/// Template-side value type used by [`Formats`] given to [`TemplateEngine`].
pub use minijinja::Value as TemplateValue;

/// Renders a template string against a model with the default encoders.
///
/// ```rust
/// use quire::Model;
///
/// let model = Model::new().with("title", "Fish & Chips");
/// assert_eq!(quire::render("{{ title|html }}", &model).unwrap(), "Fish &amp; Chips");
/// ```
pub fn render(template: &str, model: &Model) -> Result<String, RenderError> {
    TemplateEngine::default().render_str(template, model)
}

/// Renders a template string against a model with the given formats.
pub fn render_with(
    template: &str,
    model: &Model,
    formats: Formats<TemplateValue>,
) -> Result<String, RenderError> {
    TemplateEngine::new(formats).render_str(template, model)
}
