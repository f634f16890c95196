//! Template rendering through registered formats.
//!
//! [`TemplateEngine`] wraps a MiniJinja environment and a [`Formats`] set.
//! Templates see models (or any `Serialize` data) as ordinary MiniJinja values:
//! single-valued keys are scalars, multi-valued keys are lists.
//!
//! ## Rendering Pipeline
//!
//! ```text
//! Template: {{ user.name|html }} joined {{ user.joined }}
//!              │                           │
//!              ▼                           ▼
//!        `html` format              default registry
//!              │                           │
//!              ▼                           ▼
//! Output:  Ann &amp; Bob joined 2021-04-01
//! ```
//!
//! - `{{ expr }}` is written by the first default registration accepting the
//!   value, or by MiniJinja when none does.
//! - `{{ expr|name }}` and `{{ expr|in_format("name") }}` render with a named
//!   format. Unknown names fail with [`RenderError::UnknownFormat`] in the
//!   message.
//! - [`TemplateEngine::enable_formats_as_functions`] also exposes each format
//!   as a function: `{{ name(expr) }}`.
//!
//! ## Template Sources
//!
//! Templates are added by name with [`TemplateEngine::add_template`], compiled
//! on the fly with [`TemplateEngine::render_str`], or loaded from a directory
//! set with [`TemplateEngine::with_template_dir`].
//!
//! [`Formats`]: crate::Formats
//! [`RenderError::UnknownFormat`]: crate::RenderError::UnknownFormat

mod engine;
pub mod filters;

pub use engine::TemplateEngine;
pub use filters::{register_format_filters, register_format_functions};
