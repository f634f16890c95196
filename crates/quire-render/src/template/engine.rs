//! MiniJinja engine wired to a [`Formats`] set.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use minijinja::{AutoEscape, Environment, Error, ErrorKind, Output, State, Value};
use serde::Serialize;

use super::filters::{register_format_filters, register_format_functions};
use crate::error::RenderError;
use crate::formats::Formats;

/// Template engine that renders every expression through registered formats.
///
/// Output of `{{ expr }}` is produced by the default registry of the engine's
/// [`Formats`]; values no registration accepts fall back to MiniJinja's own
/// formatting. Each named format is available as a filter.
///
/// # Example
///
/// ```rust
/// use minijinja::Value;
/// use quire_model::Model;
/// use quire_render::template::TemplateEngine;
/// use quire_render::Formats;
///
/// let formats = Formats::<Value>::with_default_encoders()
///     .add_default(|v: &Value| v.is_true() && v.as_str().is_none(), |_| Ok("yes".into()));
/// let engine = TemplateEngine::new(formats);
///
/// let model = Model::new().with("name", "<Ann>").with("admin", true);
/// let output = engine
///     .render_str("{{ name|html }} admin={{ admin }}", &model)
///     .unwrap();
/// assert_eq!(output, "&lt;Ann&gt; admin=yes");
/// ```
pub struct TemplateEngine {
    env: Environment<'static>,
    formats: Arc<Formats<Value>>,
}

impl TemplateEngine {
    /// Creates an engine rendering through `formats`.
    pub fn new(formats: Formats<Value>) -> Self {
        let formats = Arc::new(formats);
        let mut env = Environment::new();
        install_formatter(&mut env, Arc::clone(&formats));
        register_format_filters(&mut env, &formats);
        Self { env, formats }
    }

    /// Also exposes every format as a function: `{{ html(name) }}`.
    pub fn enable_formats_as_functions(mut self) -> Self {
        register_format_functions(&mut self.env, &self.formats);
        self
    }

    /// Loads templates not added explicitly from files under `dir`.
    pub fn with_template_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.env.set_loader(minijinja::path_loader(dir));
        self
    }

    /// The formats this engine renders with.
    pub fn formats(&self) -> &Formats<Value> {
        &self.formats
    }

    /// Returns true when `name` is a registered format.
    pub fn has_format(&self, name: &str) -> bool {
        self.formats.contains(name)
    }

    /// Adds a named template to the engine.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        tracing::debug!(name, "template registered");
        Ok(())
    }

    /// Renders a previously registered or loadable template.
    pub fn render_named<S>(&self, name: &str, data: &S) -> Result<String, RenderError>
    where
        S: Serialize + ?Sized,
    {
        let template = self.env.get_template(name)?;
        Ok(template.render(Value::from_serialize(data))?)
    }

    /// Compiles and renders a template string in one step.
    pub fn render_str<S>(&self, source: &str, data: &S) -> Result<String, RenderError>
    where
        S: Serialize + ?Sized,
    {
        Ok(self.env.render_str(source, Value::from_serialize(data))?)
    }

    /// Checks if a template with the given name exists.
    pub fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// This allows registering extra filters, functions or globals.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new(Formats::with_default_encoders())
    }
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("formats", &self.formats)
            .finish_non_exhaustive()
    }
}

/// Routes `{{ expr }}` output through the default registry.
///
/// Undefined, none and safe values keep MiniJinja's handling. Registry output
/// is escaped like any other text when the template auto-escapes.
fn install_formatter(env: &mut Environment<'static>, formats: Arc<Formats<Value>>) {
    env.set_formatter(
        move |out: &mut Output<'_>, state: &State<'_, '_>, value: &Value| -> Result<(), Error> {
            if value.is_undefined() || value.is_none() || value.is_safe() {
                return minijinja::escape_formatter(out, state, value);
            }
            match formats.find_default(value) {
                Some(stringifier) => {
                    let text = stringifier.stringify(value)?;
                    if !matches!(state.auto_escape(), AutoEscape::None) {
                        return minijinja::escape_formatter(out, state, &Value::from(text));
                    }
                    out.write_str(&text).map_err(|err| {
                        Error::new(ErrorKind::WriteFailure, "could not write output").with_source(err)
                    })
                }
                None => minijinja::escape_formatter(out, state, value),
            }
        },
    );
}
