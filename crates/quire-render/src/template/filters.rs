//! Format filters and functions for MiniJinja.
//!
//! | Syntax | Renders with |
//! |--------|--------------|
//! | `{{ value\|html }}` | the `html` format |
//! | `{{ value\|in_format("html") }}` | the format named by the argument |
//! | `{{ html(value) }}` | the `html` format, once functions are enabled |
//!
//! Filter output is marked safe so the engine's formatter writes it verbatim.

use std::sync::Arc;

use minijinja::{Environment, Error, Value};

use crate::formats::Formats;

/// Registers one filter per format plus the generic `in_format` filter.
pub fn register_format_filters(env: &mut Environment<'static>, formats: &Arc<Formats<Value>>) {
    for name in formats.names() {
        let formats = Arc::clone(formats);
        let format = name.clone();
        env.add_filter(name, move |value: Value| -> Result<Value, Error> {
            render_safe(&formats, &format, &value)
        });
    }

    let formats = Arc::clone(formats);
    env.add_filter(
        "in_format",
        move |value: Value, format: String| -> Result<Value, Error> {
            render_safe(&formats, &format, &value)
        },
    );
}

/// Registers one function per format.
pub fn register_format_functions(env: &mut Environment<'static>, formats: &Arc<Formats<Value>>) {
    for name in formats.names() {
        let formats = Arc::clone(formats);
        let format = name.clone();
        env.add_function(name, move |value: Value| -> Result<Value, Error> {
            render_safe(&formats, &format, &value)
        });
    }
}

fn render_safe(formats: &Formats<Value>, format: &str, value: &Value) -> Result<Value, Error> {
    Ok(Value::from_safe_string(formats.render(format, value)?))
}
