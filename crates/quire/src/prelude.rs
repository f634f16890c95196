//! Prelude for convenient imports.
//!
//! ```rust
//! use quire::prelude::*;
//!
//! let model = Model::new().with("a", 1).with("a", 2);
//! assert_eq!(to_json(&model), r#"{"a":[1,2]}"#);
//! ```

pub use quire_model::json::{parse, to_json, ToJson};
pub use quire_model::{FromValue, Model, ModelError, Number, Value};
pub use quire_render::{Formats, RenderError, Renderers, Stringify, TemplateEngine};
