//! # Quire Model - Ordered, multi-valued, nested models
//!
//! `quire-model` provides [`Model`], an associative structure that keeps keys in
//! insertion order, lets one key hold several values, and nests freely. It
//! comes with a canonical JSON text form that round-trips exactly.
//!
//! ## Core Concepts
//!
//! - [`Model`]: ordered keys, each owning a sequence of [`Value`]s
//! - [`Value`]: string, [`Number`], boolean, nested model or list
//! - [`Number`]: decimal-preserving number (`1` and `1.0` stay different)
//! - [`json`]: printer ([`json::ToJson`]) and parser ([`json::parse`])
//!
//! ## Singular and Plural Keys
//!
//! A key with one value prints as a scalar, a key with several values prints
//! as an array. Parsing reverses this, so printing and parsing are inverse
//! operations:
//!
//! ```rust
//! use quire_model::Model;
//!
//! let model = Model::new()
//!     .with("root", Model::new()
//!         .with("child", 1)
//!         .with("child", -5)
//!         .with("child", "text"));
//!
//! let text = model.to_string();
//! assert_eq!(text, r#"{"root":{"child":[1,-5,"text"]}}"#);
//! assert_eq!(text.parse::<Model>().unwrap(), model);
//! ```
//!
//! ## Typed Access
//!
//! ```rust
//! use quire_model::{Model, ModelError};
//!
//! let model = Model::new().with("count", 3).with("name", "widget");
//! assert_eq!(model.get_as::<i64>("count").unwrap(), Some(3));
//! assert_eq!(model.get_as::<i64>("missing").unwrap(), None);
//! assert!(matches!(
//!     model.get_as::<i64>("name"),
//!     Err(ModelError::TypeMismatch { .. })
//! ));
//! ```

mod error;
pub mod json;
mod model;
mod number;
mod value;

pub use error::{ModelError, Result};
pub use json::{Json, Object, ParseError};
pub use model::{Entries, Entry, Model};
pub use number::Number;
pub use value::{FromValue, Value};
