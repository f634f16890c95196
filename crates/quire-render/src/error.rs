//! Error types for value and template rendering.
//!
//! [`RenderError`] is the single error type returned by renderers, format
//! lookups, the XML writer and the template engine. Template engine errors are
//! converted on the boundary so callers never see `minijinja` types.

use thiserror::Error;

/// Boxed error carried by a failing stringifier.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A registered stringifier failed.
    #[error("stringify error: {0}")]
    Stringify(#[source] BoxError),

    /// A named format was requested that was never registered.
    #[error("unknown format: {0}")]
    UnknownFormat(String),

    /// Template syntax error or evaluation failure.
    #[error("template error: {0}")]
    Template(String),

    /// Template not found in the engine.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Data could not be serialized for the template engine.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// XML output could not be produced.
    #[error("xml error: {0}")]
    Xml(String),

    /// Other operational error raised while rendering.
    #[error("{0}")]
    Operation(String),
}

impl RenderError {
    /// Wraps any error or message as a stringifier failure.
    ///
    /// ```rust
    /// use quire_render::RenderError;
    ///
    /// let err = RenderError::stringify("value out of range");
    /// assert_eq!(err.to_string(), "stringify error: value out of range");
    /// ```
    pub fn stringify(err: impl Into<BoxError>) -> Self {
        RenderError::Stringify(err.into())
    }
}

impl From<quick_xml::DeError> for RenderError {
    fn from(err: quick_xml::DeError) -> Self {
        RenderError::Xml(err.to_string())
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(err.to_string()),
            ErrorKind::SyntaxError
            | ErrorKind::BadEscape
            | ErrorKind::UndefinedError
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownMethod => RenderError::Template(err.to_string()),
            ErrorKind::BadSerialization => RenderError::Serialization(err.to_string()),
            _ => RenderError::Operation(err.to_string()),
        }
    }
}

impl From<RenderError> for minijinja::Error {
    fn from(err: RenderError) -> Self {
        let kind = match err {
            RenderError::UnknownFormat(_) => minijinja::ErrorKind::UnknownFilter,
            _ => minijinja::ErrorKind::InvalidOperation,
        };
        minijinja::Error::new(kind, err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = RenderError::TemplateNotFound("foo".to_string());
        assert!(err.to_string().contains("template not found"));
        assert!(err.to_string().contains("foo"));

        let err = RenderError::UnknownFormat("csv".to_string());
        assert_eq!(err.to_string(), "unknown format: csv");
    }

    #[test]
    fn test_stringify_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad bytes");
        let err = RenderError::stringify(io_err);
        assert!(matches!(err, RenderError::Stringify(_)));
        assert_eq!(err.source().unwrap().to_string(), "bad bytes");
    }

    #[test]
    fn test_from_minijinja_template_not_found() {
        let mj_err = minijinja::Error::new(
            minijinja::ErrorKind::TemplateNotFound,
            "template 'foo' not found",
        );
        let render_err: RenderError = mj_err.into();
        assert!(matches!(render_err, RenderError::TemplateNotFound(_)));
    }

    #[test]
    fn test_from_minijinja_syntax_error() {
        let mj_err = minijinja::Error::new(minijinja::ErrorKind::SyntaxError, "unexpected end");
        let render_err: RenderError = mj_err.into();
        assert!(matches!(render_err, RenderError::Template(_)));
    }

    #[test]
    fn test_into_minijinja_preserves_message() {
        let mj_err: minijinja::Error = RenderError::UnknownFormat("csv".into()).into();
        assert_eq!(mj_err.kind(), minijinja::ErrorKind::UnknownFilter);
        assert!(mj_err.to_string().contains("unknown format: csv"));
    }
}
