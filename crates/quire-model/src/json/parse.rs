//! Parsing canonical JSON text.
//!
//! A small recursive-descent parser over the grammar described in the
//! [module docs](super). The top level must be an object. Strings are sliced
//! from the input between ASCII delimiters, so multi-byte characters pass
//! through without being decoded individually.

use indexmap::map::Entry as MapEntry;

use super::error::{ParseError, ParseErrorKind};
use super::{Json, Object};
use crate::number::Number;

/// Default bound on object/array nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// How repeated keys inside one object are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// Collect every occurrence into one multi-value array at the position
    /// of the first occurrence. Arrays are flattened one level, the same way
    /// [`Model::add`](crate::Model::add) treats list values, so
    /// `{"a":1,"a":2}` parses like the model printed as `{"a":[1,2]}`.
    #[default]
    Merge,
    /// Keep the last occurrence, at the position of the first.
    LastWins,
    /// Fail with [`ParseErrorKind::DuplicateKey`].
    Reject,
}

/// Parser settings.
///
/// # Example
///
/// ```
/// use quire_model::json::{parse_with, DuplicateKeys, ParseConfig};
///
/// let config = ParseConfig::default().duplicate_keys(DuplicateKeys::LastWins);
/// let map = parse_with(r#"{"a":1,"a":2}"#, &config).unwrap();
/// assert_eq!(map["a"].to_string(), "2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Policy for repeated object keys.
    pub duplicate_keys: DuplicateKeys,
    /// Maximum nesting of objects and arrays, counting the top-level object.
    pub max_depth: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            duplicate_keys: DuplicateKeys::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseConfig {
    /// Sets the duplicate key policy.
    pub fn duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Sets the nesting limit.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Parses a JSON object with the default [`ParseConfig`].
///
/// ```
/// use quire_model::json::parse;
///
/// let map = parse(r#"{"root" : "text"}"#).unwrap();
/// assert_eq!(map["root"].as_str(), Some("text"));
/// ```
pub fn parse(text: &str) -> Result<Object, ParseError> {
    parse_with(text, &ParseConfig::default())
}

/// Parses a JSON object with explicit settings.
pub fn parse_with(text: &str, config: &ParseConfig) -> Result<Object, ParseError> {
    let result = Parser::new(text, config).parse_document();
    if let Err(err) = &result {
        tracing::debug!(
            kind = %err.kind,
            offset = err.offset,
            line = err.line,
            column = err.column,
            "json parse failed"
        );
    }
    result
}

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    config: &'a ParseConfig,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, config: &'a ParseConfig) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            depth: 0,
            config,
        }
    }

    fn parse_document(mut self) -> Result<Object, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'{') => {}
            _ => return Err(self.unexpected("'{'")),
        }
        let object = self.parse_object()?;
        self.skip_whitespace();
        if self.pos < self.bytes.len() {
            return Err(self.error(ParseErrorKind::TrailingCharacters));
        }
        Ok(object)
    }

    fn parse_value(&mut self) -> Result<Json, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'{') => self.parse_object().map(Json::Object),
            Some(b'[') => self.parse_array().map(Json::Array),
            Some(b'"') => self.parse_string().map(Json::String),
            Some(b'-' | b'0'..=b'9') => self.parse_number().map(Json::Number),
            Some(b't') => self.parse_keyword("true", Json::Bool(true)),
            Some(b'f') => self.parse_keyword("false", Json::Bool(false)),
            _ => Err(self.unexpected("a value")),
        }
    }

    /// Expects `self.pos` on the opening brace.
    fn parse_object(&mut self) -> Result<Object, ParseError> {
        self.enter()?;
        self.pos += 1;
        let mut object = Object::new();

        self.skip_whitespace();
        if self.eat(b'}') {
            self.leave();
            return Ok(object);
        }

        loop {
            self.skip_whitespace();
            let key_start = self.pos;
            if self.peek() != Some(b'"') {
                return Err(self.unexpected("a quoted key"));
            }
            let key = self.parse_string()?;

            self.skip_whitespace();
            if !self.eat(b':') {
                return Err(self.unexpected("':'"));
            }

            let value = self.parse_value()?;
            self.insert(&mut object, key, value, key_start)?;

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }

        self.leave();
        Ok(object)
    }

    /// Expects `self.pos` on the opening bracket.
    fn parse_array(&mut self) -> Result<Vec<Json>, ParseError> {
        self.enter()?;
        self.pos += 1;
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.eat(b']') {
            self.leave();
            return Ok(items);
        }

        loop {
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }

        self.leave();
        Ok(items)
    }

    /// Expects `self.pos` on the opening quote.
    ///
    /// Only `\\` and `\"` are escapes. Any other backslash is kept as is.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();
        let mut run_start = self.pos;

        loop {
            match self.peek() {
                None => return Err(self.error_at(start, ParseErrorKind::UnterminatedString)),
                Some(b'"') => {
                    out.push_str(&self.input[run_start..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => match self.bytes.get(self.pos + 1) {
                    Some(&escaped @ (b'\\' | b'"')) => {
                        out.push_str(&self.input[run_start..self.pos]);
                        out.push(escaped as char);
                        self.pos += 2;
                        run_start = self.pos;
                    }
                    _ => self.pos += 1,
                },
                Some(_) => self.pos += 1,
            }
        }
    }

    fn parse_number(&mut self) -> Result<Number, ParseError> {
        let start = self.pos;
        self.eat(b'-');
        if self.skip_digits() == 0 {
            return Err(self.error_at(start, ParseErrorKind::InvalidNumber));
        }
        if self.eat(b'.') && self.skip_digits() == 0 {
            return Err(self.error_at(start, ParseErrorKind::InvalidNumber));
        }
        Number::from_literal(&self.input[start..self.pos])
            .ok_or_else(|| self.error_at(start, ParseErrorKind::InvalidNumber))
    }

    fn parse_keyword(&mut self, word: &str, value: Json) -> Result<Json, ParseError> {
        if self.input[self.pos..].starts_with(word) {
            self.pos += word.len();
            Ok(value)
        } else {
            Err(self.unexpected("a value"))
        }
    }

    fn insert(
        &self,
        object: &mut Object,
        key: String,
        value: Json,
        key_start: usize,
    ) -> Result<(), ParseError> {
        match object.entry(key) {
            MapEntry::Vacant(slot) => {
                slot.insert(value);
            }
            MapEntry::Occupied(mut slot) => match self.config.duplicate_keys {
                DuplicateKeys::Merge => merge_values(slot.get_mut(), value),
                DuplicateKeys::LastWins => {
                    slot.insert(value);
                }
                DuplicateKeys::Reject => {
                    let kind = ParseErrorKind::DuplicateKey(slot.key().clone());
                    return Err(self.error_at(key_start, kind));
                }
            },
        }
        Ok(())
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(self.error(ParseErrorKind::DepthLimitExceeded(self.config.max_depth)));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(self.pos, kind)
    }

    fn error_at(&self, offset: usize, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.input, offset, kind)
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.input.get(self.pos..).and_then(|rest| rest.chars().next()) {
            Some(found) => self.error(ParseErrorKind::UnexpectedChar { found, expected }),
            None => self.error(ParseErrorKind::UnexpectedEnd { expected }),
        }
    }
}

fn merge_values(existing: &mut Json, value: Json) {
    let mut values = match std::mem::replace(existing, Json::Array(Vec::new())) {
        Json::Array(items) => items,
        single => vec![single],
    };
    match value {
        Json::Array(items) => values.extend(items),
        single => values.push(single),
    }
    *existing = Json::Array(values);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(text: &str) -> ParseErrorKind {
        parse(text).unwrap_err().kind
    }

    #[test]
    fn parses_single_root_element_with_whitespace() {
        let map = parse("{\"root\" : \"text\"}").unwrap();
        assert_eq!(map.get("root"), Some(&Json::String("text".into())));
    }

    #[test]
    fn parses_nested_structures() {
        let map = parse(r#"{ "a" : [ 1 , -5.25 , "x" , true ] , "b" : { "c" : false } }"#).unwrap();
        assert_eq!(
            map["a"],
            Json::Array(vec![
                Json::Number(Number::from(1)),
                Json::Number("-5.25".parse().unwrap()),
                Json::String("x".into()),
                Json::Bool(true),
            ])
        );
        assert_eq!(map["b"].as_object().unwrap()["c"], Json::Bool(false));
    }

    #[test]
    fn empty_containers() {
        let map = parse(r#"{"a":[],"b":{}}"#).unwrap();
        assert_eq!(map["a"], Json::Array(vec![]));
        assert_eq!(map["b"], Json::Object(Object::new()));
        assert!(parse("{}").unwrap().is_empty());
    }

    #[test]
    fn unescapes_only_backslash_and_quote() {
        let map = parse(r#"{"t":"He said \"Hello\" then \\ and \n"}"#).unwrap();
        assert_eq!(map["t"].as_str(), Some(r#"He said "Hello" then \ and \n"#));
    }

    #[test]
    fn keeps_multibyte_text_intact() {
        let map = parse("{\"ключ\":\"значение ✓\nnext\"}").unwrap();
        assert_eq!(map["ключ"].as_str(), Some("значение ✓\nnext"));
    }

    #[test]
    fn integer_and_decimal_stay_distinct() {
        let map = parse(r#"{"i":1,"d":1.0}"#).unwrap();
        assert_ne!(map["i"], map["d"]);
        assert_eq!(map["d"].to_string(), "1.0");
    }

    #[test]
    fn duplicate_keys_merge_by_default() {
        let map = parse(r#"{"a":1,"b":0,"a":[2,3],"a":"x"}"#).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map["a"].to_string(), r#"[1,2,3,"x"]"#);
    }

    #[test]
    fn duplicate_keys_last_wins_and_reject() {
        let last = ParseConfig::default().duplicate_keys(DuplicateKeys::LastWins);
        assert_eq!(parse_with(r#"{"a":1,"a":2}"#, &last).unwrap()["a"].to_string(), "2");

        let reject = ParseConfig::default().duplicate_keys(DuplicateKeys::Reject);
        let err = parse_with(r#"{"a":1,"a":2}"#, &reject).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::DuplicateKey("a".into()));
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn top_level_must_be_an_object() {
        assert_eq!(
            kind_of("[1]"),
            ParseErrorKind::UnexpectedChar { found: '[', expected: "'{'" }
        );
        assert_eq!(kind_of("   "), ParseErrorKind::UnexpectedEnd { expected: "'{'" });
    }

    #[test]
    fn reports_structural_errors() {
        assert_eq!(
            kind_of(r#"{"a" 1}"#),
            ParseErrorKind::UnexpectedChar { found: '1', expected: "':'" }
        );
        assert_eq!(
            kind_of(r#"{"a":1"#),
            ParseErrorKind::UnexpectedEnd { expected: "',' or '}'" }
        );
        assert_eq!(
            kind_of(r#"{"a":[1,2}"#),
            ParseErrorKind::UnexpectedChar { found: '}', expected: "',' or ']'" }
        );
        assert_eq!(
            kind_of(r#"{"a":1,}"#),
            ParseErrorKind::UnexpectedChar { found: '}', expected: "a quoted key" }
        );
        assert_eq!(
            kind_of(r#"{"a":null}"#),
            ParseErrorKind::UnexpectedChar { found: 'n', expected: "a value" }
        );
    }

    #[test]
    fn reports_unterminated_string_at_its_start() {
        let err = parse(r#"{"a":"abc\"}"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
        assert_eq!(err.offset, 5);
    }

    #[test]
    fn reports_invalid_numbers() {
        assert_eq!(kind_of(r#"{"a":-}"#), ParseErrorKind::InvalidNumber);
        assert_eq!(kind_of(r#"{"a":1.}"#), ParseErrorKind::InvalidNumber);
        assert_eq!(
            kind_of(r#"{"a":1e5}"#),
            ParseErrorKind::UnexpectedChar { found: 'e', expected: "',' or '}'" }
        );
    }

    #[test]
    fn reports_trailing_content_with_position() {
        let err = parse("{\"a\":1}\n  x").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TrailingCharacters);
        assert_eq!((err.line, err.column, err.offset), (2, 3, 10));
        assert!(parse("{\"a\":1}  \n").is_ok());
    }

    #[test]
    fn enforces_depth_limit() {
        let config = ParseConfig::default().max_depth(3);
        assert!(parse_with(r#"{"a":{"b":[1]}}"#, &config).is_ok());
        let err = parse_with(r#"{"a":{"b":[[1]]}}"#, &config).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::DepthLimitExceeded(3));
    }
}
