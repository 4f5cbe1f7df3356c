//! Typed lookups with default values.
//!
//! Every accessor here returns a [`Lookup`]: the located value, or the
//! caller's default together with the reason the lookup failed. The `get*`
//! family works on an already decoded tree; the `read*` family decodes a byte
//! stream first and never evaluates the path if decoding fails.
//!
//! # Example
//!
//! ```
//! use jsonpick::lookup::{read_number, read_string};
//! use jsonpick::path;
//!
//! let json = r#"{"baz": ["1", 2, null]}"#;
//!
//! let name = read_string(json.as_bytes(), &path!["baz", 0], "");
//! assert_eq!(name.value(), "1");
//!
//! let count = read_number(json.as_bytes(), &path!["baz", 0], 10.0);
//! assert_eq!(*count.value(), 10.0);
//! assert!(count.error().is_some());
//! ```

use crate::document::node::JsonValue;
use crate::document::parser::decode_reader;
use crate::jsonpath::{evaluate, JsonPath, JsonPathError, Match};
use std::io::Read;

/// A looked-up value paired with the error that replaced it, if any.
///
/// On failure `value` holds the default passed to the accessor.
#[derive(Debug)]
#[must_use]
pub struct Lookup<T> {
    value: T,
    error: Option<JsonPathError>,
}

impl<T> Lookup<T> {
    pub fn found(value: T) -> Self {
        Self { value, error: None }
    }

    pub fn failed(default: T, error: JsonPathError) -> Self {
        Self {
            value: default,
            error: Some(error),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn error(&self) -> Option<&JsonPathError> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The located value, or the default if the lookup failed.
    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Option<JsonPathError>) {
        (self.value, self.error)
    }

    /// Drops the default and keeps only the error on failure.
    pub fn into_result(self) -> Result<T, JsonPathError> {
        match self.error {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        Lookup {
            value: f(self.value),
            error: self.error,
        }
    }
}

/// Looks up `path` in `root`, falling back to `default`.
pub fn get<'a>(root: &'a JsonValue, path: &JsonPath, default: Match<'a>) -> Lookup<Match<'a>> {
    match evaluate(root, path).into_result() {
        Ok(found) => Lookup::found(found),
        Err(err) => Lookup::failed(default, err),
    }
}

/// Looks up a string value.
pub fn get_string(root: &JsonValue, path: &JsonPath, default: &str) -> Lookup<String> {
    coerce(root, path, default.to_string(), "string", |node| {
        node.as_str().map(str::to_string)
    })
}

/// Looks up a number value.
pub fn get_number(root: &JsonValue, path: &JsonPath, default: f64) -> Lookup<f64> {
    coerce(root, path, default, "number", JsonValue::as_f64)
}

/// Looks up a boolean value.
pub fn get_bool(root: &JsonValue, path: &JsonPath, default: bool) -> Lookup<bool> {
    coerce(root, path, default, "boolean", JsonValue::as_bool)
}

fn coerce<T>(
    root: &JsonValue,
    path: &JsonPath,
    default: T,
    expected: &'static str,
    extract: impl FnOnce(&JsonValue) -> Option<T>,
) -> Lookup<T> {
    let found = match evaluate(root, path).into_result() {
        Ok(found) => found,
        Err(err) => return Lookup::failed(default, err),
    };

    let actual = match &found {
        Match::Node(node) => match extract(node) {
            Some(value) => return Lookup::found(value),
            None => node.type_name(),
        },
        // aggregates are arrays of matches
        Match::Many(_) => "array",
    };
    Lookup::failed(
        default,
        JsonPathError::UnexpectedType {
            expected,
            found: actual,
        },
    )
}

/// Decodes JSON from `reader` and looks up `path` in it.
pub fn read<R: Read>(reader: R, path: &JsonPath, default: JsonValue) -> Lookup<Match<'static>> {
    let root = match decode_source(reader) {
        Ok(root) => root,
        Err(err) => return Lookup::failed(Match::from(default), err),
    };
    let lookup = get(&root, path, Match::from(default));
    lookup.map(Match::into_owned)
}

/// Decodes JSON from `reader` and looks up a string value.
pub fn read_string<R: Read>(reader: R, path: &JsonPath, default: &str) -> Lookup<String> {
    match decode_source(reader) {
        Ok(root) => get_string(&root, path, default),
        Err(err) => Lookup::failed(default.to_string(), err),
    }
}

/// Decodes JSON from `reader` and looks up a number value.
pub fn read_number<R: Read>(reader: R, path: &JsonPath, default: f64) -> Lookup<f64> {
    match decode_source(reader) {
        Ok(root) => get_number(&root, path, default),
        Err(err) => Lookup::failed(default, err),
    }
}

/// Decodes JSON from `reader` and looks up a boolean value.
pub fn read_bool<R: Read>(reader: R, path: &JsonPath, default: bool) -> Lookup<bool> {
    match decode_source(reader) {
        Ok(root) => get_bool(&root, path, default),
        Err(err) => Lookup::failed(default, err),
    }
}

fn decode_source<R: Read>(reader: R) -> Result<JsonValue, JsonPathError> {
    decode_reader(reader).map_err(|err| {
        log::debug!("skipping path lookup, source is not valid JSON: {}", err);
        JsonPathError::Decode(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::decode_str;
    use crate::path;

    fn make_test_tree() -> JsonValue {
        decode_str(r#"{"name": "test", "age": 42, "ok": true, "items": ["a", "b"]}"#).unwrap()
    }

    #[test]
    fn test_lookup_found() {
        let lookup = Lookup::found(3);
        assert!(lookup.is_ok());
        assert_eq!(lookup.into_result().unwrap(), 3);
    }

    #[test]
    fn test_lookup_failed_keeps_default() {
        let lookup = Lookup::failed(7, JsonPathError::NotFound);
        assert!(!lookup.is_ok());
        let (value, err) = lookup.into_parts();
        assert_eq!(value, 7);
        assert!(matches!(err, Some(JsonPathError::NotFound)));
    }

    #[test]
    fn test_lookup_map_keeps_error() {
        let lookup = Lookup::failed(2, JsonPathError::TypeMismatch).map(|v| v * 10);
        assert_eq!(*lookup.value(), 20);
        assert!(matches!(lookup.error(), Some(JsonPathError::TypeMismatch)));
    }

    #[test]
    fn test_get_returns_default_on_each_failure() {
        let tree = make_test_tree();
        let fallback = JsonValue::from("fallback");

        let missing = get(&tree, &path!["nope"], Match::from(&fallback));
        assert_eq!(missing.value().as_node(), Some(&fallback));
        assert!(matches!(missing.error(), Some(JsonPathError::NotFound)));

        let mismatch = get(&tree, &path!["name", 0], Match::from(&fallback));
        assert!(matches!(mismatch.error(), Some(JsonPathError::TypeMismatch)));

        let unknown = get(&tree, &path!["name", 0..1], Match::null());
        assert_eq!(unknown.value().as_node(), Some(&JsonValue::Null));
        assert!(matches!(unknown.error(), Some(JsonPathError::UnknownSelector)));
    }

    #[test]
    fn test_typed_getters() {
        let tree = make_test_tree();
        assert_eq!(get_string(&tree, &path!["name"], "").into_value(), "test");
        assert_eq!(get_number(&tree, &path!["age"], 0.0).into_value(), 42.0);
        assert!(get_bool(&tree, &path!["ok"], false).into_value());
    }

    #[test]
    fn test_typed_getter_unexpected_type() {
        let tree = make_test_tree();
        let lookup = get_number(&tree, &path!["name"], -1.0);
        assert_eq!(*lookup.value(), -1.0);
        assert!(matches!(
            lookup.error(),
            Some(JsonPathError::UnexpectedType {
                expected: "number",
                found: "string"
            })
        ));
    }

    #[test]
    fn test_typed_getter_on_aggregate() {
        let tree = make_test_tree();
        let lookup = get_string(&tree, &path!["items", 0..1], "none");
        assert_eq!(lookup.value(), "none");
        assert!(matches!(
            lookup.error(),
            Some(JsonPathError::UnexpectedType { found: "array", .. })
        ));
    }

    #[test]
    fn test_typed_getter_propagates_lookup_error() {
        let tree = make_test_tree();
        let lookup = get_bool(&tree, &path!["missing"], true);
        assert!(*lookup.value());
        assert!(matches!(lookup.error(), Some(JsonPathError::NotFound)));
    }

    #[test]
    fn test_read_decode_error_returns_default() {
        let lookup = read(&b"{\"a\": "[..], &path!["a"], JsonValue::from(1.0));
        assert_eq!(lookup.value().as_node(), Some(&JsonValue::Number(1.0)));
        assert!(lookup.error().is_some_and(JsonPathError::is_decode));
    }

    #[test]
    fn test_read_owned_match() {
        let lookup = read(&b"{\"a\": [1, 2]}"[..], &path!["a", 1], JsonValue::Null);
        assert!(lookup.is_ok());
        assert_eq!(lookup.value().to_json(), serde_json::json!(2));
    }
}
