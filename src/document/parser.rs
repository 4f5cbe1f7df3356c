//! JSON decoding into `JsonValue` trees.
//!
//! Decoding is delegated to `serde_json`; this module converts its generic
//! value into our `JsonValue` representation. Both entry points read a single
//! JSON value, the way a stream decoder does: once the first complete value has
//! been read, whatever follows it is left untouched.
//!
//! # Example
//!
//! ```
//! use jsonpick::document::parser::decode_str;
//! use jsonpick::document::node::JsonValue;
//!
//! let json = r#"{"name": "Alice", "age": 30}"#;
//! let root = decode_str(json).unwrap();
//! assert!(root.is_object());
//! ```

use super::node::JsonValue;
use serde_json::Value as SerdeValue;
use std::io::Read;

/// Decodes a JSON document from a string.
///
/// # Errors
///
/// Returns the `serde_json` error unchanged if the text is not valid JSON or
/// contains no value at all.
pub fn decode_str(s: &str) -> Result<JsonValue, serde_json::Error> {
    decode_reader(s.as_bytes())
}

/// Decodes the first JSON value from a byte stream.
///
/// The reader is consumed lazily; wrap files in a `BufReader`.
pub fn decode_reader<R: Read>(reader: R) -> Result<JsonValue, serde_json::Error> {
    let mut stream = serde_json::Deserializer::from_reader(reader).into_iter::<SerdeValue>();
    match stream.next() {
        Some(value) => value.map(|v| parse_value(&v)),
        None => Err(serde::de::Error::custom("EOF while parsing a value")),
    }
}

/// Converts a `serde_json::Value` into a `JsonValue`.
pub fn parse_value(value: &SerdeValue) -> JsonValue {
    match value {
        SerdeValue::Null => JsonValue::Null,
        SerdeValue::Bool(b) => JsonValue::Boolean(*b),
        // as_f64 only fails for arbitrary-precision numbers, which we don't enable
        SerdeValue::Number(n) => JsonValue::Number(n.as_f64().unwrap_or(f64::NAN)),
        SerdeValue::String(s) => JsonValue::String(s.clone()),
        SerdeValue::Array(items) => JsonValue::Array(items.iter().map(parse_value).collect()),
        SerdeValue::Object(props) => JsonValue::Object(
            props
                .iter()
                .map(|(key, value)| (key.clone(), parse_value(value)))
                .collect(),
        ),
    }
}
