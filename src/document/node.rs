//! JSON node representation.
//!
//! This module provides the core data structure for representing decoded JSON
//! documents in jsonpick. A `JsonValue` is a closed enum over the six JSON
//! types; containers own their children, so a decoded document is a plain tree
//! that can be shared read-only between any number of lookups.
//!
//! # Example
//!
//! ```
//! use jsonpick::document::node::JsonValue;
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), JsonValue::String("jsonpick".to_string()));
//! map.insert("version".to_string(), JsonValue::Number(1.0));
//! let object = JsonValue::Object(map);
//!
//! assert!(object.is_object());
//! assert_eq!(object.type_name(), "object");
//! ```

use indexmap::IndexMap;
use serde_json::Value as SerdeValue;

/// Shared `null`, handy as a borrowed default.
pub static NULL: JsonValue = JsonValue::Null;

/// A decoded JSON value.
///
/// Objects and arrays contain `JsonValue` children directly. Numbers are kept
/// as `f64`, which is how every decoder in this crate reports them.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    /// A JSON null
    #[default]
    Null,
    /// A JSON boolean
    Boolean(bool),
    /// A JSON number
    Number(f64),
    /// A JSON string
    String(String),
    /// A JSON array containing ordered values
    Array(Vec<JsonValue>),
    /// A JSON object containing key-value pairs
    Object(IndexMap<String, JsonValue>),
}

impl JsonValue {
    /// Returns true if this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Returns true if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns true if this value is a container (object or array).
    ///
    /// # Example
    ///
    /// ```
    /// use jsonpick::document::node::JsonValue;
    ///
    /// assert!(JsonValue::Array(vec![]).is_container());
    /// assert!(!JsonValue::Number(42.0).is_container());
    /// ```
    pub fn is_container(&self) -> bool {
        matches!(self, JsonValue::Object(_) | JsonValue::Array(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Short lowercase name of this value's JSON type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Boolean(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// Converts this value back into a `serde_json::Value` for printing.
    ///
    /// Numbers with no fractional part that fit in a `u64` or `i64` are emitted
    /// as integers so `2` prints as `2` rather than `2.0`. `u64::MAX as f64` is
    /// 2^64, one past the last `u64`, hence the strict upper bound. Non-finite
    /// numbers have no JSON form and become `null`.
    pub fn to_serde(&self) -> SerdeValue {
        match self {
            JsonValue::Null => SerdeValue::Null,
            JsonValue::Boolean(b) => SerdeValue::Bool(*b),
            JsonValue::Number(n) => {
                if n.fract() == 0.0 && *n >= 0.0 && *n < u64::MAX as f64 {
                    SerdeValue::from(*n as u64)
                } else if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < 0.0 {
                    SerdeValue::from(*n as i64)
                } else {
                    serde_json::Number::from_f64(*n)
                        .map(SerdeValue::Number)
                        .unwrap_or(SerdeValue::Null)
                }
            }
            JsonValue::String(s) => SerdeValue::String(s.clone()),
            JsonValue::Array(items) => SerdeValue::Array(items.iter().map(Self::to_serde).collect()),
            JsonValue::Object(props) => SerdeValue::Object(
                props
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_serde()))
                    .collect(),
            ),
        }
    }
}

impl std::fmt::Display for JsonValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_serde())
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Boolean(b)
    }
}

impl From<f64> for JsonValue {
    fn from(n: f64) -> Self {
        JsonValue::Number(n)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}
