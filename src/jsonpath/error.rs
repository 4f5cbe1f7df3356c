//! Error types for path lookups.

use std::fmt;

/// Errors that can occur while looking up a path.
#[derive(Debug)]
pub enum JsonPathError {
    /// The addressed key or index does not exist at some depth.
    NotFound,
    /// A key selector met a non-object, or an index selector met a non-array.
    TypeMismatch,
    /// A selector the evaluator can't apply: an unrecognized segment, or a
    /// predicate/slice used on the wrong kind of container.
    UnknownSelector,
    /// The located value is not of the type the accessor asked for.
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },
    /// The source could not be decoded as JSON.
    Decode(serde_json::Error),
}

impl JsonPathError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, JsonPathError::NotFound)
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, JsonPathError::Decode(_))
    }
}

impl fmt::Display for JsonPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonPathError::NotFound => write!(f, "not found"),
            JsonPathError::TypeMismatch => write!(f, "mismatched path type"),
            JsonPathError::UnknownSelector => write!(f, "unknown path type"),
            JsonPathError::UnexpectedType { expected, found } => {
                write!(f, "unexpected type: expected {}, found {}", expected, found)
            }
            JsonPathError::Decode(err) => write!(f, "invalid JSON: {}", err),
        }
    }
}

impl std::error::Error for JsonPathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JsonPathError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for JsonPathError {
    fn from(err: serde_json::Error) -> Self {
        JsonPathError::Decode(err)
    }
}
