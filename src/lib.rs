//! jsonpick - extract values from decoded JSON trees.
//!
//! A lookup walks a [`JsonPath`], an ordered list of [`Selector`]s, through a
//! [`JsonValue`] tree. The `lookup` module wraps evaluation with typed
//! accessors that fall back to a default value, and with `read*` variants that
//! decode a byte stream first.
//!
//! ```
//! use jsonpick::{get_string, decode_str, path};
//!
//! let root = decode_str(r#"{"user": {"name": "Alice"}}"#).unwrap();
//! let name = get_string(&root, &path!["user", "name"], "anonymous");
//! assert_eq!(name.into_value(), "Alice");
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod jsonpath;
pub mod lookup;

pub use document::node::JsonValue;
pub use document::parser::{decode_reader, decode_str};
pub use jsonpath::{evaluate, JsonPath, JsonPathError, Match, Outcome, Selector};
pub use lookup::{
    get, get_bool, get_number, get_string, read, read_bool, read_number, read_string, Lookup,
};
