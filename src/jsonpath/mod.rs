//! Path evaluation over decoded JSON trees.
//!
//! A path is an ordered list of selectors, built in code rather than parsed
//! from a query string. Evaluation walks one selector at a time:
//!
//! - `Key("name")` - named member of an object
//! - `Index(3)` - element of an array
//! - `Slice { start, stop }` - array elements with `start <= i < stop`
//! - `IndexPredicate(f)` - array elements where `f(index, value)` holds
//! - `KeyPredicate(f)` - object members where `f(key, value)` holds
//!
//! Key and index selectors resolve to at most one node. Slices and predicates
//! branch and produce an aggregate of everything the remaining path reached.
//!
//! # Examples
//!
//! ```
//! use jsonpick::document::parser::decode_str;
//! use jsonpick::jsonpath::{evaluate, Outcome, Selector};
//! use jsonpick::path;
//!
//! let root = decode_str(r#"{"items": [{"id": 1}, {"id": 2}, {"name": "x"}]}"#).unwrap();
//!
//! // items[*].id, skipping elements without an id
//! let all = Selector::filter_index(|_, _| true);
//! let found = evaluate(&root, &path!["items", all, "id"]).into_result().unwrap();
//! assert_eq!(found.to_json(), serde_json::json!([1, 2]));
//!
//! assert_eq!(evaluate(&root, &path!["missing"]), Outcome::NotFound);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;

pub use ast::{IndexPredicateFn, JsonPath, KeyPredicateFn, Selector};
pub use error::JsonPathError;
pub use evaluator::{evaluate, Evaluator, Match, Outcome};
