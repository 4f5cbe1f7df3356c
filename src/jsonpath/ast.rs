//! Path and selector types.
//!
//! A path is an ordered list of selectors built programmatically, not parsed
//! from JSONPath text. Each selector addresses one level of the tree.

use crate::document::node::JsonValue;
use serde_json::Value as SerdeValue;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// Predicate over an array element and its position.
pub type IndexPredicateFn = Arc<dyn Fn(usize, &JsonValue) -> bool + Send + Sync>;

/// Predicate over an object member and its key.
pub type KeyPredicateFn = Arc<dyn Fn(&str, &JsonValue) -> bool + Send + Sync>;

/// A single segment of a path.
#[derive(Clone)]
pub enum Selector {
    /// Named object member (`"name"`)
    Key(String),
    /// Array element at a zero-based position. Negative positions never match.
    Index(isize),
    /// Array elements with `start <= position < stop`. Bounds are not clamped
    /// and negative values do not wrap.
    Slice { start: isize, stop: isize },
    /// Every array element accepted by the predicate
    IndexPredicate(IndexPredicateFn),
    /// Every object member accepted by the predicate
    KeyPredicate(KeyPredicateFn),
    /// A segment whose shape no selector understands, kept verbatim
    Unrecognized(String),
}

impl Selector {
    pub fn key(name: impl Into<String>) -> Self {
        Selector::Key(name.into())
    }

    pub fn index(idx: isize) -> Self {
        Selector::Index(idx)
    }

    pub fn slice(start: isize, stop: isize) -> Self {
        Selector::Slice { start, stop }
    }

    /// Selects array elements for which `f(position, element)` is true.
    pub fn filter_index<F>(f: F) -> Self
    where
        F: Fn(usize, &JsonValue) -> bool + Send + Sync + 'static,
    {
        Selector::IndexPredicate(Arc::new(f))
    }

    /// Selects object members for which `f(key, value)` is true.
    pub fn filter_key<F>(f: F) -> Self
    where
        F: Fn(&str, &JsonValue) -> bool + Send + Sync + 'static,
    {
        Selector::KeyPredicate(Arc::new(f))
    }

    /// Types one JSON-encoded path segment.
    ///
    /// Strings become keys, integers become indices and an object of the form
    /// `{"start": a, "stop": b}` becomes a slice. Anything else is kept as
    /// `Unrecognized` and fails evaluation with an unknown-selector error.
    pub fn from_json(segment: &SerdeValue) -> Self {
        match segment {
            SerdeValue::String(name) => Selector::Key(name.clone()),
            SerdeValue::Number(n) => match n.as_i64().and_then(|i| isize::try_from(i).ok()) {
                Some(idx) => Selector::Index(idx),
                None => Selector::Unrecognized(segment.to_string()),
            },
            SerdeValue::Object(bounds) if bounds.len() == 2 => {
                let bound = |name: &str| {
                    bounds
                        .get(name)
                        .and_then(SerdeValue::as_i64)
                        .and_then(|i| isize::try_from(i).ok())
                };
                match (bound("start"), bound("stop")) {
                    (Some(start), Some(stop)) => Selector::Slice { start, stop },
                    _ => Selector::Unrecognized(segment.to_string()),
                }
            }
            _ => Selector::Unrecognized(segment.to_string()),
        }
    }

    /// Types one command-line segment.
    ///
    /// `3` and `-1` are indices, `1:4` is a slice, everything else is a key.
    pub fn from_arg(arg: &str) -> Self {
        if let Ok(idx) = arg.parse::<isize>() {
            return Selector::Index(idx);
        }
        if let Some((start, stop)) = arg.split_once(':') {
            if let (Ok(start), Ok(stop)) = (start.parse::<isize>(), stop.parse::<isize>()) {
                return Selector::Slice { start, stop };
            }
        }
        Selector::Key(arg.to_string())
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Key(name) => f.debug_tuple("Key").field(name).finish(),
            Selector::Index(idx) => f.debug_tuple("Index").field(idx).finish(),
            Selector::Slice { start, stop } => f
                .debug_struct("Slice")
                .field("start", start)
                .field("stop", stop)
                .finish(),
            Selector::IndexPredicate(_) => f.write_str("IndexPredicate(..)"),
            Selector::KeyPredicate(_) => f.write_str("KeyPredicate(..)"),
            Selector::Unrecognized(raw) => f.debug_tuple("Unrecognized").field(raw).finish(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Key(name) => write!(f, "[{:?}]", name),
            Selector::Index(idx) => write!(f, "[{}]", idx),
            Selector::Slice { start, stop } => write!(f, "[{}:{}]", start, stop),
            Selector::IndexPredicate(_) | Selector::KeyPredicate(_) => f.write_str("[?]"),
            Selector::Unrecognized(raw) => write!(f, "[{}]", raw),
        }
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Selector::Key(name.to_string())
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Selector::Key(name)
    }
}

impl From<i32> for Selector {
    fn from(idx: i32) -> Self {
        Selector::Index(idx as isize)
    }
}

impl From<isize> for Selector {
    fn from(idx: isize) -> Self {
        Selector::Index(idx)
    }
}

impl From<usize> for Selector {
    fn from(idx: usize) -> Self {
        // Anything past isize::MAX can't be a real position anyway.
        Selector::Index(isize::try_from(idx).unwrap_or(isize::MAX))
    }
}

impl From<Range<i32>> for Selector {
    fn from(range: Range<i32>) -> Self {
        Selector::Slice {
            start: range.start as isize,
            stop: range.end as isize,
        }
    }
}

impl From<Range<isize>> for Selector {
    fn from(range: Range<isize>) -> Self {
        Selector::Slice {
            start: range.start,
            stop: range.end,
        }
    }
}

/// A complete path: selectors consumed front to back.
///
/// An empty path addresses the node it is evaluated against.
#[derive(Debug, Clone, Default)]
pub struct JsonPath {
    /// Selectors that make up the path.
    pub segments: Vec<Selector>,
}

impl JsonPath {
    /// Creates a new path with the given selectors.
    pub fn new(segments: Vec<Selector>) -> Self {
        Self { segments }
    }

    /// Builds a path from a JSON-encoded segment list such as
    /// `["items", 0, {"start": 1, "stop": 3}]`.
    ///
    /// A value that is not an array is treated as a one-segment path.
    pub fn from_json(value: &SerdeValue) -> Self {
        match value {
            SerdeValue::Array(segments) => {
                Self::new(segments.iter().map(Selector::from_json).collect())
            }
            other => Self::new(vec![Selector::from_json(other)]),
        }
    }

    /// Builds a path from command-line segments; see [`Selector::from_arg`].
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            args.into_iter()
                .map(|arg| Selector::from_arg(arg.as_ref()))
                .collect(),
        )
    }

    /// Appends a selector, builder style.
    pub fn then(mut self, selector: impl Into<Selector>) -> Self {
        self.segments.push(selector.into());
        self
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Selector] {
        &self.segments
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl From<Vec<Selector>> for JsonPath {
    fn from(segments: Vec<Selector>) -> Self {
        Self::new(segments)
    }
}

impl FromIterator<Selector> for JsonPath {
    fn from_iter<I: IntoIterator<Item = Selector>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Builds a [`JsonPath`] from a list of selector-convertible values.
///
/// ```
/// use jsonpick::path;
/// use jsonpick::jsonpath::Selector;
///
/// let p = path!["baz", 5, 1..4, Selector::filter_index(|_, v| v.is_null())];
/// assert_eq!(p.len(), 4);
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::jsonpath::JsonPath::default()
    };
    ($($segment:expr),+ $(,)?) => {
        $crate::jsonpath::JsonPath::new(vec![
            $($crate::jsonpath::Selector::from($segment)),+
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_macro_types_segments() {
        let p = crate::path!["baz", 5, 1..4];
        assert!(matches!(&p.segments[0], Selector::Key(k) if k == "baz"));
        assert!(matches!(p.segments[1], Selector::Index(5)));
        assert!(matches!(p.segments[2], Selector::Slice { start: 1, stop: 4 }));
    }

    #[test]
    fn test_empty_path_macro() {
        assert!(crate::path![].is_empty());
    }

    #[test]
    fn test_from_json_segments() {
        let p = JsonPath::from_json(&json!(["baz", -1, {"start": 0, "stop": 2}, 0.1, true]));
        assert_eq!(p.len(), 5);
        assert!(matches!(p.segments[1], Selector::Index(-1)));
        assert!(matches!(p.segments[2], Selector::Slice { start: 0, stop: 2 }));
        assert!(matches!(&p.segments[3], Selector::Unrecognized(raw) if raw == "0.1"));
        assert!(matches!(&p.segments[4], Selector::Unrecognized(raw) if raw == "true"));
    }

    #[test]
    fn test_from_json_slice_needs_both_bounds() {
        let p = JsonPath::from_json(&json!([{"start": 0}]));
        assert!(matches!(p.segments[0], Selector::Unrecognized(_)));
    }

    #[test]
    fn test_from_json_non_array_is_single_segment() {
        let p = JsonPath::from_json(&json!("name"));
        assert_eq!(p.len(), 1);
        assert!(matches!(&p.segments[0], Selector::Key(k) if k == "name"));
    }

    #[test]
    fn test_from_arg() {
        assert!(matches!(Selector::from_arg("3"), Selector::Index(3)));
        assert!(matches!(Selector::from_arg("-1"), Selector::Index(-1)));
        assert!(matches!(
            Selector::from_arg("1:4"),
            Selector::Slice { start: 1, stop: 4 }
        ));
        assert!(matches!(Selector::from_arg("a:b"), Selector::Key(k) if k == "a:b"));
        assert!(matches!(Selector::from_arg("name"), Selector::Key(k) if k == "name"));
    }

    #[test]
    fn test_builder_and_display() {
        let p = JsonPath::default()
            .then("users")
            .then(0)
            .then(Selector::slice(1, 3))
            .then(Selector::filter_key(|_, _| true));
        assert_eq!(p.to_string(), r#"$["users"][0][1:3][?]"#);
    }

    #[test]
    fn test_debug_hides_closures() {
        let s = Selector::filter_index(|i, _| i > 0);
        assert_eq!(format!("{:?}", s), "IndexPredicate(..)");
    }
}
