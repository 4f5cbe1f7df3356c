use super::ast::{JsonPath, Selector};
use super::error::JsonPathError;
use crate::document::node::{JsonValue, NULL};
use serde_json::Value as SerdeValue;
use std::borrow::Cow;

/// Result of evaluating a path against a node.
///
/// Failures are ordinary values here so they can travel through recursion and
/// sit inside slice aggregates; they only become [`JsonPathError`]s at the
/// lookup boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<'a> {
    Found(Match<'a>),
    NotFound,
    TypeMismatch,
    UnknownSelector,
}

/// What a successful evaluation yielded.
#[derive(Debug, Clone, PartialEq)]
pub enum Match<'a> {
    /// A single node, borrowed from the tree unless detached with `into_owned`.
    Node(Cow<'a, JsonValue>),
    /// The aggregate produced by a predicate or slice selector, in tree order.
    ///
    /// Predicate aggregates only hold `Found` entries. Slice aggregates hold
    /// each in-range element's outcome as-is, failures included.
    Many(Vec<Outcome<'a>>),
}

impl<'a> Outcome<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }

    /// Converts failure outcomes into the matching error.
    pub fn into_result(self) -> Result<Match<'a>, JsonPathError> {
        match self {
            Outcome::Found(found) => Ok(found),
            Outcome::NotFound => Err(JsonPathError::NotFound),
            Outcome::TypeMismatch => Err(JsonPathError::TypeMismatch),
            Outcome::UnknownSelector => Err(JsonPathError::UnknownSelector),
        }
    }

    pub fn into_owned(self) -> Outcome<'static> {
        match self {
            Outcome::Found(found) => Outcome::Found(found.into_owned()),
            Outcome::NotFound => Outcome::NotFound,
            Outcome::TypeMismatch => Outcome::TypeMismatch,
            Outcome::UnknownSelector => Outcome::UnknownSelector,
        }
    }
}

impl<'a> Match<'a> {
    /// A match on the shared `null` node.
    pub fn null() -> Match<'static> {
        Match::Node(Cow::Borrowed(&NULL))
    }

    pub fn as_node(&self) -> Option<&JsonValue> {
        match self {
            Match::Node(node) => Some(node),
            Match::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[Outcome<'a>]> {
        match self {
            Match::Node(_) => None,
            Match::Many(items) => Some(items),
        }
    }

    /// Detaches the match from the tree it was found in.
    pub fn into_owned(self) -> Match<'static> {
        match self {
            Match::Node(node) => Match::Node(Cow::Owned(node.into_owned())),
            Match::Many(items) => Match::Many(items.into_iter().map(Outcome::into_owned).collect()),
        }
    }

    /// Renders the match as JSON. Failed entries of a slice aggregate become `null`.
    pub fn to_json(&self) -> SerdeValue {
        match self {
            Match::Node(node) => node.to_serde(),
            Match::Many(items) => SerdeValue::Array(
                items
                    .iter()
                    .map(|item| match item {
                        Outcome::Found(found) => found.to_json(),
                        _ => SerdeValue::Null,
                    })
                    .collect(),
            ),
        }
    }
}

impl<'a> From<&'a JsonValue> for Match<'a> {
    fn from(node: &'a JsonValue) -> Self {
        Match::Node(Cow::Borrowed(node))
    }
}

impl From<JsonValue> for Match<'static> {
    fn from(node: JsonValue) -> Self {
        Match::Node(Cow::Owned(node))
    }
}

pub struct Evaluator<'a> {
    root: &'a JsonValue,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a JsonValue) -> Self {
        Evaluator { root }
    }

    /// Evaluates a path against the root node.
    pub fn evaluate(&self, path: &JsonPath) -> Outcome<'a> {
        descend(self.root, path.segments())
    }
}

/// Evaluates `path` against `node`. See [`Evaluator`].
pub fn evaluate<'a>(node: &'a JsonValue, path: &JsonPath) -> Outcome<'a> {
    Evaluator::new(node).evaluate(path)
}

fn descend<'a>(node: &'a JsonValue, selectors: &[Selector]) -> Outcome<'a> {
    let Some((selector, rest)) = selectors.split_first() else {
        return Outcome::Found(Match::Node(Cow::Borrowed(node)));
    };
    log::trace!("applying {} to {}", selector, node.type_name());

    match (selector, node) {
        (Selector::Key(name), JsonValue::Object(props)) => match props.get(name.as_str()) {
            Some(child) => descend(child, rest),
            None => Outcome::NotFound,
        },
        (Selector::Key(_), _) => Outcome::TypeMismatch,

        (Selector::Index(idx), JsonValue::Array(items)) => {
            match usize::try_from(*idx).ok().and_then(|i| items.get(i)) {
                Some(child) => descend(child, rest),
                None => Outcome::NotFound,
            }
        }
        (Selector::Index(_), _) => Outcome::TypeMismatch,

        (Selector::IndexPredicate(pred), JsonValue::Array(items)) => collect_filtered(
            items
                .iter()
                .enumerate()
                .filter(|&(idx, child)| pred(idx, child))
                .map(|(_, child)| child),
            rest,
        ),
        (Selector::KeyPredicate(pred), JsonValue::Object(props)) => collect_filtered(
            props
                .iter()
                .filter(|&(key, child)| pred(key.as_str(), child))
                .map(|(_, child)| child),
            rest,
        ),

        (Selector::Slice { start, stop }, JsonValue::Array(items)) => Outcome::Found(Match::Many(
            items
                .iter()
                .enumerate()
                .filter(|&(idx, _)| {
                    // Vec lengths never exceed isize::MAX
                    let pos = idx as isize;
                    *start <= pos && pos < *stop
                })
                .map(|(_, child)| descend(child, rest))
                .collect(),
        )),

        // Predicates and slices on the wrong container report UnknownSelector,
        // not TypeMismatch; callers distinguish the two.
        (
            Selector::IndexPredicate(_)
            | Selector::KeyPredicate(_)
            | Selector::Slice { .. }
            | Selector::Unrecognized(_),
            _,
        ) => Outcome::UnknownSelector,
    }
}

/// Descends into each selected child and gathers the hits.
///
/// Children that are missing the rest of the path are dropped; an unknown
/// selector anywhere aborts the whole aggregate.
fn collect_filtered<'a, I>(children: I, rest: &[Selector]) -> Outcome<'a>
where
    I: Iterator<Item = &'a JsonValue>,
{
    let mut matches = Vec::new();
    for child in children {
        match descend(child, rest) {
            Outcome::NotFound | Outcome::TypeMismatch => continue,
            Outcome::UnknownSelector => return Outcome::UnknownSelector,
            found => matches.push(found),
        }
    }
    Outcome::Found(Match::Many(matches))
}
