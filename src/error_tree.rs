//! Groups a completed violation sequence by instance location.
use std::collections::HashMap;

use crate::error::ValidationError;
use crate::paths::PathSegment;

/// A tree keyed by path segment; each node holds the violations whose path
/// ends there, grouped by the keyword that produced them.
#[derive(Debug, Default)]
pub struct ErrorTree {
    errors: HashMap<String, ValidationError>,
    children: HashMap<PathSegmentKey, ErrorTree>,
}

/// `PathSegment` does not implement `Hash` directly (it mixes `String` and
/// `usize` variants); keyed on its `Display` rendering instead, which is
/// exactly what a `HashMap<PathSegment, _>` would collapse to anyway since
/// `Key("0")` and `Index(0)` address the same JSON Pointer token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PathSegmentKey(String);

impl From<&PathSegment> for PathSegmentKey {
    fn from(segment: &PathSegment) -> Self {
        PathSegmentKey(segment.to_string())
    }
}

impl ErrorTree {
    /// Build a tree from a completed sequence of violations.
    pub fn new(errors: impl IntoIterator<Item = ValidationError>) -> Self {
        let mut tree = ErrorTree::default();
        for error in errors {
            tree.insert(error);
        }
        tree
    }

    fn insert(&mut self, error: ValidationError) {
        let mut node = self;
        for segment in error.path.segments() {
            node = node.children.entry(segment.into()).or_default();
        }
        node.errors.insert(error.validator_keyword.clone(), error);
    }

    /// Whether a direct child exists at `segment`.
    pub fn contains(&self, segment: &PathSegment) -> bool {
        self.children.contains_key(&PathSegmentKey::from(segment))
    }

    /// The child tree rooted at `segment`, if any violations were recorded
    /// there (directly or transitively).
    pub fn child(&self, segment: &PathSegment) -> Option<&ErrorTree> {
        self.children.get(&PathSegmentKey::from(segment))
    }

    /// This node's own violations, keyed by the keyword that raised them.
    pub fn errors(&self) -> &HashMap<String, ValidationError> {
        &self.errors
    }

    /// Keys of the direct children, for iteration.
    pub fn child_keys(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(|k| k.0.as_str())
    }

    /// Own violations plus every descendant's, recursively.
    pub fn total_errors(&self) -> usize {
        self.errors.len() + self.children.values().map(ErrorTree::total_errors).sum::<usize>()
    }
}
