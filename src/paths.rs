//! Instance path segments and the append-only violation path.
//!
//! A path is built by appending a segment every time a rule's recursive call
//! returns, so the segment closest to the validation root ends up last. This
//! is the opposite of how a human reads a JSON Pointer, which is why
//! [`ViolationPath::to_json_pointer`] reverses before rendering.
use std::fmt;

use serde_json::Value;

/// One step of an instance path: either an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => f.write_str(k),
            PathSegment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// The reversed-order path of a [`crate::error::ValidationError`] — segments
/// are appended as recursion unwinds, so the root sits at the end.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViolationPath(pub(crate) Vec<PathSegment>);

impl ViolationPath {
    pub fn new() -> Self {
        ViolationPath(Vec::new())
    }

    pub(crate) fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    /// Segments in root-to-leaf (conventional, top-down) order.
    pub fn segments(&self) -> Vec<&PathSegment> {
        self.0.iter().rev().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as a JSON Pointer (RFC 6901), escaping `~` and `/`.
    pub fn to_json_pointer(&self) -> String {
        let mut out = String::new();
        for segment in self.segments() {
            out.push('/');
            match segment {
                PathSegment::Key(k) => escape_pointer_token(k, &mut out),
                PathSegment::Index(i) => out.push_str(&i.to_string()),
            }
        }
        out
    }
}

fn escape_pointer_token(token: &str, out: &mut String) {
    for ch in token.chars() {
        match ch {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            other => out.push(other),
        }
    }
}

impl fmt::Display for ViolationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_pointer())
    }
}

/// Render a JSON value the way violation messages embed instances:
/// compact, single-line.
pub(crate) fn printable(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unprintable>".to_string())
}

/// RFC 6901 fragment resolution, with array-index support (fixing the
/// object-only navigation of the legacy source).
pub(crate) fn resolve_pointer<'a>(document: &'a Value, pointer: &str) -> Option<&'a Value> {
    if pointer.is_empty() {
        return Some(document);
    }
    let pointer = pointer.strip_prefix('/')?;
    let mut current = document;
    for raw_token in pointer.split('/') {
        let token = unescape_token(raw_token);
        current = match current {
            Value::Object(map) => map.get(&token)?,
            Value::Array(items) => {
                let index = parse_array_index(&token)?;
                items.get(index)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// `~1` must be decoded before `~0` (`~01` decodes to `~1`, not `/`).
fn unescape_token(token: &str) -> String {
    if !token.contains('~') {
        return token.to_string();
    }
    token.replace("~1", "/").replace("~0", "~")
}

/// Strict RFC 6901 array-index syntax: `0` or a non-zero-leading decimal
/// digit sequence, no leading `+`.
fn parse_array_index(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_renders_root_to_leaf() {
        // Simulates real recursion: the innermost rule (an array items
        // check at index 0) pushes first, the outer `properties` rule
        // pushes "x" only after its recursive call returns.
        let mut path = ViolationPath::new();
        path.push(0usize);
        path.push("x");
        assert_eq!(path.to_json_pointer(), "/x/0");
    }

    #[test]
    fn pointer_escaping_order_matters() {
        let doc = json!({"a/b": {"c~d": 1}});
        assert_eq!(resolve_pointer(&doc, "/a~1b/c~0d"), Some(&json!(1)));
    }

    #[test]
    fn pointer_supports_array_indices() {
        let doc = json!({"items": [10, 20, 30]});
        assert_eq!(resolve_pointer(&doc, "/items/1"), Some(&json!(20)));
        assert_eq!(resolve_pointer(&doc, "/items/01"), None);
        assert_eq!(resolve_pointer(&doc, "/items/+1"), None);
    }

    #[test]
    fn root_pointer_returns_document() {
        let doc = json!({"a": 1});
        assert_eq!(resolve_pointer(&doc, ""), Some(&doc));
    }
}
