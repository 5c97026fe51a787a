//! Violation records and the crate's fallible-operation error types.
use std::fmt;

use crate::paths::ViolationPath;

/// A single violation of a schema constraint against an instance.
///
/// Owned rather than borrowing from the instance/schema: the legacy source's
/// violations outlive a single recursive call (they are collected across the
/// whole tree and later folded into an [`crate::error_tree::ErrorTree`]), and
/// Rust's borrow checker makes that far simpler to express with an owned
/// `String` message than with a `Cow<'a, Value>` threaded through every
/// keyword rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
    pub validator_keyword: String,
    pub path: ViolationPath,
}

impl ValidationError {
    pub(crate) fn new(keyword: &str, path: ViolationPath, message: impl Into<String>) -> Self {
        ValidationError {
            message: message.into(),
            validator_keyword: keyword.to_string(),
            path,
        }
    }

    pub(crate) fn required(path: ViolationPath, property: &str) -> Self {
        ValidationError::new("required", path, format!("{property:?} is a required property"))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A lazily-produced sequence of violations. Built eagerly into a `Vec` by
/// the public entry points (see `src/eval.rs` for why `is_valid` does not
/// pay this cost), but kept boxed so the representation can change without
/// breaking callers.
pub type ErrorIterator<'a> = Box<dyn Iterator<Item = ValidationError> + 'a>;

/// Raised when a schema itself fails to validate against its draft's
/// meta-schema.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Schema is invalid: {0}")]
pub struct SchemaError(pub ValidationError);

/// Raised by the resolver: a `$ref` could not be followed to a value.
#[derive(Debug, thiserror::Error)]
pub enum RefResolutionError {
    #[error("Unresolvable JSON pointer: {pointer} (in {uri})")]
    PointerNotFound { uri: String, pointer: String },
    #[error("No scheme handler registered for {scheme:?} (while resolving {uri})")]
    NoHandler { scheme: String, uri: String },
    #[error("Failed to fetch remote schema {uri}: {source}")]
    Fetch {
        uri: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Invalid URI {uri:?}: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Fetched document at {uri} is not valid JSON: {source}")]
    InvalidJson {
        uri: String,
        #[source]
        source: serde_json::Error,
    },
}

pub use crate::primitive_type::UnknownTypeError;

/// The top-level error raised by [`crate::validate`] and by
/// [`crate::Validator::compile`].
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    RefResolution(#[from] RefResolutionError),
    #[error(transparent)]
    UnknownType(#[from] UnknownTypeError),
}
