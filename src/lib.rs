//! # jsonschema-legacy
//!
//! A crate for validating JSON documents against JSON Schema draft-03 and
//! draft-04 schemas. Schemas are interpreted directly against each
//! instance rather than compiled into a validation tree; there is no
//! compile-time cost beyond running `check_schema` once.
//!
//! Supports:
//!   - JSON Schema drafts 3 and 4;
//!   - Loading remote documents over `file://` by default, with `http(s)://`
//!     behind the `resolve-http` feature;
//!
//! ## Usage
//! ```rust
//! # use jsonschema_legacy::{ValidateError, Validator};
//! # use serde_json::json;
//! # fn foo() -> Result<(), ValidateError> {
//! let schema = json!({"maxLength": 5});
//! let compiled = Validator::compile(schema)?;
//! # Ok(())
//! # }
//! ```
//! or with custom configuration:
//! ```rust
//! # use jsonschema_legacy::{Draft, ValidateError, Validator};
//! # use serde_json::json;
//! # fn foo() -> Result<(), ValidateError> {
//! let schema = json!({"maxLength": 5});
//! let compiled = Validator::options().draft(Draft::Draft3).compile(schema)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Example
//! ```rust
//! use jsonschema_legacy::{ValidateError, Validator};
//! use serde_json::json;
//!
//! fn main() -> Result<(), ValidateError> {
//!     let schema = json!({"maxLength": 5});
//!     let instance = json!("foo");
//!     let compiled = Validator::compile(schema)?;
//!     match compiled.iter_errors(&instance) {
//!         Ok(errors) => {
//!             for error in errors {
//!                 println!("Validation error: {error}");
//!             }
//!         }
//!         Err(resolution_error) => println!("Could not resolve a $ref: {resolution_error}"),
//!     }
//!     Ok(())
//! }
//! ```
#![warn(
    clippy::cast_possible_truncation,
    clippy::doc_markdown,
    clippy::explicit_iter_loop,
    clippy::map_unwrap_or,
    clippy::needless_borrow,
    clippy::needless_pass_by_value,
    clippy::print_stdout,
    clippy::redundant_closure,
    clippy::trivially_copy_pass_by_ref,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]
#![allow(clippy::upper_case_acronyms)]

pub mod error;
mod error_tree;
mod eval;
mod format;
mod keywords;
pub mod meta_schemas;
pub mod options;
pub mod paths;
pub mod primitive_type;
pub mod registry;
mod resolver;
mod schemas;
mod validator;

pub use error::{ErrorIterator, RefResolutionError, SchemaError, UnknownTypeError, ValidateError, ValidationError};
pub use error_tree::ErrorTree;
pub use format::FormatChecker;
pub use options::ValidationOptions;
pub use paths::{PathSegment, ViolationPath};
pub use primitive_type::{PrimitiveType, TypeRegistry};
pub use registry::Registry;
pub use resolver::SchemeHandler;
pub use schemas::{draft_from_schema, draft_from_url, Draft};
pub use validator::{validate, Validator};


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::tests_util::{assert_errors, assert_invalid, assert_valid};
    use crate::validate;

    #[test]
    fn top_level_free_function_validates() {
        let schema = json!({"minLength": 5});
        assert!(validate(schema.clone(), &json!("foobar")).is_ok());
        assert!(validate(schema, &json!("foo")).is_err());
    }

    #[test]
    fn required_and_type_violations_both_surface() {
        assert_valid(&json!({"type": "integer"}), &json!(3));
        assert_invalid(&json!({"type": "integer"}), &json!("3"));
        assert_errors(
            &json!({"properties": {"x": {"type": "string"}}, "required": ["x"]}),
            &json!({}),
            &["required"],
        );
    }
}
