//! The top-level `ValidatorFactory` realization (SPEC_FULL.md §4.9, §6):
//! [`Validator`], built once per schema and reused across many `validate`/
//! `is_valid` calls, plus the one-shot free function [`validate`].
use std::cell::RefCell;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{ErrorIterator, RefResolutionError, SchemaError, ValidateError, ValidationError};
use crate::eval;
use crate::format::FormatChecker;
use crate::options::ValidationOptions;
use crate::primitive_type::TypeRegistry;
use crate::resolver::{Context, RefResolver};
use crate::schemas::{draft_from_schema, Draft};

fn meta_schema_document(draft: Draft) -> Value {
    match draft {
        Draft::Draft3 => crate::meta_schemas::draft3(),
        Draft::Draft4 => crate::meta_schemas::draft4(),
    }
}

fn check_schema_against_draft(
    schema: &Value,
    draft: Draft,
    resolver: &RefResolver,
    formats: &FormatChecker,
    types: &TypeRegistry,
) -> Result<(), SchemaError> {
    let meta = meta_schema_document(draft);
    let fatal = RefCell::new(None);
    let ctx = Context::root(resolver, draft, Arc::new(meta.clone()), &fatal, formats, types);
    let mut first: Option<ValidationError> = None;
    eval::eval_schema(&ctx, &meta, schema, &mut |error| {
        first = Some(error);
        false
    });
    match first {
        Some(error) => Err(SchemaError(error)),
        None => Ok(()),
    }
}

/// A compiled schema, ready for repeated `validate`/`is_valid` calls
/// against many instances. "Compiled" here means "draft resolved and
/// `check_schema` already run", not a built validator-node tree — schemas
/// are interpreted directly on every call (SPEC_FULL.md §3 "No compiled
/// representation is required").
pub struct Validator {
    schema: Arc<Value>,
    draft: Draft,
    resolver: RefResolver,
    formats: FormatChecker,
    types: TypeRegistry,
}

impl Validator {
    pub(crate) fn from_parts(
        schema: Arc<Value>,
        draft: Draft,
        resolver: RefResolver,
        formats: FormatChecker,
        types: TypeRegistry,
    ) -> Result<Self, ValidateError> {
        check_schema_against_draft(&schema, draft, &resolver, &formats, &types)?;
        Ok(Validator {
            schema,
            draft,
            resolver,
            formats,
            types,
        })
    }

    /// Compile with draft dispatch and every other default from
    /// [`ValidationOptions::default`].
    pub fn compile(schema: Value) -> Result<Self, ValidateError> {
        ValidationOptions::new().compile(schema)
    }

    /// Start a builder for a non-default compilation (draft override,
    /// format/type registration, custom `$ref` scheme handlers, ...).
    pub fn options() -> ValidationOptions {
        ValidationOptions::new()
    }

    /// classmethod-equivalent: validate `schema` against its own draft's
    /// meta-schema without building a full [`Validator`].
    pub fn check_schema(schema: &Value) -> Result<(), SchemaError> {
        let draft = draft_from_schema(schema);
        let resolver = RefResolver::new(true);
        let formats = match draft {
            Draft::Draft3 => FormatChecker::draft3(),
            Draft::Draft4 => FormatChecker::draft4(),
        };
        let types = TypeRegistry::new();
        check_schema_against_draft(schema, draft, &resolver, &formats, &types)
    }

    fn root_ctx<'r>(&'r self, fatal: &'r RefCell<Option<RefResolutionError>>) -> Context<'r> {
        Context::root(&self.resolver, self.draft, Arc::clone(&self.schema), fatal, &self.formats, &self.types)
    }

    /// `is_valid(instance)`: stop at the first violation. A fatal `$ref`
    /// resolution failure also counts as "not valid" here — there is no
    /// sensible `bool` that means "could not determine"; callers that need
    /// to distinguish the two reasons should use [`Validator::validate`].
    pub fn is_valid(&self, instance: &Value) -> bool {
        let fatal = RefCell::new(None);
        let ctx = self.root_ctx(&fatal);
        let ok = eval::is_valid(&ctx, &self.schema, instance);
        ok && fatal.into_inner().is_none()
    }

    /// `iter_errors(instance)`: every violation, collected eagerly (see
    /// `src/eval.rs`) and handed out as a boxed iterator. A fatal `$ref`
    /// resolution failure short-circuits the whole call instead.
    pub fn iter_errors(&self, instance: &Value) -> Result<ErrorIterator<'_>, RefResolutionError> {
        let fatal = RefCell::new(None);
        let ctx = self.root_ctx(&fatal);
        let errors = eval::collect_errors(&ctx, &self.schema, instance);
        match fatal.into_inner() {
            Some(error) => Err(error),
            None => Ok(Box::new(errors.into_iter())),
        }
    }

    /// `validate(instance)`: raise the first violation, if any.
    pub fn validate(&self, instance: &Value) -> Result<(), ValidateError> {
        let mut errors = self.iter_errors(instance)?;
        match errors.next() {
            Some(error) => Err(ValidateError::Validation(error)),
            None => Ok(()),
        }
    }
}

/// The one-shot free function: compile `schema`, then validate `instance`
/// against it.
pub fn validate(schema: Value, instance: &Value) -> Result<(), ValidateError> {
    Validator::compile(schema)?.validate(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compiles_and_validates_simple_schema() {
        let validator = Validator::compile(json!({"type": "integer"})).expect("compiles");
        assert!(validator.validate(&json!(3)).is_ok());
        assert!(validator.validate(&json!("x")).is_err());
    }

    #[test]
    fn check_schema_rejects_malformed_schema() {
        // `properties` must be an object; a string is malformed under both
        // drafts' meta-schemas.
        let err = Validator::check_schema(&json!({"properties": "nope"}));
        assert!(err.is_err());
    }

    #[test]
    fn both_meta_schemas_validate_themselves() {
        assert!(Validator::check_schema(&crate::meta_schemas::draft3()).is_ok());
        assert!(Validator::check_schema(&crate::meta_schemas::draft4()).is_ok());
    }

    #[test]
    fn unresolved_ref_is_fatal_not_a_violation() {
        let validator = Validator::compile(json!({"$ref": "#/definitions/missing"})).expect("compiles");
        assert!(!validator.is_valid(&json!(1)));
        assert!(matches!(validator.validate(&json!(1)), Err(ValidateError::RefResolution(_))));
    }

    #[test]
    fn free_function_validates_in_one_call() {
        assert!(super::validate(json!({"type": "string"}), &json!("hi")).is_ok());
    }
}
