//! `ValidationOptions`: the builder realization of `validator_opts` in
//! `validate(instance, schema, validator_class=None, **validator_opts)`
//! (SPEC_FULL.md §4.9, §6).
use std::sync::Arc;

use serde_json::Value;

use crate::error::ValidateError;
use crate::format::FormatChecker;
use crate::primitive_type::TypeRegistry;
use crate::registry::Registry;
use crate::resolver::{RefResolver, SchemeHandler};
use crate::schemas::{draft_from_schema, Draft};
use crate::validator::Validator;

/// Configures a single `compile` call: draft override, extra/overridden
/// types, a format checker (or registrations layered on the draft default),
/// scheme handlers for `$ref` resolution, and the remote-document cache
/// policy.
pub struct ValidationOptions {
    draft: Option<Draft>,
    registry: Registry,
    types: TypeRegistry,
    formats: Option<FormatChecker>,
    format_overrides: Vec<(String, Box<dyn Fn(&str) -> bool + Send + Sync>)>,
    handlers: Vec<(String, Arc<dyn SchemeHandler>)>,
    cache_remote: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            draft: None,
            registry: Registry::default(),
            types: TypeRegistry::new(),
            formats: None,
            format_overrides: Vec::new(),
            handlers: Vec::new(),
            cache_remote: true,
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        ValidationOptions::default()
    }

    /// Force a draft rather than dispatching on the schema's own `$schema`.
    pub fn draft(mut self, draft: Draft) -> Self {
        self.draft = Some(draft);
        self
    }

    /// Register an extra type name (or shadow a built-in one) for the `type`
    /// keyword.
    pub fn with_type<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.types.register(name, predicate);
        self
    }

    /// Replace the draft-default format registry outright.
    pub fn format_checker(mut self, checker: FormatChecker) -> Self {
        self.formats = Some(checker);
        self
    }

    /// Register (or replace) one format predicate on top of the draft
    /// default, without discarding the rest of it.
    pub fn with_format<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.format_overrides.push((name.into(), Box::new(predicate)));
        self
    }

    /// Register a scheme handler for `$ref` resolution, e.g. a caller-owned
    /// in-memory fixture store for tests.
    pub fn with_handler(mut self, scheme: impl Into<String>, handler: Arc<dyn SchemeHandler>) -> Self {
        self.handlers.push((scheme.into(), handler));
        self
    }

    pub fn cache_remote(mut self, cache_remote: bool) -> Self {
        self.cache_remote = cache_remote;
        self
    }

    /// `JSONSchema::compile`-equivalent: resolve the draft, run
    /// `check_schema`, and build a [`Validator`] ready for repeated
    /// `validate`/`is_valid` calls.
    pub fn compile(self, schema: Value) -> Result<Validator, ValidateError> {
        let draft = self
            .draft
            .or_else(|| {
                schema
                    .as_object()
                    .and_then(|obj| obj.get("$schema"))
                    .and_then(Value::as_str)
                    .and_then(|uri| self.registry.by_meta_schema_uri(uri))
            })
            .unwrap_or_else(|| draft_from_schema(&schema));

        let mut formats = self.formats.unwrap_or_else(|| match draft {
            Draft::Draft3 => FormatChecker::draft3(),
            Draft::Draft4 => FormatChecker::draft4(),
        });
        for (name, predicate) in self.format_overrides {
            formats.register(name, predicate);
        }

        let mut resolver = RefResolver::new(self.cache_remote);
        for (scheme, handler) in self.handlers {
            resolver.register_handler(scheme, handler);
        }

        Validator::from_parts(Arc::new(schema), draft, resolver, formats, self.types)
    }
}
