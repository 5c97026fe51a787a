//! The keyword-driven evaluation engine (SPEC_FULL.md §4.4).
//!
//! Violations are delivered through a callback rather than a generator —
//! Rust has no native generators — so that `is_valid` can stop walking the
//! schema/instance tree the instant the first violation appears, rather
//! than merely stopping *consumption* of an already-computed sequence
//! (SPEC_FULL.md §9 "Lazy error sequence").
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::keywords::table_for;
use crate::paths::PathSegment;
use crate::resolver::Context;

/// `true` from the sink means "keep going"; `false` means the caller
/// already knows enough and every enclosing call should unwind
/// immediately without doing further work.
pub(crate) type Sink<'a> = dyn FnMut(ValidationError) -> bool + 'a;

/// A single schema keyword's rule: given the keyword's value, the instance,
/// and the full schema object it lives in (for keywords that need sibling
/// access, like `exclusiveMinimum`), report violations to `sink` and return
/// its continue/stop signal unchanged.
pub(crate) type KeywordFn = for<'r> fn(&Context<'r>, &Value, &Value, &Map<String, Value>, &mut Sink) -> bool;

/// Wrap `sink` so that every violation reported through the wrapper has
/// `segment` appended to its path before being forwarded. Path segments are
/// appended as each recursive call returns (innermost first), so the
/// wrapper must be applied *after* recursing, at the point where we already
/// know what led to the sub-schema — which is exactly how every keyword
/// rule in `src/keywords/` uses it.
pub(crate) fn with_segment<'a>(segment: impl Into<PathSegment>, sink: &'a mut Sink) -> impl FnMut(ValidationError) -> bool + 'a {
    let segment = segment.into();
    move |mut error: ValidationError| {
        error.path.push(segment.clone());
        sink(error)
    }
}

/// The core recursive walk: `iter_errors` realized as a callback-driven
/// traversal instead of a lazy iterator (see module docs).
pub(crate) fn eval_schema(ctx: &Context, schema: &Value, instance: &Value, sink: &mut Sink) -> bool {
    match schema {
        Value::Bool(true) => true,
        Value::Bool(false) => sink(ValidationError::new(
            "false_schema",
            crate::paths::ViolationPath::new(),
            format!("{} does not validate against a `false` schema", crate::paths::printable(instance)),
        )),
        Value::Object(obj) => {
            if let Some(Value::String(reference)) = obj.get("$ref") {
                // `$ref` wins: the rest of the schema object's keywords are
                // ignored once a reference is present, matching draft-03/04
                // behavior.
                return crate::keywords::ref_::evaluate(ctx, reference, instance, sink);
            }
            let child_ctx = ctx.enter_id(obj);
            let table = table_for(ctx.draft);
            for (key, value) in obj {
                if let Some(rule) = table.get(key.as_str()) {
                    if !rule(&child_ctx, value, instance, obj, sink) {
                        return false;
                    }
                }
            }
            true
        }
        // A non-object, non-boolean schema is malformed; `check_schema`
        // catches this before instance traversal begins, so at this point
        // in the recursion there is nothing meaningful to enforce.
        _ => true,
    }
}

/// `is_valid`: stop at the first violation without building any message.
pub(crate) fn is_valid(ctx: &Context, schema: &Value, instance: &Value) -> bool {
    let mut valid = true;
    eval_schema(ctx, schema, instance, &mut |_error| {
        valid = false;
        false
    });
    valid
}

/// `iter_errors`/`validate`: collect every violation.
pub(crate) fn collect_errors(ctx: &Context, schema: &Value, instance: &Value) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    eval_schema(ctx, schema, instance, &mut |error| {
        errors.push(error);
        true
    });
    errors
}
