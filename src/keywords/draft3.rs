//! Draft-03-only keyword rules (SPEC_FULL.md §4.6): `type`, `properties`
//! (with subschema `required: true`), `disallow`, `extends`.
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::eval::{eval_schema, is_valid, with_segment, Sink};
use crate::paths::{printable, ViolationPath};
use crate::resolver::Context;

fn matches_branch(ctx: &Context, branch: &Value, instance: &Value) -> bool {
    match branch {
        Value::String(name) if name == "any" => true,
        Value::String(name) => ctx.types.is_type(instance, name).unwrap_or(false),
        schema @ Value::Object(_) => is_valid(ctx, schema, instance),
        _ => false,
    }
}

/// Success iff at least one union branch matches, expressed directly as
/// `.any()` rather than the classic "for ... else" shape that the keyword
/// wording naturally suggests (SPEC_FULL.md §4.6, §9).
pub(crate) fn type_(ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let branches: Vec<&Value> = match keyword_value {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };
    if branches.iter().any(|branch| matches_branch(ctx, branch, instance)) {
        true
    } else {
        sink(ValidationError::new(
            "type",
            ViolationPath::new(),
            format!("{} is not of type {}", printable(instance), printable(keyword_value)),
        ))
    }
}

/// `disallow`: the inverse of `type`'s string form.
pub(crate) fn disallow(ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let branches: Vec<&Value> = match keyword_value {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };
    match branches.iter().find(|branch| matches_branch(ctx, branch, instance)) {
        None => true,
        Some(branch) => sink(ValidationError::new(
            "disallow",
            ViolationPath::new(),
            format!("{} is disallowed for type {}", printable(instance), printable(branch)),
        )),
    }
}

/// `properties`: presence enforcement is draft-03's own job (moved to the
/// top-level `required` in draft-04), expressed per subschema via
/// `required: true`.
pub(crate) fn properties(ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Value::Object(declared), Value::Object(actual)) = (keyword_value, instance) else {
        return true;
    };
    for (name, subschema) in declared {
        match actual.get(name) {
            Some(value) => {
                if !eval_schema(ctx, subschema, value, &mut with_segment(name.as_str(), sink)) {
                    return false;
                }
            }
            None => {
                let required = subschema.as_object().and_then(|o| o.get("required")).and_then(Value::as_bool).unwrap_or(false);
                if required && !with_segment(name.as_str(), sink)(ValidationError::required(ViolationPath::new(), name)) {
                    return false;
                }
            }
        }
    }
    true
}

/// `extends`: a schema or array of schemas, every one of which the instance
/// must also satisfy.
pub(crate) fn extends(ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let schemas: Vec<&Value> = match keyword_value {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };
    schemas.into_iter().all(|schema| eval_schema(ctx, schema, instance, sink))
}
