//! Draft-04-only keyword rules (SPEC_FULL.md §4.7): `type`, `properties`,
//! `required`, `minProperties`/`maxProperties`, `allOf`/`anyOf`/`oneOf`/`not`.
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::eval::{eval_schema, is_valid, with_segment, Sink};
use crate::paths::{printable, ViolationPath};
use crate::resolver::Context;

pub(crate) fn type_(ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let names: Vec<&str> = match keyword_value {
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        Value::String(name) => vec![name.as_str()],
        _ => return true,
    };
    if names.iter().any(|name| ctx.types.is_type(instance, name).unwrap_or(false)) {
        true
    } else {
        sink(ValidationError::new(
            "type",
            ViolationPath::new(),
            format!("{} is not of type {}", printable(instance), printable(keyword_value)),
        ))
    }
}

/// No presence enforcement here; that is `required`'s job in draft-04.
pub(crate) fn properties(ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Value::Object(declared), Value::Object(actual)) = (keyword_value, instance) else {
        return true;
    };
    for (name, subschema) in declared {
        if let Some(value) = actual.get(name) {
            if !eval_schema(ctx, subschema, value, &mut with_segment(name.as_str(), sink)) {
                return false;
            }
        }
    }
    true
}

pub(crate) fn required(_ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Value::Array(names), Value::Object(actual)) = (keyword_value, instance) else {
        return true;
    };
    for name in names.iter().filter_map(Value::as_str) {
        if !actual.contains_key(name) && !sink(ValidationError::required(ViolationPath::new(), name)) {
            return false;
        }
    }
    true
}

pub(crate) fn min_properties(_ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Some(limit), Value::Object(actual)) = (keyword_value.as_u64(), instance) else {
        return true;
    };
    if actual.len() as u64 >= limit {
        true
    } else {
        sink(ValidationError::new(
            "minProperties",
            ViolationPath::new(),
            format!("{} does not have enough properties", printable(instance)),
        ))
    }
}

/// The legacy source's `maxProperties` message was "is too short", copy-pasted
/// from `minProperties`; this renders "is too long", the evidently-intended
/// text (SPEC_FULL.md §4.7, §9).
pub(crate) fn max_properties(_ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Some(limit), Value::Object(actual)) = (keyword_value.as_u64(), instance) else {
        return true;
    };
    if actual.len() as u64 <= limit {
        true
    } else {
        sink(ValidationError::new(
            "maxProperties",
            ViolationPath::new(),
            format!("{} has too many properties", printable(instance)),
        ))
    }
}

pub(crate) fn all_of(ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let Value::Array(schemas) = keyword_value else {
        return true;
    };
    schemas.iter().all(|schema| eval_schema(ctx, schema, instance, sink))
}

pub(crate) fn any_of(ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let Value::Array(schemas) = keyword_value else {
        return true;
    };
    if schemas.iter().any(|schema| is_valid(ctx, schema, instance)) {
        true
    } else {
        sink(ValidationError::new(
            "anyOf",
            ViolationPath::new(),
            format!("{} is not valid under any of the given schemas", printable(instance)),
        ))
    }
}

pub(crate) fn one_of(ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let Value::Array(schemas) = keyword_value else {
        return true;
    };
    let matched = schemas.iter().filter(|schema| is_valid(ctx, schema, instance)).count();
    match matched {
        1 => true,
        0 => sink(ValidationError::new(
            "oneOf",
            ViolationPath::new(),
            format!("{} is not valid under any of the given schemas", printable(instance)),
        )),
        n => sink(ValidationError::new(
            "oneOf",
            ViolationPath::new(),
            format!("{} is valid under {n} of the given schemas, expected exactly one", printable(instance)),
        )),
    }
}

pub(crate) fn not(ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    if is_valid(ctx, keyword_value, instance) {
        sink(ValidationError::new(
            "not",
            ViolationPath::new(),
            format!("{} is valid under the given schema, expected it not to be", printable(instance)),
        ))
    } else {
        true
    }
}
