//! `items`/`additionalItems` (SPEC_FULL.md §4.5).
use serde_json::{Map, Value};

use crate::eval::{eval_schema, with_segment, Sink};
use crate::resolver::Context;

pub(crate) fn items(ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let Value::Array(elements) = instance else {
        return true;
    };
    match keyword_value {
        Value::Array(schemas) => elements.iter().zip(schemas.iter()).enumerate().all(|(index, (element, subschema))| {
            eval_schema(ctx, subschema, element, &mut with_segment(index, sink))
        }),
        schema => elements
            .iter()
            .enumerate()
            .all(|(index, element)| eval_schema(ctx, schema, element, &mut with_segment(index, sink))),
    }
}

/// Applies only when `items` is an array (or absent); slices by the
/// *declared* `items` length, not the instance's own length (SPEC_FULL.md
/// §4.5, §9 "additionalItems slice bug").
pub(crate) fn additional_items(ctx: &Context, keyword_value: &Value, instance: &Value, schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let Value::Array(elements) = instance else {
        return true;
    };
    let declared = match schema.get("items") {
        Some(Value::Array(items)) => items.len(),
        Some(_) => return true,
        None => 0,
    };
    if declared >= elements.len() {
        return true;
    }
    let extra = &elements[declared..];
    match keyword_value {
        Value::Bool(false) => sink(crate::error::ValidationError::new(
            "additionalItems",
            crate::paths::ViolationPath::new(),
            format!("Additional items are not allowed ({} extra item(s))", extra.len()),
        )),
        Value::Bool(true) | Value::Null => true,
        subschema => extra
            .iter()
            .enumerate()
            .all(|(offset, element)| eval_schema(ctx, subschema, element, &mut with_segment(declared + offset, sink))),
    }
}
