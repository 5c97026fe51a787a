//! `minimum`/`maximum` (with their `exclusive*` flags) and
//! `multipleOf`/`divisibleBy` (SPEC_FULL.md §4.5).
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::eval::Sink;
use crate::paths::{printable, ViolationPath};
use crate::resolver::Context;
use crate::schemas::Draft;

pub(crate) const FLOAT_TOLERANCE: f64 = 1e-15;

fn as_non_bool_number(instance: &Value) -> Option<f64> {
    if instance.is_boolean() {
        return None;
    }
    instance.as_f64()
}

pub(crate) fn minimum(_ctx: &Context, keyword_value: &Value, instance: &Value, schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Some(limit), Some(value)) = (keyword_value.as_f64(), as_non_bool_number(instance)) else {
        return true;
    };
    let exclusive = schema.get("exclusiveMinimum").and_then(Value::as_bool).unwrap_or(false);
    let ok = if exclusive { value > limit } else { value >= limit };
    if ok {
        true
    } else {
        sink(ValidationError::new(
            "minimum",
            ViolationPath::new(),
            format!("{} is less than{} the minimum of {limit}", printable(instance), if exclusive { " or equal to" } else { "" }),
        ))
    }
}

pub(crate) fn maximum(_ctx: &Context, keyword_value: &Value, instance: &Value, schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Some(limit), Some(value)) = (keyword_value.as_f64(), as_non_bool_number(instance)) else {
        return true;
    };
    let exclusive = schema.get("exclusiveMaximum").and_then(Value::as_bool).unwrap_or(false);
    let ok = if exclusive { value < limit } else { value <= limit };
    if ok {
        true
    } else {
        sink(ValidationError::new(
            "maximum",
            ViolationPath::new(),
            format!("{} is greater than{} the maximum of {limit}", printable(instance), if exclusive { " or equal to" } else { "" }),
        ))
    }
}

/// Shared by draft-03's `divisibleBy` and draft-04's `multipleOf`; which one
/// is reported is taken from `ctx.draft` rather than hard-coded, since both
/// tables wire this same function in under their own keyword's name.
pub(crate) fn multiple_of(ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Some(divisor), Some(value)) = (keyword_value.as_f64(), as_non_bool_number(instance)) else {
        return true;
    };
    if divisor == 0.0 {
        return true;
    }
    let is_integral_divisor = keyword_value.is_i64() || keyword_value.is_u64();
    let ok = if is_integral_divisor {
        value % divisor == 0.0
    } else {
        let remainder = value % divisor;
        remainder.min(divisor - remainder).abs() <= FLOAT_TOLERANCE
    };
    if ok {
        true
    } else {
        let keyword = match ctx.draft {
            Draft::Draft3 => "divisibleBy",
            Draft::Draft4 => "multipleOf",
        };
        sink(ValidationError::new(
            keyword,
            ViolationPath::new(),
            format!("{} is not a multiple of {divisor}", printable(instance)),
        ))
    }
}
