//! `minItems`/`maxItems`/`uniqueItems` (SPEC_FULL.md §4.5).
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::eval::Sink;
use crate::keywords::helpers::all_unique;
use crate::paths::{printable, ViolationPath};
use crate::resolver::Context;

pub(crate) fn min_items(_ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Some(limit), Value::Array(items)) = (keyword_value.as_u64(), instance) else {
        return true;
    };
    if items.len() as u64 >= limit {
        true
    } else {
        sink(ValidationError::new(
            "minItems",
            ViolationPath::new(),
            format!("{} does not have enough items", printable(instance)),
        ))
    }
}

pub(crate) fn max_items(_ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Some(limit), Value::Array(items)) = (keyword_value.as_u64(), instance) else {
        return true;
    };
    if items.len() as u64 <= limit {
        true
    } else {
        sink(ValidationError::new(
            "maxItems",
            ViolationPath::new(),
            format!("{} has too many items", printable(instance)),
        ))
    }
}

pub(crate) fn unique_items(_ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Some(true), Value::Array(items)) = (keyword_value.as_bool(), instance) else {
        return true;
    };
    if all_unique(items) {
        true
    } else {
        sink(ValidationError::new(
            "uniqueItems",
            ViolationPath::new(),
            format!("{} has non-unique elements", printable(instance)),
        ))
    }
}
