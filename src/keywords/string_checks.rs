//! `minLength`/`maxLength`/`pattern`/`format` (SPEC_FULL.md §4.5).
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::eval::Sink;
use crate::format::FormatChecker;
use crate::paths::{printable, ViolationPath};
use crate::resolver::Context;

/// JSON Schema measures string length in Unicode code points, not UTF-8
/// bytes (a multi-byte character is still one character).
fn char_count(s: &str) -> usize {
    s.chars().count()
}

pub(crate) fn min_length(_ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Some(limit), Value::String(s)) = (keyword_value.as_u64(), instance) else {
        return true;
    };
    if char_count(s) as u64 >= limit {
        true
    } else {
        sink(ValidationError::new(
            "minLength",
            ViolationPath::new(),
            format!("{} is too short", printable(instance)),
        ))
    }
}

pub(crate) fn max_length(_ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Some(limit), Value::String(s)) = (keyword_value.as_u64(), instance) else {
        return true;
    };
    if char_count(s) as u64 <= limit {
        true
    } else {
        sink(ValidationError::new(
            "maxLength",
            ViolationPath::new(),
            format!("{} is too long", printable(instance)),
        ))
    }
}

pub(crate) fn pattern(_ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Some(raw), Value::String(s)) = (keyword_value.as_str(), instance) else {
        return true;
    };
    let Ok(regex) = Regex::new(raw) else {
        return true;
    };
    if regex.is_match(s) {
        true
    } else {
        sink(ValidationError::new(
            "pattern",
            ViolationPath::new(),
            format!("{} does not match {raw:?}", printable(instance)),
        ))
    }
}

/// `format` is consulted through the [`FormatChecker`] threaded on `ctx`,
/// picked once per top-level `validate`/`is_valid` call (SPEC_FULL.md §4.5).
pub(crate) fn format(ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Some(name), Value::String(s)) = (keyword_value.as_str(), instance) else {
        return true;
    };
    if ctx.formats.conforms(s, name) {
        true
    } else {
        sink(ValidationError::new(
            "format",
            ViolationPath::new(),
            format!("{} is not a {name:?}", printable(instance)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(rule: crate::eval::KeywordFn, keyword_value: Value, instance: Value) -> Vec<ValidationError> {
        let resolver = crate::resolver::RefResolver::new(true);
        let fatal = std::cell::RefCell::new(None);
        let formats = crate::format::FormatChecker::draft4();
        let types = crate::primitive_type::TypeRegistry::new();
        let ctx = crate::resolver::Context::root(&resolver, crate::schemas::Draft::Draft4, std::sync::Arc::new(Value::Null), &fatal, &formats, &types);
        let mut errors = Vec::new();
        rule(&ctx, &keyword_value, &instance, json!({}).as_object().unwrap(), &mut |e| {
            errors.push(e);
            true
        });
        errors
    }

    #[test]
    fn min_length_counts_code_points_not_bytes() {
        assert!(run(min_length, json!(1), json!("é")).is_empty());
    }

    #[test]
    fn pattern_is_unanchored_search() {
        assert!(run(pattern, json!("bc"), json!("abcd")).is_empty());
        assert!(!run(pattern, json!("^bc"), json!("abcd")).is_empty());
    }

    #[test]
    fn format_consults_the_threaded_checker() {
        assert!(!run(format, json!("email"), json!("not-an-email")).is_empty());
    }
}
