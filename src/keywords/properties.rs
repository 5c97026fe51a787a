//! `patternProperties`/`additionalProperties` (SPEC_FULL.md §4.5).
use std::collections::HashSet;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::eval::{eval_schema, with_segment, Sink};
use crate::paths::ViolationPath;
use crate::resolver::Context;

pub(crate) fn pattern_properties(ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Value::Object(patterns), Value::Object(properties)) = (keyword_value, instance) else {
        return true;
    };
    for (pattern, subschema) in patterns {
        let Ok(regex) = Regex::new(pattern) else {
            continue;
        };
        for (key, value) in properties {
            if regex.is_match(key) && !eval_schema(ctx, subschema, value, &mut with_segment(key.as_str(), sink)) {
                return false;
            }
        }
    }
    true
}

/// Property names covered by a declared `patternProperties` pattern are
/// exempt from `additionalProperties`, even though the pattern itself is
/// unanchored (matches anywhere in the key).
fn names_covered_by_patterns(schema: &Map<String, Value>) -> Vec<Regex> {
    match schema.get("patternProperties") {
        Some(Value::Object(patterns)) => patterns.keys().filter_map(|p| Regex::new(p).ok()).collect(),
        _ => Vec::new(),
    }
}

pub(crate) fn additional_properties(ctx: &Context, keyword_value: &Value, instance: &Value, schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let Value::Object(properties) = instance else {
        return true;
    };
    let declared: HashSet<&str> = match schema.get("properties") {
        Some(Value::Object(declared)) => declared.keys().map(String::as_str).collect(),
        _ => HashSet::new(),
    };
    let patterns = names_covered_by_patterns(schema);
    let extras: Vec<&String> = properties
        .keys()
        .filter(|key| !declared.contains(key.as_str()) && !patterns.iter().any(|re| re.is_match(key)))
        .collect();
    if extras.is_empty() {
        return true;
    }
    match keyword_value {
        Value::Bool(false) => {
            let names: Vec<&str> = extras.iter().map(|k| k.as_str()).collect();
            sink(ValidationError::new(
                "additionalProperties",
                ViolationPath::new(),
                format!("Additional properties are not allowed ({} was unexpected)", names.join(", ")),
            ))
        }
        Value::Bool(true) | Value::Null => true,
        subschema => extras
            .into_iter()
            .all(|key| eval_schema(ctx, subschema, &properties[key], &mut with_segment(key.as_str(), sink))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(rule: crate::eval::KeywordFn, keyword_value: Value, instance: Value, schema: Value) -> Vec<ValidationError> {
        let resolver = crate::resolver::RefResolver::new(true);
        let fatal = std::cell::RefCell::new(None);
        let formats = crate::format::FormatChecker::draft4();
        let types = crate::primitive_type::TypeRegistry::new();
        let ctx = crate::resolver::Context::root(&resolver, crate::schemas::Draft::Draft4, std::sync::Arc::new(Value::Null), &fatal, &formats, &types);
        let mut errors = Vec::new();
        rule(&ctx, &keyword_value, &instance, schema.as_object().unwrap(), &mut |e| {
            errors.push(e);
            true
        });
        errors
    }

    #[test]
    fn pattern_properties_matches_unanchored() {
        let errs = run(
            pattern_properties,
            json!({"^S_": {"type": "string"}}),
            json!({"S_x": 1}),
            json!({}),
        );
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn additional_properties_false_rejects_extras() {
        let schema = json!({"properties": {"a": {}}});
        let errs = run(additional_properties, json!(false), json!({"a": 1, "b": 2}), schema);
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn additional_properties_exempts_pattern_matches() {
        let schema = json!({"properties": {}, "patternProperties": {"^x": {}}});
        let errs = run(additional_properties, json!(false), json!({"xyz": 1}), schema);
        assert!(errs.is_empty());
    }

    #[test]
    fn additional_properties_schema_form_recurses() {
        let schema = json!({"properties": {}});
        let errs = run(additional_properties, json!({"type": "integer"}), json!({"extra": "nope"}), schema);
        assert_eq!(errs.len(), 1);
    }
}
