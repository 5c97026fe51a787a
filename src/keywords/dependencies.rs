//! `dependencies` (SPEC_FULL.md §4.5): schema or property-name dependencies.
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::eval::{eval_schema, with_segment, Sink};
use crate::paths::{printable, ViolationPath};
use crate::resolver::Context;

pub(crate) fn dependencies(ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let (Value::Object(deps), Value::Object(properties)) = (keyword_value, instance) else {
        return true;
    };
    for (key, dep) in deps {
        if !properties.contains_key(key) {
            continue;
        }
        if matches!(dep, Value::Object(_) | Value::Bool(_)) {
            if !eval_schema(ctx, dep, instance, sink) {
                return false;
            }
            continue;
        }
        let ok = match dep {
            Value::String(required) => properties.contains_key(required),
            Value::Array(required) => required.iter().filter_map(Value::as_str).all(|name| properties.contains_key(name)),
            _ => true,
        };
        if !ok {
            let missing: Vec<&str> = match dep {
                Value::String(s) => vec![s.as_str()],
                Value::Array(items) => items.iter().filter_map(Value::as_str).filter(|n| !properties.contains_key(*n)).collect(),
                _ => Vec::new(),
            };
            if !with_segment(key.as_str(), sink)(ValidationError::new(
                "dependencies",
                ViolationPath::new(),
                format!("{} requires property {:?} present (via {key:?})", printable(instance), missing.join(", ")),
            )) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(keyword_value: Value, instance: Value) -> Vec<ValidationError> {
        let resolver = crate::resolver::RefResolver::new(true);
        let fatal = std::cell::RefCell::new(None);
        let formats = crate::format::FormatChecker::draft4();
        let types = crate::primitive_type::TypeRegistry::new();
        let ctx = crate::resolver::Context::root(&resolver, crate::schemas::Draft::Draft4, std::sync::Arc::new(Value::Null), &fatal, &formats, &types);
        let mut errors = Vec::new();
        dependencies(&ctx, &keyword_value, &instance, json!({}).as_object().unwrap(), &mut |e| {
            errors.push(e);
            true
        });
        errors
    }

    #[test]
    fn string_dependency_requires_property() {
        let deps = json!({"credit_card": "billing_address"});
        assert_eq!(run(deps.clone(), json!({"credit_card": 1})).len(), 1);
        assert!(run(deps, json!({"credit_card": 1, "billing_address": "x"})).is_empty());
    }

    #[test]
    fn array_dependency_requires_every_name() {
        let deps = json!({"a": ["b", "c"]});
        assert_eq!(run(deps.clone(), json!({"a": 1, "b": 2})).len(), 1);
        assert!(run(deps, json!({"a": 1, "b": 2, "c": 3})).is_empty());
    }

    #[test]
    fn schema_dependency_recurses_whole_instance() {
        let deps = json!({"a": {"required": ["b"]}});
        assert_eq!(run(deps.clone(), json!({"a": 1})).len(), 1);
        assert!(run(deps, json!({"a": 1, "b": 2})).is_empty());
    }

    #[test]
    fn absent_key_is_a_noop() {
        assert!(run(json!({"a": "b"}), json!({})).is_empty());
    }

    #[test]
    fn schema_dependency_does_not_short_circuit_later_keys() {
        let deps = json!({"a": {"required": ["b"]}, "z": ["y"]});
        let errs = run(deps, json!({"a": 1, "z": 1}));
        let keywords: Vec<&str> = errs.iter().map(|e| e.validator_keyword.as_str()).collect();
        assert!(keywords.contains(&"required"), "{keywords:?}");
        assert!(keywords.contains(&"dependencies"), "{keywords:?}");
    }
}
