//! `enum` (SPEC_FULL.md §4.5): membership under [`helpers::equal`].
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::eval::Sink;
use crate::keywords::helpers::equal;
use crate::paths::{printable, ViolationPath};
use crate::resolver::Context;

pub(crate) fn enum_(_ctx: &Context, keyword_value: &Value, instance: &Value, _schema: &Map<String, Value>, sink: &mut Sink) -> bool {
    let Value::Array(variants) = keyword_value else {
        return true;
    };
    if variants.iter().any(|variant| equal(variant, instance)) {
        true
    } else {
        sink(ValidationError::new(
            "enum",
            ViolationPath::new(),
            format!("{} is not one of {}", printable(instance), printable(keyword_value)),
        ))
    }
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
        enum_(&ctx, &keyword_value, &instance, json!({}).as_object().unwrap(), &mut |e| {
            errors.push(e);
            true
        });
        errors
    }

    #[test]
    fn member_passes() {
        assert!(run(json!([1, 2, 3]), json!(2)).is_empty());
    }

    #[test]
    fn non_member_fails() {
        assert_eq!(run(json!([1, 2, 3]), json!(4)).len(), 1);
    }

    #[test]
    fn bool_does_not_match_numeric_member() {
        assert_eq!(run(json!([1]), json!(true)).len(), 1);
    }
}
