//! End-to-end coverage through the public API only: the ten concrete
//! scenarios and seven universal laws this crate is expected to satisfy.
use jsonschema_legacy::{validate, Draft, ErrorTree, ValidateError, Validator};
use serde_json::json;

#[test]
fn scenario_1_integer_passes() {
    assert!(validate(json!({"type": "integer"}), &json!(3)).is_ok());
}

#[test]
fn scenario_2_fractional_number_fails_integer() {
    let err = validate(json!({"type": "integer"}), &json!(3.5));
    assert!(matches!(err, Err(ValidateError::Validation(ref e)) if e.validator_keyword == "type"));
}

#[test]
fn scenario_3_boolean_is_not_integer() {
    let err = validate(json!({"type": "integer"}), &json!(true));
    assert!(matches!(err, Err(ValidateError::Validation(ref e)) if e.validator_keyword == "type"));
}

#[test]
fn scenario_4_required_property_has_wrong_type() {
    let schema = json!({"properties": {"x": {"type": "string"}}, "required": ["x"]});
    let err = validate(schema, &json!({"x": 1}));
    match err {
        Err(ValidateError::Validation(e)) => {
            assert_eq!(e.validator_keyword, "type");
            assert_eq!(e.path.to_json_pointer(), "/x");
        }
        other => panic!("expected a type violation, got {other:?}"),
    }
}

#[test]
fn scenario_5_required_property_is_missing() {
    let schema = json!({"properties": {"x": {"type": "string"}}, "required": ["x"]});
    let err = validate(schema, &json!({}));
    assert!(matches!(err, Err(ValidateError::Validation(ref e)) if e.validator_keyword == "required"));
}

#[test]
fn scenario_6_additional_items_rejected() {
    let schema = json!({"items": [{"type": "integer"}], "additionalItems": false});
    let err = validate(schema, &json!([1, 2]));
    assert!(matches!(err, Err(ValidateError::Validation(ref e)) if e.validator_keyword == "additionalItems"));
}

#[test]
fn scenario_7_one_and_true_are_not_duplicates() {
    assert!(validate(json!({"uniqueItems": true}), &json!([1, true])).is_ok());
}

#[test]
fn scenario_8_multiple_of_float_within_tolerance() {
    assert!(validate(json!({"multipleOf": 0.1}), &json!(1.1)).is_ok());
}

#[test]
fn scenario_9_one_of_rejects_double_match() {
    let schema = json!({"oneOf": [{"type": "integer"}, {"minimum": 0}]});
    let err = validate(schema, &json!(3));
    assert!(matches!(err, Err(ValidateError::Validation(ref e)) if e.validator_keyword == "oneOf"));
}

#[test]
fn scenario_10_ref_to_wrong_type_is_invalid() {
    let schema = json!({"$ref": "#/definitions/x", "definitions": {"x": {"type": "integer"}}});
    assert!(validate(schema, &json!("a")).is_err());
}

#[test]
fn law_1_empty_schema_accepts_everything() {
    let validator = Validator::compile(json!({})).expect("compiles");
    for instance in [json!(null), json!(1), json!("s"), json!([1, 2]), json!({"a": 1})] {
        assert!(validator.is_valid(&instance));
    }
}

#[test]
fn law_2_exactly_one_primitive_type_matches() {
    use jsonschema_legacy::{PrimitiveType, TypeRegistry};
    let registry = TypeRegistry::new();
    let cases: &[(serde_json::Value, &[PrimitiveType])] = &[
        (json!(null), &[PrimitiveType::Null]),
        (json!(true), &[PrimitiveType::Boolean]),
        (json!(3), &[PrimitiveType::Integer, PrimitiveType::Number]),
        (json!("s"), &[PrimitiveType::String]),
        (json!([1]), &[PrimitiveType::Array]),
        (json!({}), &[PrimitiveType::Object]),
    ];
    let all = [
        PrimitiveType::Null,
        PrimitiveType::Boolean,
        PrimitiveType::Integer,
        PrimitiveType::Number,
        PrimitiveType::String,
        PrimitiveType::Array,
        PrimitiveType::Object,
    ];
    for (instance, expected_matches) in cases {
        for ty in all {
            let matches = registry.is_type(instance, &ty.to_string()).unwrap();
            assert_eq!(matches, expected_matches.contains(&ty), "{instance} vs {ty}");
        }
    }
}

#[test]
fn law_3_boolean_is_not_number_or_integer() {
    let not_int = Validator::compile(json!({"type": "integer"})).unwrap();
    let not_num = Validator::compile(json!({"type": "number"})).unwrap();
    assert!(!not_int.is_valid(&json!(true)));
    assert!(!not_num.is_valid(&json!(true)));
}

#[test]
fn law_4_error_tree_total_matches_violation_count() {
    let validator = Validator::compile(json!({
        "properties": {"x": {"type": "string"}, "y": {"minimum": 0}},
        "required": ["x", "y", "z"],
    }))
    .unwrap();
    let errors: Vec<_> = validator.iter_errors(&json!({"x": 1, "y": -1})).unwrap().collect();
    let count = errors.len();
    let tree = ErrorTree::new(errors);
    assert_eq!(tree.total_errors(), count);
}

#[test]
fn law_5_pointer_escape_inversion() {
    // Property names containing `~` and `/` must round-trip through the
    // JSON Pointer escaping rules (`~` -> `~0`, `/` -> `~1`).
    let schema = json!({
        "properties": {
            "a/b": {"properties": {"c~d": {"type": "integer"}}},
        },
    });
    let validator = Validator::compile(schema).unwrap();
    let errors: Vec<_> = validator
        .iter_errors(&json!({"a/b": {"c~d": "not an integer"}}))
        .unwrap()
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path.to_json_pointer(), "/a~1b/c~0d");
}

#[test]
fn law_6_resolution_scope_restored_after_failed_ref() {
    // A failed $ref inside one branch must not leak scope into a sibling
    // branch evaluated afterwards.
    let schema = json!({
        "allOf": [
            {"$ref": "#/definitions/missing"},
            {"type": "integer"},
        ],
        "definitions": {},
    });
    let validator = Validator::compile(schema).unwrap();
    assert!(!validator.is_valid(&json!(3)));
}

#[test]
fn law_7_meta_schemas_validate_themselves() {
    for draft in [Draft::Draft3, Draft::Draft4] {
        let meta = match draft {
            Draft::Draft3 => jsonschema_legacy::meta_schemas::draft3(),
            Draft::Draft4 => jsonschema_legacy::meta_schemas::draft4(),
        };
        assert!(Validator::check_schema(&meta).is_ok(), "{draft:?} meta-schema should self-validate");
    }
}
