use pretty_assertions::assert_eq;
use serde_json::json;
use vetted::{Error, ErrorCode, SchemaError, Validator, ValidatorOptions, Value};

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn check(schema: serde_json::Value, data: serde_json::Value) -> Result<Value, Error> {
    Validator::new().validate(v(data), &v(schema))
}

fn codes(result: Result<Value, Error>) -> Vec<(ErrorCode, String)> {
    match result {
        Err(Error::Validation(e)) => e
            .errors
            .iter()
            .map(|record| (record.code, record.path.to_string()))
            .collect(),
        other => panic!("expected validation errors, got {other:?}"),
    }
}

fn schema_error(result: Result<Value, Error>) -> SchemaError {
    match result {
        Err(Error::Schema(e)) => e,
        other => panic!("expected a schema error, got {other:?}"),
    }
}

fn at(code: ErrorCode, path: &str) -> (ErrorCode, String) {
    (code, path.to_string())
}

// =============================================================================
// required / default / blank
// =============================================================================

#[test]
fn test_required_by_default_policy() {
    let schema = v(json!({"properties": {"a": {"type": "string"}}}));

    let strict = Validator::new();
    assert_eq!(
        codes(strict.validate(v(json!({})), &schema)),
        vec![at(ErrorCode::MissingRequired, "a")]
    );

    let lenient =
        Validator::new().with_options(ValidatorOptions::default().required_by_default(false));
    assert_eq!(lenient.validate(v(json!({})), &schema), Ok(v(json!({}))));
}

#[test]
fn test_explicit_required_overrides_policy() {
    let schema = v(json!({"properties": {
        "a": {"required": false},
        "b": {"required": true}
    }}));
    let lenient =
        Validator::new().with_options(ValidatorOptions::default().required_by_default(false));
    assert_eq!(
        codes(lenient.validate(v(json!({})), &schema)),
        vec![at(ErrorCode::MissingRequired, "b")]
    );
}

#[test]
fn test_null_is_present() {
    let result = check(json!({"properties": {"a": {}}}), json!({"a": null}));
    assert_eq!(result, Ok(v(json!({"a": null}))));
}

#[test]
fn test_defaults_are_injected_but_schema_untouched() {
    let schema = v(json!({"properties": {
        "role": {"type": "string", "default": "guest"},
        "limits": {"type": "object", "default": {"max": 3}}
    }}));
    let before = schema.clone();

    let result = Validator::new().validate(v(json!({})), &schema);
    assert_eq!(
        result,
        Ok(v(json!({"role": "guest", "limits": {"max": 3}})))
    );
    assert_eq!(schema, before);
}

#[test]
fn test_ignore_required_still_injects_defaults() {
    let schema = v(json!({"properties": {
        "a": {"default": 1, "required": true},
        "b": {"required": true}
    }}));
    let validator =
        Validator::new().with_options(ValidatorOptions::default().ignore_required(true));
    assert_eq!(validator.validate(v(json!({})), &schema), Ok(v(json!({"a": 1}))));
}

#[test]
fn test_blank_policies() {
    let schema = v(json!({"type": "string"}));
    assert_eq!(
        codes(Validator::new().validate(v(json!("")), &schema)),
        vec![at(ErrorCode::Blank, "(root)")]
    );

    let lenient =
        Validator::new().with_options(ValidatorOptions::default().blank_by_default(true));
    assert!(lenient.validate(v(json!("")), &schema).is_ok());

    assert!(check(json!({"type": "string", "blank": true}), json!("")).is_ok());
    assert!(
        lenient
            .validate(v(json!("")), &v(json!({"blank": false})))
            .is_err()
    );
}

// =============================================================================
// type
// =============================================================================

#[test]
fn test_primitive_types() {
    assert!(check(json!({"type": "integer"}), json!(3)).is_ok());
    assert!(check(json!({"type": "integer"}), json!(true)).is_err());
    assert!(check(json!({"type": "number"}), json!(3)).is_ok());
    assert!(check(json!({"type": "number"}), json!(false)).is_err());
    assert!(check(json!({"type": "null"}), json!(null)).is_ok());
    assert!(check(json!({"type": "any"}), json!([1])).is_ok());
    assert!(check(json!({"type": "array"}), json!({})).is_err());
}

#[test]
fn test_incorrect_type_carries_expected_and_actual() {
    let err = check(json!({"type": "boolean"}), json!("yes")).unwrap_err();
    let record = &err.as_validation().unwrap().errors()[0];
    assert_eq!(record.code, ErrorCode::IncorrectType);
    assert_eq!(record.detail, Some(Value::from("boolean")));
    assert_eq!(record.supplement, Some(Value::from("yes")));
}

#[test]
fn test_falsy_type_is_skipped() {
    assert!(check(json!({"type": ""}), json!(1)).is_ok());
    assert!(check(json!({"type": []}), json!(1)).is_ok());
}

#[test]
fn test_nested_schema_as_type_reports_inner_errors() {
    let schema = json!({"properties": {"point": {"type": {
        "type": "object",
        "properties": {"x": {"type": "integer"}, "y": {"type": "integer"}}
    }}}});
    assert_eq!(
        codes(check(schema, json!({"point": {"x": "1"}}))),
        vec![
            at(ErrorCode::IncorrectType, "point.x"),
            at(ErrorCode::MissingRequired, "point.y"),
        ]
    );
}

#[test]
fn test_type_is_not_checked_on_absent_fields() {
    let schema = json!({"properties": {"a": {"type": "integer", "required": false}}});
    assert!(check(schema, json!({})).is_ok());
}

// =============================================================================
// properties / patternProperties / additionalProperties / dependencies
// =============================================================================

#[test]
fn test_properties_ignore_non_objects() {
    assert!(check(json!({"properties": {"a": {}}}), json!([1, 2])).is_ok());
}

#[test]
fn test_every_matching_pattern_applies() {
    let schema = json!({"patternProperties": {
        "a": {"type": "string"},
        "ab": {"minLength": 3}
    }});
    assert_eq!(
        codes(check(schema, json!({"abc": "ab", "b": 1}))),
        vec![at(ErrorCode::TooShort, "abc")]
    );
}

#[test]
fn test_additional_properties_schema() {
    let schema = json!({
        "properties": {"id": {}},
        "additionalProperties": {"type": "integer"}
    });
    assert_eq!(
        codes(check(schema, json!({"id": "x", "a": 1, "b": "two"}))),
        vec![at(ErrorCode::IncorrectType, "b")]
    );
}

#[test]
fn test_additional_properties_true_is_permissive() {
    let schema = json!({"properties": {}, "additionalProperties": true});
    assert!(check(schema, json!({"anything": 1})).is_ok());
}

#[test]
fn test_dependency_list() {
    let schema = json!({"properties": {
        "card": {"required": false, "dependencies": ["billing", "cvv"]},
        "billing": {"required": false},
        "cvv": {"required": false}
    }});
    let err = check(schema, json!({"card": "4111"})).unwrap_err();
    let details: Vec<_> = err
        .as_validation()
        .unwrap()
        .errors()
        .iter()
        .map(|record| (record.code, record.path.to_string(), record.detail.clone()))
        .collect();
    assert_eq!(
        details,
        vec![
            (ErrorCode::Dependency, "card".to_string(), Some(Value::from("billing"))),
            (ErrorCode::Dependency, "card".to_string(), Some(Value::from("cvv"))),
        ]
    );
}

#[test]
fn test_dependency_mapping() {
    let schema = json!({"properties": {
        "a": {"required": false, "dependencies": {"x": "y", "p": ["q"]}}
    }});
    let err = check(schema, json!({"a": 1, "x": 1})).unwrap_err();
    let record = &err.as_validation().unwrap().errors()[0];
    assert_eq!(err.as_validation().unwrap().errors().len(), 1);
    assert_eq!(record.code, ErrorCode::Dependency);
    assert_eq!(record.detail, Some(Value::from("x")));
    assert_eq!(record.supplement, Some(Value::from("y")));
}

#[test]
fn test_dependencies_skip_absent_and_null() {
    let schema = json!({"properties": {"a": {"required": false, "dependencies": "b"}}});
    assert!(check(schema.clone(), json!({})).is_ok());
    assert!(check(schema, json!({"a": null})).is_ok());
}

// =============================================================================
// items / additionalItems
// =============================================================================

#[test]
fn test_single_items_schema_checks_every_element() {
    assert_eq!(
        codes(check(json!({"items": {"type": "integer"}}), json!([1, "a", 3, "b"]))),
        vec![
            at(ErrorCode::IncorrectType, "[1]"),
            at(ErrorCode::IncorrectType, "[3]"),
        ]
    );
}

#[test]
fn test_positional_length_mismatch() {
    assert_eq!(
        codes(check(json!({"items": [{}, {}]}), json!([1]))),
        vec![at(ErrorCode::IncorrectListLength, "(root)")]
    );
}

#[test]
fn test_positional_items_check_each_position() {
    let schema = json!({"items": [{"type": "integer"}, {"type": "string"}]});
    assert_eq!(
        codes(check(schema, json!(["a", 1]))),
        vec![
            at(ErrorCode::IncorrectType, "[0]"),
            at(ErrorCode::IncorrectType, "[1]"),
        ]
    );
}

#[test]
fn test_additional_items_false() {
    let schema = json!({"items": [{"type": "integer"}], "additionalItems": false});
    let err = check(schema, json!([1, 2])).unwrap_err();
    let errors = err.as_validation().unwrap().errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::IncorrectListLength);
    assert_eq!(errors[0].detail, Some(Value::from(1)));
    assert_eq!(errors[0].supplement, Some(Value::from(2)));
}

#[test]
fn test_additional_items_schema() {
    let schema = json!({
        "items": [{"type": "integer"}],
        "additionalItems": {"type": "string"}
    });
    assert!(check(schema.clone(), json!([1, "a", "b"])).is_ok());
    assert_eq!(
        codes(check(schema, json!([1, "a", 2]))),
        vec![at(ErrorCode::IncorrectType, "[2]")]
    );
}

// =============================================================================
// Scalars
// =============================================================================

#[test]
fn test_bounds_ignore_non_numbers() {
    assert!(check(json!({"minimum": 3}), json!("abc")).is_ok());
    assert!(check(json!({"maximum": 3}), json!(true)).is_ok());
}

#[test]
fn test_length_bounds() {
    assert_eq!(
        codes(check(json!({"minLength": 2}), json!("a"))),
        vec![at(ErrorCode::TooShort, "(root)")]
    );
    assert_eq!(
        codes(check(json!({"maxItems": 2}), json!([1, 2, 3]))),
        vec![at(ErrorCode::TooLong, "(root)")]
    );
    assert!(check(json!({"minItems": 1, "maxLength": 1}), json!([1])).is_ok());
    assert!(check(json!({"minLength": 5}), json!(12)).is_ok());
}

#[test]
fn test_pattern_is_a_prefix_match() {
    assert!(check(json!({"pattern": "[a-z]+"}), json!("abc123")).is_ok());

    let err = check(json!({"pattern": "[a-z]+"}), json!("1abc")).unwrap_err();
    let record = &err.as_validation().unwrap().errors()[0];
    assert_eq!(record.code, ErrorCode::PatternMismatch);
    assert_eq!(record.detail, Some(Value::from("[a-z]+")));
    assert_eq!(record.supplement, Some(Value::from("1abc")));
}

#[test]
fn test_enum_containers() {
    assert!(check(json!({"enum": [1, 2]}), json!(2.0)).is_ok());
    assert!(check(json!({"enum": [1, 2]}), json!(null)).is_ok());
    assert!(check(json!({"enum": {"on": 1, "off": 0}}), json!("on")).is_ok());
    assert!(check(json!({"enum": "abcdef"}), json!("cde")).is_ok());
    assert_eq!(
        codes(check(json!({"enum": ["x"]}), json!("y"))),
        vec![at(ErrorCode::NotInEnumeration, "(root)")]
    );
}

#[test]
fn test_divisible_by() {
    assert!(check(json!({"divisibleBy": 5}), json!(10)).is_ok());
    assert!(check(json!({"divisibleBy": 2.5}), json!(7.5)).is_ok());
    assert!(check(json!({"divisibleBy": 2}), json!("7")).is_ok());
    assert_eq!(
        codes(check(json!({"divisibleBy": 2}), json!(7))),
        vec![at(ErrorCode::NotDivisibleBy, "(root)")]
    );
}

#[test]
fn test_format_dispatch() {
    assert_eq!(
        codes(check(json!({"format": "date"}), json!("2024-13-01"))),
        vec![at(ErrorCode::InvalidFormat, "(root)")]
    );
    assert!(check(json!({"format": "date"}), json!("2024-12-01")).is_ok());
    assert!(check(json!({"format": "colour"}), json!("teal")).is_ok());
    assert!(check(json!({"type": "integer", "format": "utc-millisec"}), json!(0)).is_ok());
}

// =============================================================================
// extends / disallow
// =============================================================================

#[test]
fn test_extends_adds_a_second_type() {
    let schema = json!({
        "type": "object",
        "extends": {"properties": {"a": {"type": "integer"}}}
    });
    assert_eq!(
        codes(check(schema, json!({"a": "x"}))),
        vec![at(ErrorCode::IncorrectType, "a")]
    );
}

#[test]
fn test_disallow() {
    let err = check(json!({"disallow": "string"}), json!("x")).unwrap_err();
    let record = &err.as_validation().unwrap().errors()[0];
    assert_eq!(record.code, ErrorCode::DisallowedType);
    assert_eq!(record.detail, Some(Value::from("string")));

    assert!(check(json!({"disallow": "string"}), json!(1)).is_ok());
    assert!(check(json!({"disallow": ["string", "null"]}), json!(1)).is_ok());
    assert!(check(json!({"disallow": ["string", "null"]}), json!(null)).is_err());
}

#[test]
fn test_disallow_ignores_absent_fields() {
    let schema = json!({"properties": {"a": {"required": false, "disallow": "any"}}});
    assert!(check(schema, json!({})).is_ok());
}

// =============================================================================
// Schema errors
// =============================================================================

#[test]
fn test_null_schema_has_no_constraints() {
    assert_eq!(
        Validator::new().validate(v(json!([1])), &Value::Null),
        Ok(v(json!([1])))
    );
}

#[test]
fn test_non_object_schema_node() {
    assert!(matches!(
        schema_error(check(json!(3), json!(1))),
        SchemaError::InvalidSchemaNode { .. }
    ));
    assert!(matches!(
        schema_error(check(json!({"properties": {"a": "string"}}), json!({"a": 1}))),
        SchemaError::InvalidSchemaNode { .. }
    ));
}

#[test]
fn test_unsupported_type() {
    assert_eq!(
        schema_error(check(json!({"type": "colour"}), json!(1))),
        SchemaError::UnsupportedType {
            name: "colour".to_string()
        }
    );
    assert!(matches!(
        schema_error(check(json!({"type": 5}), json!(1))),
        SchemaError::UnsupportedType { .. }
    ));
}

#[test]
fn test_legacy_keywords() {
    assert_eq!(
        schema_error(check(json!({"optional": true}), json!(1))),
        SchemaError::LegacyKeyword {
            keyword: "optional",
            replacement: "required"
        }
    );
    assert_eq!(
        schema_error(check(json!({"requires": "a"}), json!(1))),
        SchemaError::LegacyKeyword {
            keyword: "requires",
            replacement: "dependencies"
        }
    );
}

#[test]
fn test_malformed_keyword_values() {
    assert!(matches!(
        schema_error(check(json!({"enum": 5}), json!(1))),
        SchemaError::NonContainerEnum { .. }
    ));
    assert!(matches!(
        schema_error(check(json!({"divisibleBy": 0}), json!("absent or not"))),
        SchemaError::ZeroDivisor { .. }
    ));
    assert!(matches!(
        schema_error(check(json!({"pattern": "("}), json!("x"))),
        SchemaError::InvalidPattern { .. }
    ));
    assert!(matches!(
        schema_error(check(json!({"minLength": -1}), json!("x"))),
        SchemaError::InvalidKeyword { .. }
    ));
    assert!(matches!(
        schema_error(check(json!({"additionalProperties": 1}), json!({}))),
        SchemaError::InvalidKeyword { .. }
    ));
    assert!(matches!(
        schema_error(check(json!({"title": 1}), json!(1))),
        SchemaError::InvalidKeyword { .. }
    ));
}

#[test]
fn test_schema_error_aborts_even_after_data_errors() {
    let schema = json!({"properties": {
        "a": {"type": "integer"},
        "b": {"type": "colour"}
    }});
    assert!(matches!(
        check(schema, json!({"a": "x", "b": 1})),
        Err(Error::Schema(SchemaError::UnsupportedType { .. }))
    ));
}

#[test]
fn test_schema_error_field_names_the_path() {
    let schema = json!({"properties": {"ratio": {"divisibleBy": 0}}});
    assert_eq!(
        schema_error(check(schema, json!({"ratio": 1}))),
        SchemaError::ZeroDivisor {
            field: "ratio".to_string()
        }
    );
}
