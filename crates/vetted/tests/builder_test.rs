use pretty_assertions::assert_eq;
use serde_json::json;
use vetted::builder::{
    ArraySchema, BooleanSchema, DatetimeSchema, NumberSchema, ObjectSchema, SchemaBuilder,
    StringSchema, any, either,
};
use vetted::{Error, ErrorCode, Validator, Value};

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn codes(result: Result<Value, Error>) -> Vec<ErrorCode> {
    match result {
        Err(Error::Validation(e)) => e.codes(),
        other => panic!("expected validation errors, got {other:?}"),
    }
}

fn account() -> ObjectSchema {
    ObjectSchema::strict()
        .property("login", StringSchema::new().pattern("[a-z]").required())
        .property("age", NumberSchema::integer().minimum(13))
        .property("admin", BooleanSchema::new().default(false))
        .property(
            "tags",
            ArraySchema::of(StringSchema::new().max_length(8)).unique_items(true),
        )
}

#[test]
fn test_fields_are_optional_unless_required() {
    assert_eq!(
        account().validate(v(json!({"login": "ada"}))),
        Ok(v(json!({"login": "ada", "admin": false})))
    );
    assert_eq!(
        codes(account().validate(v(json!({"age": 30})))),
        vec![ErrorCode::MissingRequired]
    );
}

#[test]
fn test_built_schema_works_with_any_validator() {
    let schema = account().build();
    assert_eq!(
        codes(Validator::new().validate(v(json!({"login": "ada"})), &schema)),
        vec![ErrorCode::MissingRequired, ErrorCode::MissingRequired]
    );
}

#[test]
fn test_strict_object_rejects_and_coerce_strips() {
    let data = v(json!({"login": "ada", "age": "40", "shell": "zsh"}));

    assert_eq!(
        codes(account().validate(data.clone())),
        vec![ErrorCode::IncorrectType, ErrorCode::ForbiddenProperty]
    );
    assert_eq!(
        account().coerce(data),
        Ok(v(json!({"login": "ada", "age": 40, "admin": false})))
    );
}

#[test]
fn test_nested_violations() {
    let data = v(json!({"login": "ada", "age": 9, "tags": ["a", "a", "much-too-long"]}));
    let err = account().validate(data).unwrap_err();
    let found: Vec<_> = err
        .as_validation()
        .unwrap()
        .errors()
        .iter()
        .map(|record| (record.code, record.path.to_string()))
        .collect();
    assert_eq!(
        found,
        vec![
            (ErrorCode::LessThanMinimum, "age".to_string()),
            (ErrorCode::TooLong, "tags[2]".to_string()),
            (ErrorCode::NotUnique, "tags".to_string()),
        ]
    );
}

#[test]
fn test_nullable() {
    let schema = ObjectSchema::new().property("nick", StringSchema::new().min_length(2).nullable());
    assert!(schema.validate(v(json!({"nick": null}))).is_ok());
    assert!(schema.validate(v(json!({"nick": "al"}))).is_ok());
    assert_eq!(
        codes(schema.validate(v(json!({"nick": "a"})))),
        vec![ErrorCode::IncorrectType]
    );
}

#[test]
fn test_either_and_any() {
    let schema = ObjectSchema::new()
        .property("id", either(["integer", "string"]))
        .property("extra", any());
    assert!(schema.validate(v(json!({"id": 1, "extra": [1]}))).is_ok());
    assert!(schema.validate(v(json!({"id": "x"}))).is_ok());
    assert!(schema.validate(v(json!({"id": 1.5}))).is_err());
}

#[test]
fn test_datetime_and_property_counts_use_extended_vocabulary() {
    let schema = ObjectSchema::new()
        .property("at", DatetimeSchema::new())
        .min_properties(1);
    assert_eq!(
        codes(schema.validate(v(json!({})))),
        vec![ErrorCode::NotEnoughProperties]
    );

    let coerced = schema.coerce(v(json!({"at": "2024-02-03"}))).unwrap();
    assert!(matches!(coerced.get("at"), Some(Value::DateTime(_))));
}

#[test]
fn test_require_either() {
    let schema = ObjectSchema::new().property(
        "contact",
        ObjectSchema::new()
            .property("email", StringSchema::new())
            .property("phone", StringSchema::new())
            .require_either(["email", "phone"]),
    );
    assert!(schema.validate(v(json!({"contact": {"email": "a@b"}}))).is_ok());
    assert_eq!(
        codes(schema.validate(v(json!({"contact": {}})))),
        vec![ErrorCode::NoneOfRequired]
    );
}

#[test]
fn test_string_enum_and_format() {
    let schema = ObjectSchema::new()
        .property("colour", StringSchema::new().one_of(["red", "green"]))
        .property("born", StringSchema::new().format("date").allow_blank());

    assert!(schema.validate(v(json!({"colour": "red", "born": ""}))).is_ok());
    assert_eq!(
        codes(schema.validate(v(json!({"colour": "blue", "born": "yesterday"})))),
        vec![ErrorCode::NotInEnumeration, ErrorCode::InvalidFormat]
    );
}
