//! Object keywords: `properties`, `patternProperties`,
//! `additionalProperties` and `dependencies`.

use tracing::trace;
use vetted_value::{FieldKey, Value};

use super::{ErrorCode, SchemaError, Walker};
use crate::schema::{SchemaNode, invalid_keyword, prefix_regex};
use crate::vocabulary::AdditionalPropertiesMode;

pub(crate) fn properties(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    properties: &Value,
) -> Result<(), SchemaError> {
    let Some(value) = container.field_mut(field) else {
        return Ok(());
    };
    if !matches!(value, Value::Object(_)) {
        return Ok(());
    }
    let Value::Object(properties) = properties else {
        return Err(invalid_keyword(&walker.ctx, "properties", "must be an object"));
    };
    for (name, subschema) in properties {
        walker.walk(value, &FieldKey::Name(name.clone()), subschema)?;
    }
    Ok(())
}

pub(crate) fn pattern_properties(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    patterns: &Value,
) -> Result<(), SchemaError> {
    let Some(value) = container.field_mut(field) else {
        return Ok(());
    };
    if !matches!(value, Value::Object(_)) {
        return Ok(());
    }
    let Value::Object(patterns) = patterns else {
        return Err(invalid_keyword(
            &walker.ctx,
            "patternProperties",
            "must be an object",
        ));
    };
    for (pattern, subschema) in patterns {
        let regex = prefix_regex(pattern)?;
        let matching: Vec<String> = match &*value {
            Value::Object(object) => object
                .keys()
                .filter(|key| regex.is_match(key.as_str()))
                .cloned()
                .collect(),
            _ => Vec::new(),
        };
        for key in matching {
            walker.walk(value, &FieldKey::Name(key), subschema)?;
        }
    }
    Ok(())
}

/// Keys declared neither in `properties` nor by a `patternProperties`
/// pattern are rejected, stripped or validated against a schema.
pub(crate) fn additional_properties(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    schema: &SchemaNode<'_>,
    additional: &Value,
) -> Result<(), SchemaError> {
    let Some(value) = container.field_mut(field) else {
        return Ok(());
    };
    let Value::Object(object) = &*value else {
        return Ok(());
    };
    let forbidden = match additional {
        Value::Bool(true) => return Ok(()),
        Value::Bool(false) => true,
        Value::Object(_) => false,
        _ => {
            return Err(invalid_keyword(
                &walker.ctx,
                "additionalProperties",
                "must be a boolean or an object",
            ));
        }
    };

    let declared = schema.get("properties").and_then(Value::as_object);
    let patterns = match schema.get("patternProperties") {
        Some(Value::Object(patterns)) => patterns
            .keys()
            .map(|pattern| prefix_regex(pattern))
            .collect::<Result<Vec<_>, _>>()?,
        _ => Vec::new(),
    };
    let extra: Vec<String> = object
        .keys()
        .filter(|key| !declared.is_some_and(|declared| declared.contains_key(key.as_str())))
        .filter(|key| !patterns.iter().any(|regex| regex.is_match(key.as_str())))
        .cloned()
        .collect();

    if !forbidden {
        for key in extra {
            walker.walk(value, &FieldKey::Name(key), additional)?;
        }
        return Ok(());
    }
    match walker.vocabulary().additional_properties() {
        AdditionalPropertiesMode::Reject => {
            for key in extra {
                walker
                    .ctx
                    .error(ErrorCode::ForbiddenProperty, Some(Value::String(key)), None);
            }
        }
        AdditionalPropertiesMode::Strip => {
            for key in extra {
                trace!(
                    path = %walker.ctx.current_path(),
                    key = %key,
                    "stripped additional property"
                );
                value.remove_field(&FieldKey::Name(key));
            }
        }
    }
    Ok(())
}

/// Sibling fields that must be present whenever this field is.
pub(crate) fn dependencies(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    dependencies: &Value,
) -> Result<(), SchemaError> {
    if container.field(field).is_none_or(Value::is_null) {
        return Ok(());
    }
    match dependencies {
        Value::String(name) => require_sibling(walker, container, name, None),
        Value::Array(names) => {
            for name in names {
                let name = dependency_name(walker, name)?;
                require_sibling(walker, container, name, None);
            }
        }
        Value::Object(map) => {
            for (trigger, needed) in map {
                if container.get(trigger).is_none() {
                    continue;
                }
                match needed {
                    Value::String(name) => {
                        require_sibling(walker, container, name, Some(trigger.as_str()));
                    }
                    Value::Array(names) => {
                        for name in names {
                            let name = dependency_name(walker, name)?;
                            require_sibling(walker, container, name, Some(trigger.as_str()));
                        }
                    }
                    _ => {
                        return Err(invalid_keyword(
                            &walker.ctx,
                            "dependencies",
                            "mapping values must be a string or a list of strings",
                        ));
                    }
                }
            }
        }
        _ => {
            return Err(invalid_keyword(
                &walker.ctx,
                "dependencies",
                "must be a string, a list of strings or an object",
            ));
        }
    }
    Ok(())
}

fn dependency_name<'a>(walker: &Walker<'_>, name: &'a Value) -> Result<&'a str, SchemaError> {
    name.as_str()
        .ok_or_else(|| invalid_keyword(&walker.ctx, "dependencies", "names must be strings"))
}

/// `dependency(name)` or, for mapping dependencies, `dependency(trigger, name)`.
fn require_sibling(walker: &mut Walker<'_>, container: &Value, name: &str, trigger: Option<&str>) {
    if container.get(name).is_some() {
        return;
    }
    let (detail, supplement) = match trigger {
        Some(trigger) => (Value::from(trigger), Some(Value::from(name))),
        None => (Value::from(name), None),
    };
    walker.ctx.error(ErrorCode::Dependency, Some(detail), supplement);
}
