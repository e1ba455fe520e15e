//! Scalar keywords: numeric bounds, length bounds, `pattern`, `enum`,
//! `divisibleBy`, `blank`, `title` and `description`.

use core::cmp::Ordering;

use vetted_value::{FieldKey, Value};

use super::{ErrorCode, SchemaError, Walker};
use crate::schema::{SchemaNode, count_limit, invalid_keyword, prefix_regex};

// =============================================================================
// Numeric bounds
// =============================================================================

#[derive(Clone, Copy)]
enum Bound {
    Minimum,
    Maximum,
}

pub(crate) fn minimum(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    schema: &SchemaNode<'_>,
    minimum: &Value,
) -> Result<(), SchemaError> {
    let exclusive = schema.flag("exclusiveMinimum");
    check_bound(walker, container, field, minimum, exclusive, Bound::Minimum)
}

pub(crate) fn maximum(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    schema: &SchemaNode<'_>,
    maximum: &Value,
) -> Result<(), SchemaError> {
    let exclusive = schema.flag("exclusiveMaximum");
    check_bound(walker, container, field, maximum, exclusive, Bound::Maximum)
}

/// Integers compare exactly; anything involving a float compares as `f64`.
fn compare_numbers(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

fn check_bound(
    walker: &mut Walker<'_>,
    container: &Value,
    field: &FieldKey,
    bound: &Value,
    exclusive: bool,
    side: Bound,
) -> Result<(), SchemaError> {
    let keyword = match side {
        Bound::Minimum => "minimum",
        Bound::Maximum => "maximum",
    };
    if !bound.is_number() {
        return Err(invalid_keyword(&walker.ctx, keyword, "must be a number"));
    }
    let Some(value) = container.field(field).filter(|value| value.is_number()) else {
        return Ok(());
    };
    let Some(ordering) = compare_numbers(value, bound) else {
        return Ok(());
    };
    let (violated, code) = match side {
        Bound::Minimum => (
            ordering == Ordering::Less || (exclusive && ordering == Ordering::Equal),
            ErrorCode::LessThanMinimum,
        ),
        Bound::Maximum => (
            ordering == Ordering::Greater || (exclusive && ordering == Ordering::Equal),
            ErrorCode::MoreThanMaximum,
        ),
    };
    if violated {
        walker
            .ctx
            .error(code, Some(bound.clone()), Some(value.clone()));
    }
    Ok(())
}

// =============================================================================
// Length bounds (minLength/maxLength, minItems/maxItems)
// =============================================================================

/// Characters of a string, elements of an array.
fn measured_length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(elements) => Some(elements.len()),
        _ => None,
    }
}

pub(crate) fn min_length(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    limit: &Value,
) -> Result<(), SchemaError> {
    let limit = count_limit(&walker.ctx, "minLength", limit)?;
    if let Some(length) = container.field(field).and_then(measured_length)
        && length < limit
    {
        walker.ctx.error(
            ErrorCode::TooShort,
            Some(Value::from(limit)),
            Some(Value::from(length)),
        );
    }
    Ok(())
}

pub(crate) fn max_length(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    limit: &Value,
) -> Result<(), SchemaError> {
    let limit = count_limit(&walker.ctx, "maxLength", limit)?;
    if let Some(length) = container.field(field).and_then(measured_length)
        && length > limit
    {
        walker.ctx.error(
            ErrorCode::TooLong,
            Some(Value::from(limit)),
            Some(Value::from(length)),
        );
    }
    Ok(())
}

// =============================================================================
// Text
// =============================================================================

/// Prefix match, like every other pattern keyword.
pub(crate) fn pattern(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    pattern: &Value,
) -> Result<(), SchemaError> {
    let Value::String(pattern) = pattern else {
        return Err(invalid_keyword(&walker.ctx, "pattern", "must be a string"));
    };
    let Some(Value::String(text)) = container.field(field) else {
        return Ok(());
    };
    if !prefix_regex(pattern)?.is_match(text) {
        walker.ctx.error(
            ErrorCode::PatternMismatch,
            Some(Value::from(pattern.as_str())),
            Some(Value::from(text.as_str())),
        );
    }
    Ok(())
}

pub(crate) fn blank(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    blank: &Value,
) -> Result<(), SchemaError> {
    if blank.is_truthy() {
        return Ok(());
    }
    if let Some(Value::String(text)) = container.field(field)
        && text.is_empty()
    {
        walker.ctx.error(ErrorCode::Blank, None, None);
    }
    Ok(())
}

/// `title` and `description` carry no constraint but must be text.
pub(crate) fn metadata_text(
    walker: &mut Walker<'_>,
    _container: &mut Value,
    _field: &FieldKey,
    _schema: &SchemaNode<'_>,
    text: &Value,
) -> Result<(), SchemaError> {
    match text {
        Value::String(_) | Value::Null => Ok(()),
        _ => Err(invalid_keyword(
            &walker.ctx,
            "title/description",
            "must be a string",
        )),
    }
}

// =============================================================================
// Membership and divisibility
// =============================================================================

/// Membership in a list, key of an object, or substring of a string.
pub(crate) fn enumeration(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    options: &Value,
) -> Result<(), SchemaError> {
    let Some(value) = container.field(field).filter(|value| !value.is_null()) else {
        return Ok(());
    };
    let allowed = match options {
        Value::Array(options) => options.iter().any(|option| option.loose_eq(value)),
        Value::Object(options) => value.as_str().is_some_and(|key| options.contains_key(key)),
        Value::String(options) => value.as_str().is_some_and(|text| options.contains(text)),
        _ => {
            return Err(SchemaError::NonContainerEnum {
                field: walker.ctx.current_path().to_string(),
                options: options.clone(),
            });
        }
    };
    if !allowed {
        walker.ctx.error(
            ErrorCode::NotInEnumeration,
            Some(options.clone()),
            Some(value.clone()),
        );
    }
    Ok(())
}

pub(crate) fn divisible_by(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    divisor: &Value,
) -> Result<(), SchemaError> {
    let Some(divisor_f64) = divisor.as_f64() else {
        return Err(invalid_keyword(&walker.ctx, "divisibleBy", "must be a number"));
    };
    if divisor_f64 == 0.0 {
        return Err(SchemaError::ZeroDivisor {
            field: walker.ctx.current_path().to_string(),
        });
    }
    let Some(value) = container.field(field).filter(|value| value.is_number()) else {
        return Ok(());
    };
    let divisible = match (value, divisor) {
        // checked_rem only fails for i64::MIN % -1, which divides evenly
        (Value::Integer(v), Value::Integer(d)) => v.checked_rem(*d).is_none_or(|r| r == 0),
        _ => value.as_f64().is_some_and(|v| v % divisor_f64 == 0.0),
    };
    if !divisible {
        walker.ctx.error(
            ErrorCode::NotDivisibleBy,
            Some(divisor.clone()),
            Some(value.clone()),
        );
    }
    Ok(())
}
