//! Extension vocabulary: the `datetime` type plus `minProperties`,
//! `maxProperties` and `requireEither`.
//!
//! Built only from the public walker API, the same way callers add their own
//! keywords.

use vetted_value::{FieldKey, Value};

use crate::schema::{SchemaNode, count_limit, invalid_keyword};
use crate::validate::{ErrorCode, SchemaError, Walker};
use crate::vocabulary::{Evaluator, TypeChecker};

pub(crate) const EXTENDED_TYPES: &[(&str, TypeChecker)] = &[("datetime", is_datetime)];

pub(crate) const EXTENDED_EVALUATORS: &[(&str, Evaluator)] = &[
    ("minProperties", min_properties),
    ("maxProperties", max_properties),
    ("requireEither", require_either),
];

fn is_datetime(value: &Value) -> bool {
    matches!(value, Value::DateTime(_))
}

fn property_count(container: &Value, field: &FieldKey) -> Option<usize> {
    container
        .field(field)
        .and_then(Value::as_object)
        .map(|object| object.len())
}

fn min_properties(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    limit: &Value,
) -> Result<(), SchemaError> {
    let limit = count_limit(&walker.ctx, "minProperties", limit)?;
    if let Some(count) = property_count(container, field)
        && count < limit
    {
        walker.ctx.error(
            ErrorCode::NotEnoughProperties,
            Some(Value::from(limit)),
            Some(Value::from(count)),
        );
    }
    Ok(())
}

fn max_properties(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    limit: &Value,
) -> Result<(), SchemaError> {
    let limit = count_limit(&walker.ctx, "maxProperties", limit)?;
    if let Some(count) = property_count(container, field)
        && count > limit
    {
        walker.ctx.error(
            ErrorCode::TooManyProperties,
            Some(Value::from(limit)),
            Some(Value::from(count)),
        );
    }
    Ok(())
}

/// At least one of the named fields of this object must be present.
fn require_either(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    candidates: &Value,
) -> Result<(), SchemaError> {
    let Value::Array(names) = candidates else {
        return Err(invalid_keyword(
            &walker.ctx,
            "requireEither",
            "must be a list of field names",
        ));
    };
    let Some(value) = container.field(field) else {
        return Ok(());
    };
    for name in names {
        let Some(name) = name.as_str() else {
            return Err(invalid_keyword(
                &walker.ctx,
                "requireEither",
                "field names must be strings",
            ));
        };
        let candidate = FieldKey::from(name);
        let ((), errors) = walker.speculate(|w| w.check_required(value, &candidate, true));
        if errors.is_empty() {
            return Ok(());
        }
    }
    walker
        .ctx
        .error(ErrorCode::NoneOfRequired, Some(candidates.clone()), None);
    Ok(())
}
