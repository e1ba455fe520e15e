//! Type resolution: primitive keywords, unions and nested schemas.
//!
//! Also hosts `extends` and `disallow`, which are type checks in disguise.

use tracing::trace;
use vetted_value::{FieldKey, Value};

use super::{ErrorCode, SchemaError, Walker};
use crate::schema::SchemaNode;
use crate::vocabulary::TypeChecker;

pub(crate) const STANDARD_TYPES: &[(&str, TypeChecker)] = &[
    ("string", is_string),
    ("integer", is_integer),
    ("number", is_number),
    ("boolean", is_boolean),
    ("object", is_object),
    ("array", is_array),
    ("null", is_null),
    ("any", is_any),
];

fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

fn is_integer(value: &Value) -> bool {
    matches!(value, Value::Integer(_))
}

fn is_number(value: &Value) -> bool {
    value.is_number()
}

fn is_boolean(value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}

fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

fn is_array(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

fn is_null(value: &Value) -> bool {
    value.is_null()
}

fn is_any(_: &Value) -> bool {
    true
}

impl Walker<'_> {
    /// Plain type resolution, without coercion.
    ///
    /// Absent fields and falsy type specs are accepted here; absence is the
    /// business of `required`.
    pub fn resolve_type(
        &mut self,
        container: &mut Value,
        field: &FieldKey,
        type_spec: &Value,
    ) -> Result<(), SchemaError> {
        if !type_spec.is_truthy() || !container.has_field(field) {
            return Ok(());
        }
        match type_spec {
            Value::String(name) => {
                let checker =
                    self.vocabulary()
                        .type_checker(name)
                        .ok_or_else(|| SchemaError::UnsupportedType {
                            name: name.clone(),
                        })?;
                if let Some(value) = container.field(field)
                    && !checker(value)
                {
                    self.ctx.error(
                        ErrorCode::IncorrectType,
                        Some(type_spec.clone()),
                        Some(value.clone()),
                    );
                }
                Ok(())
            }
            Value::Array(alternatives) => {
                self.resolve_union(container, field, type_spec, alternatives)
            }
            Value::Object(_) => self.apply_schema(container, field, type_spec),
            other => Err(SchemaError::UnsupportedType {
                name: other.to_string(),
            }),
        }
    }

    /// First alternative with no errors wins; if none does, one
    /// `incorrect-type` for the whole union.
    fn resolve_union(
        &mut self,
        container: &mut Value,
        field: &FieldKey,
        type_spec: &Value,
        alternatives: &[Value],
    ) -> Result<(), SchemaError> {
        for (index, alternative) in alternatives.iter().enumerate() {
            let (result, errors) =
                self.speculate(|walker| walker.check_type(container, field, alternative));
            result?;
            if errors.is_empty() {
                trace!(alternative = index, "union alternative matched");
                return Ok(());
            }
        }
        let actual = container.field(field).cloned();
        self.ctx
            .error(ErrorCode::IncorrectType, Some(type_spec.clone()), actual);
        Ok(())
    }
}

/// `extends`: the field must also satisfy another type specification.
pub(crate) fn extends(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    base: &Value,
) -> Result<(), SchemaError> {
    walker.check_type(container, field, base)
}

/// `disallow`: the field must not satisfy the given type specification.
pub(crate) fn disallow(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    disallowed: &Value,
) -> Result<(), SchemaError> {
    if !disallowed.is_truthy() || !container.has_field(field) {
        return Ok(());
    }
    let (result, errors) = walker.probe(|w| w.resolve_type(container, field, disallowed));
    result?;
    if errors.is_empty() {
        let actual = container.field(field).cloned();
        walker
            .ctx
            .error(ErrorCode::DisallowedType, Some(disallowed.clone()), actual);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_excludes_booleans_and_floats() {
        assert!(is_integer(&Value::from(1)));
        assert!(!is_integer(&Value::from(true)));
        assert!(!is_integer(&Value::from(1.0)));
    }

    #[test]
    fn test_number_accepts_both_numeric_kinds() {
        assert!(is_number(&Value::from(1)));
        assert!(is_number(&Value::from(1.5)));
        assert!(!is_number(&Value::from(false)));
        assert!(!is_number(&Value::from("1")));
    }

    #[test]
    fn test_any_accepts_null() {
        assert!(is_any(&Value::Null));
        assert!(is_null(&Value::Null));
        assert!(!is_null(&Value::from(0)));
    }
}
