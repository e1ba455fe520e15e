//! Array keywords: `items`, `additionalItems` and `uniqueItems`.

use ahash::AHashSet;
use chrono::NaiveDateTime;
use vetted_value::{FieldKey, Value};

use super::{ErrorCode, SchemaError, Walker};
use crate::schema::{SchemaNode, invalid_keyword};

fn array_len(value: &Value) -> Option<usize> {
    value.as_array().map(<[Value]>::len)
}

/// Appends the defaults of positional `items` schemas past the end of a
/// shorter array. Runs before any keyword of the node is dispatched, so
/// `minItems` and `additionalItems` see the padded array too.
pub(crate) fn pad_positional_items(container: &mut Value, field: &FieldKey, items: &Value) {
    let Value::Array(positional) = items else {
        return;
    };
    let Some(Value::Array(elements)) = container.field_mut(field) else {
        return;
    };
    if elements.len() >= positional.len() {
        return;
    }
    for position in &positional[elements.len()..] {
        if let Some(default) = position.get("default") {
            elements.push(default.clone());
        }
    }
}

/// `items` as one schema checks every element; as a list it checks element
/// `i` against position `i`.
pub(crate) fn items(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    schema: &SchemaNode<'_>,
    items: &Value,
) -> Result<(), SchemaError> {
    // coercion may have turned a scalar into an array after the node was padded
    pad_positional_items(container, field, items);
    let Some(value) = container.field_mut(field) else {
        return Ok(());
    };
    let Some(len) = array_len(value) else {
        return Ok(());
    };
    match items {
        Value::Object(_) => {
            for index in 0..len {
                walker.walk(value, &FieldKey::Index(index), items)?;
            }
            Ok(())
        }
        Value::Array(positional) => {
            if !schema.contains("additionalItems") && positional.len() != len {
                walker.ctx.error(
                    ErrorCode::IncorrectListLength,
                    Some(Value::from(positional.len())),
                    Some(Value::from(len)),
                );
                return Ok(());
            }
            for (index, position) in positional.iter().enumerate() {
                walker.walk(value, &FieldKey::Index(index), position)?;
            }
            Ok(())
        }
        _ => Err(invalid_keyword(
            &walker.ctx,
            "items",
            "must be an object or a list",
        )),
    }
}

/// Elements past a positional `items` list: forbidden, allowed or checked
/// against a schema.
pub(crate) fn additional_items(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    schema: &SchemaNode<'_>,
    additional: &Value,
) -> Result<(), SchemaError> {
    if !matches!(additional, Value::Bool(_) | Value::Object(_)) {
        return Err(invalid_keyword(
            &walker.ctx,
            "additionalItems",
            "must be a boolean or an object",
        ));
    }
    let Some(Value::Array(positional)) = schema.get("items") else {
        return Ok(());
    };
    let Some(value) = container.field_mut(field) else {
        return Ok(());
    };
    let Some(len) = array_len(value) else {
        return Ok(());
    };
    match additional {
        Value::Bool(false) if len != positional.len() => {
            walker.ctx.error(
                ErrorCode::IncorrectListLength,
                Some(Value::from(positional.len())),
                Some(Value::from(len)),
            );
        }
        Value::Object(_) => {
            for index in positional.len()..len {
                walker.walk(value, &FieldKey::Index(index), additional)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Hashable identity of a non-float scalar.
#[derive(PartialEq, Eq, Hash)]
enum ScalarKey<'a> {
    Null,
    Bool(bool),
    Integer(i64),
    String(&'a str),
    DateTime(NaiveDateTime),
}

/// Scalars seen so far. Floats stay in a list since they only compare by
/// `==`; an integral float still matches the integer of the same value.
#[derive(Default)]
struct SeenScalars<'a> {
    keyed: AHashSet<ScalarKey<'a>>,
    floats: Vec<f64>,
}

impl<'a> SeenScalars<'a> {
    /// Returns false when an equal scalar was already seen.
    fn insert(&mut self, value: &'a Value) -> bool {
        let key = match value {
            Value::Float(float) => return self.insert_float(*float),
            Value::Integer(int) if self.floats.contains(&(*int as f64)) => return false,
            Value::Integer(int) => ScalarKey::Integer(*int),
            Value::Null => ScalarKey::Null,
            Value::Bool(flag) => ScalarKey::Bool(*flag),
            Value::String(text) => ScalarKey::String(text.as_str()),
            Value::DateTime(at) => ScalarKey::DateTime(*at),
            Value::Array(_) | Value::Object(_) => return true,
        };
        self.keyed.insert(key)
    }

    fn insert_float(&mut self, float: f64) -> bool {
        let integral = float.fract() == 0.0 && (float as i64) as f64 == float;
        if self.floats.contains(&float)
            || (integral && self.keyed.contains(&ScalarKey::Integer(float as i64)))
        {
            return false;
        }
        self.floats.push(float);
        true
    }
}

/// Duplicates are looked for among scalars and among containers, never
/// across the two groups.
pub(crate) fn unique_items(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    unique: &Value,
) -> Result<(), SchemaError> {
    if matches!(unique, Value::Bool(false)) {
        return Ok(());
    }
    let Some(elements) = container.field(field).and_then(Value::as_array) else {
        return Ok(());
    };
    let mut scalars = SeenScalars::default();
    let mut containers: Vec<&Value> = Vec::new();
    for element in elements {
        let fresh = if element.is_container() {
            let fresh = !containers.iter().any(|earlier| earlier.loose_eq(element));
            if fresh {
                containers.push(element);
            }
            fresh
        } else {
            scalars.insert(element)
        };
        if !fresh {
            walker
                .ctx
                .error(ErrorCode::NotUnique, Some(element.clone()), None);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn duplicates(elements: Vec<Value>) -> Vec<Value> {
        let mut seen = SeenScalars::default();
        elements
            .iter()
            .filter(|element| !seen.insert(*element))
            .cloned()
            .collect()
    }

    #[test]
    fn test_scalars_compare_loosely_across_numbers() {
        let found = duplicates(vec![
            Value::Integer(1),
            Value::Float(1.0),
            Value::from("a"),
            Value::from("a"),
            Value::Float(2.5),
            Value::Float(2.5),
            Value::Bool(true),
            Value::Float(3.0),
            Value::Integer(3),
        ]);
        assert_eq!(
            found,
            vec![
                Value::Float(1.0),
                Value::from("a"),
                Value::Float(2.5),
                Value::Integer(3)
            ]
        );
    }

    #[test]
    fn test_nan_is_never_a_duplicate() {
        assert!(duplicates(vec![Value::Float(f64::NAN), Value::Float(f64::NAN)]).is_empty());
        assert!(duplicates(vec![Value::Bool(true), Value::Integer(1), Value::Null]).is_empty());
    }
}
