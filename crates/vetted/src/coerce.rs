//! Coercion layer
//!
//! Wraps type resolution for vocabularies that carry coercions. A mismatched
//! value is converted in place by the coercion registered under the declared
//! type name and then type-checked once more. When the conversion fails the
//! original type errors and the conversion errors are both reported.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use tracing::trace;
use vetted_value::{FieldKey, Value};

use crate::validate::{ErrorCode, SchemaError, ValidationContext, Walker};
use crate::vocabulary::Coercion;

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\s*\d+").expect("invalid integer regex"));

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\s*\d+(\.\d+)?").expect("invalid number regex"));

pub(crate) const COERCIONS: &[(&str, Coercion)] = &[
    ("integer", integer),
    ("number", number),
    ("datetime", datetime),
    ("string", string),
    ("boolean", boolean),
    ("array", array),
    ("object", object),
];

pub(crate) fn coerce_type(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    type_spec: &Value,
) -> Result<(), SchemaError> {
    let (resolved, original) =
        walker.speculate(|w| w.resolve_type(container, field, type_spec));
    resolved?;
    if original.is_empty() {
        return Ok(());
    }

    let coercion = match type_spec {
        Value::String(name) if container.has_field(field) => walker.vocabulary().coercion(name),
        _ => None,
    };
    let Some(coercion) = coercion else {
        let actual = container.field(field).cloned();
        walker
            .ctx
            .error(ErrorCode::ImpossibleCoercion, Some(type_spec.clone()), actual);
        return Ok(());
    };
    let Some(slot) = container.field_mut(field) else {
        return Ok(());
    };

    let from = slot.kind();
    let ((), attempt) = walker.speculate(|w| coercion(&mut w.ctx, slot));
    if attempt.is_empty() {
        trace!(path = %walker.ctx.current_path(), %from, to = %type_spec, "coerced value");
        walker.resolve_type(container, field, type_spec)
    } else {
        walker.ctx.extend(original);
        walker.ctx.extend(attempt);
        Ok(())
    }
}

// =============================================================================
// Built-in coercions
// =============================================================================

fn impossible(ctx: &mut ValidationContext, code: ErrorCode, slot: &Value) {
    ctx.error(code, None, Some(slot.clone()));
}

/// Whole text first, then its leading digits.
fn parse_integer(text: &str) -> Option<i64> {
    text.trim().parse().ok().or_else(|| {
        LEADING_INTEGER
            .find(text)
            .and_then(|found| found.as_str().trim().parse().ok())
    })
}

fn integer(ctx: &mut ValidationContext, slot: &mut Value) {
    let coerced = match &*slot {
        Value::Integer(n) => Some(*n),
        Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(text) => parse_integer(text),
        _ => None,
    };
    match coerced {
        Some(n) => *slot = Value::Integer(n),
        None => impossible(ctx, ErrorCode::ImpossibleIntegerCoercion, slot),
    }
}

fn number(ctx: &mut ValidationContext, slot: &mut Value) {
    let coerced = slot
        .as_str()
        .and_then(|text| LEADING_NUMBER.find(text))
        .and_then(|found| found.as_str().trim().parse::<f64>().ok());
    match coerced {
        Some(f) => *slot = Value::Float(f),
        None => impossible(ctx, ErrorCode::ImpossibleNumberCoercion, slot),
    }
}

fn datetime(ctx: &mut ValidationContext, slot: &mut Value) {
    let coerced = slot.as_str().and_then(|text| {
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(|date| date.and_time(NaiveTime::MIN))
            .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%SZ"))
            .ok()
    });
    match coerced {
        Some(dt) => *slot = Value::DateTime(dt),
        None => impossible(ctx, ErrorCode::ImpossibleDatetimeCoercion, slot),
    }
}

fn string(_ctx: &mut ValidationContext, slot: &mut Value) {
    *slot = Value::String(slot.to_plain_string());
}

fn boolean(_ctx: &mut ValidationContext, slot: &mut Value) {
    *slot = Value::Bool(slot.is_truthy());
}

fn array(_ctx: &mut ValidationContext, slot: &mut Value) {
    let element = std::mem::take(slot);
    *slot = Value::Array(vec![element]);
}

fn object(ctx: &mut ValidationContext, slot: &mut Value) {
    impossible(ctx, ErrorCode::ImpossibleObjectCoercion, slot);
}
