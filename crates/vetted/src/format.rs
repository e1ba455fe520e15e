//! `format` keyword and the pluggable format validators it dispatches to.

use core::fmt;

use ahash::AHashMap;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;
use vetted_value::{FieldKey, Value};

use crate::schema::{SchemaNode, invalid_keyword};
use crate::validate::{ErrorCode, SchemaError, ValidationContext, Walker};

/// Checks `value` against the named format, recording `invalid-format` (or
/// anything else) on mismatch.
///
/// Arguments: the context, the field, the value and the format name.
pub type FormatValidator = fn(&mut ValidationContext, &FieldKey, &Value, &str);

/// Registry of format validators by name.
#[derive(Clone)]
pub struct FormatValidators {
    validators: AHashMap<String, FormatValidator>,
}

const DEFAULT_FORMATS: &[(&str, FormatValidator)] = &[
    ("date-time", date_time),
    ("date", date),
    ("time", time),
    ("utc-millisec", utc_millisec),
    ("ip-address", ip_address),
];

impl Default for FormatValidators {
    /// `date-time`, `date`, `time`, `utc-millisec` and `ip-address`.
    fn default() -> Self {
        let mut formats = Self::empty();
        for (name, validator) in DEFAULT_FORMATS {
            formats.register(*name, *validator);
        }
        formats
    }
}

impl FormatValidators {
    pub fn empty() -> Self {
        Self {
            validators: AHashMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, validator: FormatValidator) -> &mut Self {
        self.validators.insert(name.into(), validator);
        self
    }

    pub fn get(&self, name: &str) -> Option<FormatValidator> {
        self.validators.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }
}

impl fmt::Debug for FormatValidators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.validators.keys().collect();
        names.sort();
        f.debug_set().entries(names).finish()
    }
}

/// Dispatches truthy values to the registered validator. Unknown formats
/// are accepted.
pub(crate) fn format(
    walker: &mut Walker<'_>,
    container: &mut Value,
    field: &FieldKey,
    _schema: &SchemaNode<'_>,
    format: &Value,
) -> Result<(), SchemaError> {
    let Value::String(name) = format else {
        return Err(invalid_keyword(&walker.ctx, "format", "must be a string"));
    };
    let Some(value) = container.field(field).filter(|value| value.is_truthy()) else {
        return Ok(());
    };
    match walker.format_validator(name) {
        Some(validator) => validator(&mut walker.ctx, field, value, name),
        None => debug!(format = %name, "no validator registered for format"),
    }
    Ok(())
}

// =============================================================================
// Default validators
// =============================================================================

fn check_text(
    ctx: &mut ValidationContext,
    value: &Value,
    format_name: &str,
    parses: impl Fn(&str) -> bool,
) {
    if !value.as_str().is_some_and(parses) {
        ctx.error(
            ErrorCode::InvalidFormat,
            Some(Value::from(format_name)),
            Some(value.clone()),
        );
    }
}

fn date_time(ctx: &mut ValidationContext, _field: &FieldKey, value: &Value, format_name: &str) {
    check_text(ctx, value, format_name, |text| {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%SZ").is_ok()
    });
}

fn date(ctx: &mut ValidationContext, _field: &FieldKey, value: &Value, format_name: &str) {
    check_text(ctx, value, format_name, |text| {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
    });
}

fn time(ctx: &mut ValidationContext, _field: &FieldKey, value: &Value, format_name: &str) {
    check_text(ctx, value, format_name, |text| {
        NaiveTime::parse_from_str(text, "%H:%M:%S").is_ok()
    });
}

/// Milliseconds since the epoch: any positive number.
fn utc_millisec(ctx: &mut ValidationContext, _field: &FieldKey, value: &Value, format_name: &str) {
    if !value.as_f64().is_some_and(|millis| millis > 0.0) {
        ctx.error(
            ErrorCode::InvalidFormat,
            Some(Value::from(format_name)),
            Some(value.clone()),
        );
    }
}

/// Dotted-quad IPv4. Octets may carry leading zeros (`010.0.0.1`).
fn ip_address(ctx: &mut ValidationContext, _field: &FieldKey, value: &Value, format_name: &str) {
    check_text(ctx, value, format_name, is_dotted_quad);
}

fn is_dotted_quad(text: &str) -> bool {
    let octets: Vec<&str> = text.split('.').collect();
    octets.len() == 4
        && octets.iter().all(|octet| {
            (1..=3).contains(&octet.len())
                && octet.bytes().all(|byte| byte.is_ascii_digit())
                && octet.parse::<u8>().is_ok()
        })
}
