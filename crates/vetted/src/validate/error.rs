//! Validation error types
//!
//! Two categories of errors:
//! - `ErrorRecord`: a data violation accumulated in the `ValidationContext` (non-fatal)
//! - `SchemaError`: the schema itself is malformed; aborts the whole call

use core::fmt;

use thiserror::Error;
use vetted_value::{FieldPath, Value, ValueKind};

// =============================================================================
// ErrorCode
// =============================================================================

/// Closed set of data violations. Renders in kebab-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    IncorrectType,
    MissingRequired,
    Blank,
    ForbiddenProperty,
    IncorrectListLength,
    Dependency,
    LessThanMinimum,
    MoreThanMaximum,
    TooShort,
    TooLong,
    PatternMismatch,
    NotUnique,
    NotInEnumeration,
    NotDivisibleBy,
    DisallowedType,
    InvalidFormat,
    ImpossibleCoercion,
    ImpossibleIntegerCoercion,
    ImpossibleNumberCoercion,
    ImpossibleDatetimeCoercion,
    ImpossibleObjectCoercion,
    NotEnoughProperties,
    TooManyProperties,
    NoneOfRequired,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::IncorrectType => "incorrect-type",
            ErrorCode::MissingRequired => "missing-required",
            ErrorCode::Blank => "blank",
            ErrorCode::ForbiddenProperty => "forbidden-property",
            ErrorCode::IncorrectListLength => "incorrect-list-length",
            ErrorCode::Dependency => "dependency",
            ErrorCode::LessThanMinimum => "less-than-minimum",
            ErrorCode::MoreThanMaximum => "more-than-maximum",
            ErrorCode::TooShort => "too-short",
            ErrorCode::TooLong => "too-long",
            ErrorCode::PatternMismatch => "pattern-mismatch",
            ErrorCode::NotUnique => "not-unique",
            ErrorCode::NotInEnumeration => "not-in-enumeration",
            ErrorCode::NotDivisibleBy => "not-divisible-by",
            ErrorCode::DisallowedType => "disallowed-type",
            ErrorCode::InvalidFormat => "invalid-format",
            ErrorCode::ImpossibleCoercion => "impossible-coercion",
            ErrorCode::ImpossibleIntegerCoercion => "impossible-integer-coercion",
            ErrorCode::ImpossibleNumberCoercion => "impossible-number-coercion",
            ErrorCode::ImpossibleDatetimeCoercion => "impossible-datetime-coercion",
            ErrorCode::ImpossibleObjectCoercion => "impossible-object-coercion",
            ErrorCode::NotEnoughProperties => "not-enough-properties",
            ErrorCode::TooManyProperties => "too-many-properties",
            ErrorCode::NoneOfRequired => "none-of-required",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ErrorRecord (accumulated data violations)
// =============================================================================

/// One data violation.
///
/// `detail` carries the schema-side expectation (a bound, a type spec, a
/// missing key); `supplement` carries the offending data value.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    pub code: ErrorCode,
    pub path: FieldPath,
    pub detail: Option<Value>,
    pub supplement: Option<Value>,
}

impl ErrorRecord {
    pub fn new(code: ErrorCode, path: FieldPath) -> Self {
        Self {
            code,
            path,
            detail: None,
            supplement: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Value>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_supplement(mut self, supplement: impl Into<Value>) -> Self {
        self.supplement = Some(supplement.into());
        self
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.code, self.path)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        if let Some(supplement) = &self.supplement {
            write!(f, " (got {supplement})")?;
        }
        Ok(())
    }
}

// =============================================================================
// SchemaError (fail-fast)
// =============================================================================

/// The schema is structurally invalid.
///
/// Raised as soon as the walker meets the offending node and never
/// accumulated.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    #[error("schema node must be an object, got {kind}")]
    InvalidSchemaNode { kind: ValueKind },

    #[error("field type '{name}' is not supported")]
    UnsupportedType { name: String },

    #[error("the \"{keyword}\" attribute has been replaced by \"{replacement}\"")]
    LegacyKeyword {
        keyword: &'static str,
        replacement: &'static str,
    },

    #[error("enumeration {options} for field '{field}' must be a container")]
    NonContainerEnum { field: String, options: Value },

    #[error("divisibleBy can not be 0 for field '{field}'")]
    ZeroDivisor { field: String },

    #[error("invalid \"{keyword}\" for field '{field}': {reason}")]
    InvalidKeyword {
        keyword: String,
        field: String,
        reason: String,
    },

    #[error("invalid regular expression '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

// =============================================================================
// ValidationError / Error (call boundary)
// =============================================================================

/// Every violation found in one pass, in discovery order.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{}", render_records(.errors))]
pub struct ValidationError {
    pub errors: Vec<ErrorRecord>,
}

impl ValidationError {
    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn codes(&self) -> Vec<ErrorCode> {
        self.errors.iter().map(|record| record.code).collect()
    }

    pub fn into_errors(self) -> Vec<ErrorRecord> {
        self.errors
    }
}

fn render_records(errors: &[ErrorRecord]) -> String {
    let count = errors.len();
    let mut out = format!(
        "validation failed with {count} error{}",
        if count == 1 { "" } else { "s" }
    );
    for record in errors {
        out.push_str("\n  ");
        out.push_str(&record.to_string());
    }
    out
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(e) => Some(e),
            Error::Schema(_) => None,
        }
    }

    pub fn as_schema(&self) -> Option<&SchemaError> {
        match self {
            Error::Schema(e) => Some(e),
            Error::Validation(_) => None,
        }
    }
}
