//! Schema validation for already-decoded structured data.
//!
//! A schema is itself a [`Value`]: an object mapping keywords (`type`,
//! `properties`, `minimum`, ...) to constraints. [`Validator`] walks the data
//! against it, injects defaults, optionally coerces mismatched values, and
//! reports every violation it finds in one pass.
//!
//! ```
//! use vetted::{ErrorCode, Validator};
//!
//! let schema = vetted::value::json::from_json_str(
//!     r#"{"type": "object", "properties": {"age": {"type": "integer", "minimum": 0}}}"#,
//! )
//! .unwrap();
//! let data = vetted::value::json::from_json_str(r#"{"age": -1}"#).unwrap();
//!
//! let err = Validator::new().validate(data, &schema).unwrap_err();
//! let codes = err.as_validation().unwrap().codes();
//! assert_eq!(codes, vec![ErrorCode::LessThanMinimum]);
//! ```

pub mod builder;
mod coerce;
mod extended;
pub mod format;
mod options;
pub mod schema;
pub mod validate;
mod vocabulary;

pub use vetted_value as value;

pub use format::{FormatValidator, FormatValidators};
pub use options::ValidatorOptions;
pub use schema::SchemaNode;
pub use validate::{
    Error, ErrorCode, ErrorRecord, SchemaError, ValidationContext, ValidationError, Validator,
    Walker, validate, validate_in_place,
};
pub use vetted_value::{FieldKey, FieldPath, Map, Value, ValueKind};
pub use vocabulary::{AdditionalPropertiesMode, Coercion, Evaluator, TypeChecker, Vocabulary};
