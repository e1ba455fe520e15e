//! Data model for vetted.
//!
//! Validation operates on already-decoded structured data: objects, arrays and
//! scalars. [`Value`] is that data, [`FieldKey`] addresses a slot inside a
//! container and [`FieldPath`] is the address of the value currently being
//! checked, used to attribute errors.

pub mod json;
pub mod path;
mod ser;
pub mod value;

pub use json::ConvertError;
pub use path::{FieldKey, FieldPath};
pub use value::{Map, Value, ValueKind};
