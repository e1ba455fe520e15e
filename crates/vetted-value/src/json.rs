//! Bridge between [`Value`] and `serde_json::Value`.

use thiserror::Error;

use crate::value::{DATETIME_FORMAT, Map, Value};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConvertError {
    #[error("Invalid number: cannot represent {0} as JSON number")]
    InvalidNumber(f64),
}

/// Decodes JSON text into a [`Value`].
pub fn from_json_str(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str::<serde_json::Value>(text).map(Value::from)
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                // u64 beyond i64::MAX and every float
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect::<Map>(),
            ),
        }
    }
}

impl Value {
    /// Converts to JSON. Fails only on non-finite floats.
    pub fn to_json(&self) -> Result<serde_json::Value, ConvertError> {
        match self {
            Value::Null => Ok(serde_json::Value::Null),
            Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            Value::Integer(n) => Ok(serde_json::Value::from(*n)),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or(ConvertError::InvalidNumber(*f)),
            Value::String(s) => Ok(serde_json::Value::String(s.clone())),
            Value::DateTime(dt) => Ok(serde_json::Value::String(
                dt.format(DATETIME_FORMAT).to_string(),
            )),
            Value::Array(items) => items
                .iter()
                .map(Value::to_json)
                .collect::<Result<Vec<_>, _>>()
                .map(serde_json::Value::Array),
            Value::Object(map) => {
                let mut json_map = serde_json::Map::new();
                for (key, value) in map {
                    json_map.insert(key.clone(), value.to_json()?);
                }
                Ok(serde_json::Value::Object(json_map))
            }
        }
    }
}
