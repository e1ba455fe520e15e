//! Schema node working copy and helpers shared by evaluators.

use std::borrow::Cow;

use indexmap::IndexMap;
use regex::Regex;
use vetted_value::{Map, Value};

use crate::validate::{SchemaError, ValidationContext};

/// Keywords the walker handles itself before dispatching the rest.
const WALKER_KEYWORDS: [&str; 2] = ["required", "type"];

/// Shallow, ordered view of one schema node as evaluators see it.
///
/// `required` and `type` are removed (the walker has already handled them)
/// and `blank` is always present, filled from the `blank_by_default` policy
/// when the author left it out. The caller's node is never modified.
#[derive(Debug, Clone)]
pub struct SchemaNode<'s> {
    entries: IndexMap<&'s str, Cow<'s, Value>>,
}

impl<'s> SchemaNode<'s> {
    pub fn working_copy(node: &'s Map, blank_by_default: bool) -> Self {
        let mut entries: IndexMap<&'s str, Cow<'s, Value>> = node
            .iter()
            .filter(|(keyword, _)| !WALKER_KEYWORDS.contains(&keyword.as_str()))
            .map(|(keyword, value)| (keyword.as_str(), Cow::Borrowed(value)))
            .collect();
        if !entries.contains_key("blank") {
            entries.insert("blank", Cow::Owned(Value::Bool(blank_by_default)));
        }
        Self { entries }
    }

    pub fn get(&self, keyword: &str) -> Option<&Value> {
        self.entries.get(keyword).map(|value| value.as_ref())
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.entries.contains_key(keyword)
    }

    /// Whether `keyword` is present and truthy.
    pub fn flag(&self, keyword: &str) -> bool {
        self.get(keyword).is_some_and(Value::is_truthy)
    }

    /// Keywords in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(keyword, value)| (*keyword, value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compiles `pattern` so that it only matches at the start of the text.
pub fn prefix_regex(pattern: &str) -> Result<Regex, SchemaError> {
    Regex::new(&format!("^(?:{pattern})")).map_err(|e| SchemaError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Builds an [`SchemaError::InvalidKeyword`] for the field being checked.
pub fn invalid_keyword(
    ctx: &ValidationContext,
    keyword: &str,
    reason: impl Into<String>,
) -> SchemaError {
    SchemaError::InvalidKeyword {
        keyword: keyword.to_string(),
        field: ctx.current_path().to_string(),
        reason: reason.into(),
    }
}

/// Reads a count bound (`minLength`, `maxProperties`, ...): a non-negative
/// integer, or a float with no fractional part.
pub fn count_limit(
    ctx: &ValidationContext,
    keyword: &str,
    limit: &Value,
) -> Result<usize, SchemaError> {
    let count = match limit {
        Value::Integer(n) => usize::try_from(*n).ok(),
        Value::Float(f) if f.fract() == 0.0 && *f >= 0.0 => Some(*f as usize),
        _ => None,
    };
    count.ok_or_else(|| invalid_keyword(ctx, keyword, "must be a non-negative integer"))
}
