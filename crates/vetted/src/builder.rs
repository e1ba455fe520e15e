//! Chained builders producing schema trees.
//!
//! Each builder owns a schema node and only ever adds keywords to it; the
//! result of [`SchemaBuilder::build`] is an ordinary [`Value`] that the
//! validator consumes exactly like a hand-written schema.
//!
//! ```
//! use vetted::builder::{ObjectSchema, SchemaBuilder, StringSchema, NumberSchema};
//! use vetted::Value;
//!
//! let user = ObjectSchema::strict()
//!     .property("name", StringSchema::new().min_length(1).required())
//!     .property("age", NumberSchema::integer().minimum(0));
//!
//! let data = Value::from_iter([("name".to_string(), Value::from("Ada"))]);
//! assert!(user.validate(data).is_ok());
//! ```

use vetted_value::{Map, Value};

use crate::options::ValidatorOptions;
use crate::validate::{Error, Validator};

/// Keywords shared by every builder.
pub trait SchemaBuilder: Sized {
    fn node(&self) -> &Map;

    fn node_mut(&mut self) -> &mut Map;

    fn into_node(self) -> Map;

    /// Sets any keyword, including ones registered by callers.
    fn keyword(mut self, keyword: &str, value: impl Into<Value>) -> Self {
        self.node_mut().insert(keyword.to_string(), value.into());
        self
    }

    fn required(self) -> Self {
        self.keyword("required", true)
    }

    fn not_required(self) -> Self {
        self.keyword("required", false)
    }

    fn default(self, value: impl Into<Value>) -> Self {
        self.keyword("default", value)
    }

    /// A sibling name, a list of them, or an object of `trigger -> needed`.
    fn dependencies(self, dependencies: impl Into<Value>) -> Self {
        self.keyword("dependencies", dependencies)
    }

    fn title(self, title: &str) -> Self {
        self.keyword("title", title)
    }

    fn description(self, description: &str) -> Self {
        self.keyword("description", description)
    }

    /// This schema or `null`. Keywords set on the result apply to the union.
    fn nullable(self) -> UnionSchema {
        either([self.build(), type_only("null")])
    }

    fn build(self) -> Value {
        Value::Object(self.into_node())
    }

    /// Validate with the extended vocabulary; fields are optional unless
    /// marked [`required`](Self::required).
    fn validate(&self, data: Value) -> Result<Value, Error> {
        run(Validator::extended(), data, self.node())
    }

    /// Like [`validate`](Self::validate), repairing mismatched types.
    fn coerce(&self, data: Value) -> Result<Value, Error> {
        run(Validator::extended_coercing(), data, self.node())
    }
}

fn run(validator: Validator, data: Value, node: &Map) -> Result<Value, Error> {
    let schema = Value::Object(node.clone());
    validator
        .with_options(ValidatorOptions::default().required_by_default(false))
        .validate(data, &schema)
}

fn type_only(name: &str) -> Value {
    Value::from_iter([("type".to_string(), Value::from(name))])
}

fn typed_node(name: &str) -> Map {
    Map::from_iter([("type".to_string(), Value::from(name))])
}

macro_rules! schema_builder {
    ($($name:ident),* $(,)?) => {
        $(
            impl SchemaBuilder for $name {
                fn node(&self) -> &Map {
                    &self.node
                }

                fn node_mut(&mut self) -> &mut Map {
                    &mut self.node
                }

                fn into_node(self) -> Map {
                    self.node
                }
            }

            impl From<$name> for Value {
                fn from(builder: $name) -> Self {
                    builder.build()
                }
            }
        )*
    };
}

schema_builder!(
    ObjectSchema,
    ArraySchema,
    StringSchema,
    NumberSchema,
    BooleanSchema,
    DatetimeSchema,
    AnySchema,
    UnionSchema,
);

// =============================================================================
// Object
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    node: Map,
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectSchema {
    pub fn new() -> Self {
        let mut node = typed_node("object");
        node.insert("properties".to_string(), Value::Object(Map::new()));
        Self { node }
    }

    /// An object rejecting undeclared properties.
    pub fn strict() -> Self {
        Self::new().additional_properties(false)
    }

    /// Inserts `key -> schema` into the object held under `keyword`.
    fn insert_into(&mut self, keyword: &str, key: &str, schema: Value) {
        let section = self
            .node
            .entry(keyword.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        match section {
            Value::Object(map) => {
                map.insert(key.to_string(), schema);
            }
            other => *other = Value::Object(Map::from_iter([(key.to_string(), schema)])),
        }
    }

    pub fn property(mut self, name: &str, schema: impl Into<Value>) -> Self {
        self.insert_into("properties", name, schema.into());
        self
    }

    /// Schema for every property whose name starts with a match of `regex`.
    pub fn pattern(mut self, regex: &str, schema: impl Into<Value>) -> Self {
        self.insert_into("patternProperties", regex, schema.into());
        self
    }

    /// `true`, `false` or a schema for undeclared properties.
    pub fn additional_properties(self, additional: impl Into<Value>) -> Self {
        self.keyword("additionalProperties", additional)
    }

    pub fn min_properties(self, count: usize) -> Self {
        self.keyword("minProperties", count)
    }

    pub fn max_properties(self, count: usize) -> Self {
        self.keyword("maxProperties", count)
    }

    pub fn require_either<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<Value> = names
            .into_iter()
            .map(|name| Value::String(name.into()))
            .collect();
        self.keyword("requireEither", names)
    }

    /// Adds the properties and pattern properties of `other`.
    pub fn merge(mut self, other: &ObjectSchema) -> Self {
        for keyword in ["properties", "patternProperties"] {
            if let Some(Value::Object(entries)) = other.node.get(keyword)
                && !entries.is_empty()
            {
                for (key, schema) in entries {
                    self.insert_into(keyword, key, schema.clone());
                }
            }
        }
        self
    }
}

// =============================================================================
// Array
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    node: Map,
}

impl Default for ArraySchema {
    fn default() -> Self {
        Self::new()
    }
}

impl ArraySchema {
    pub fn new() -> Self {
        Self {
            node: typed_node("array"),
        }
    }

    /// One schema for every element, or a list of positional schemas.
    pub fn of(items: impl Into<Value>) -> Self {
        Self::new().keyword("items", items)
    }

    pub fn min_items(self, count: usize) -> Self {
        self.keyword("minItems", count)
    }

    pub fn max_items(self, count: usize) -> Self {
        self.keyword("maxItems", count)
    }

    pub fn additional_items(self, additional: impl Into<Value>) -> Self {
        self.keyword("additionalItems", additional)
    }

    pub fn unique_items(self, unique: bool) -> Self {
        self.keyword("uniqueItems", unique)
    }
}

// =============================================================================
// Scalars
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct StringSchema {
    node: Map,
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl StringSchema {
    pub fn new() -> Self {
        Self {
            node: typed_node("string"),
        }
    }

    pub fn min_length(self, length: usize) -> Self {
        self.keyword("minLength", length)
    }

    pub fn max_length(self, length: usize) -> Self {
        self.keyword("maxLength", length)
    }

    pub fn format(self, format: &str) -> Self {
        self.keyword("format", format)
    }

    pub fn pattern(self, pattern: &str) -> Self {
        self.keyword("pattern", pattern)
    }

    /// Allowed values.
    pub fn one_of<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.keyword("enum", values)
    }

    pub fn allow_blank(self) -> Self {
        self.keyword("blank", true)
    }
}

/// `number` or `integer`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberSchema {
    node: Map,
}

impl NumberSchema {
    pub fn number() -> Self {
        Self {
            node: typed_node("number"),
        }
    }

    pub fn integer() -> Self {
        Self {
            node: typed_node("integer"),
        }
    }

    pub fn minimum(self, bound: impl Into<Value>) -> Self {
        self.keyword("minimum", bound)
    }

    pub fn maximum(self, bound: impl Into<Value>) -> Self {
        self.keyword("maximum", bound)
    }

    pub fn exclusive_minimum(self, exclusive: bool) -> Self {
        self.keyword("exclusiveMinimum", exclusive)
    }

    pub fn exclusive_maximum(self, exclusive: bool) -> Self {
        self.keyword("exclusiveMaximum", exclusive)
    }

    pub fn divisible_by(self, divisor: impl Into<Value>) -> Self {
        self.keyword("divisibleBy", divisor)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanSchema {
    node: Map,
}

impl Default for BooleanSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl BooleanSchema {
    pub fn new() -> Self {
        Self {
            node: typed_node("boolean"),
        }
    }
}

/// The `datetime` type of the extended vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct DatetimeSchema {
    node: Map,
}

impl Default for DatetimeSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl DatetimeSchema {
    pub fn new() -> Self {
        Self {
            node: typed_node("datetime"),
        }
    }
}

// =============================================================================
// Any / unions
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct AnySchema {
    node: Map,
}

pub fn any() -> AnySchema {
    AnySchema {
        node: typed_node("any"),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionSchema {
    node: Map,
}

/// A value matching any of `types`: type names or schemas, tried in order.
pub fn either<I, T>(types: I) -> UnionSchema
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    let alternatives: Vec<Value> = types.into_iter().map(Into::into).collect();
    UnionSchema {
        node: Map::from_iter([("type".to_string(), Value::Array(alternatives))]),
    }
}
