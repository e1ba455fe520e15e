//! Named registries driving the walker.
//!
//! A [`Vocabulary`] maps type keywords to checkers, schema keywords to
//! evaluators and type keywords to coercions. The standard, extended and
//! coercing flavours are assembled by merging tables; callers extend them with
//! the `register_*` methods.

use core::fmt;

use ahash::AHashMap;
use vetted_value::{FieldKey, Value};

use crate::schema::SchemaNode;
use crate::validate::{SchemaError, ValidationContext, Walker, array, object, primitive, types};
use crate::{coerce, extended, format};

/// Decides whether a value satisfies a primitive type keyword.
pub type TypeChecker = fn(&Value) -> bool;

/// Applies one schema keyword to `container[field]`.
///
/// Arguments: the walker, the container, the field, the working copy of the
/// schema node and the keyword's value.
pub type Evaluator = fn(
    &mut Walker<'_>,
    &mut Value,
    &FieldKey,
    &SchemaNode<'_>,
    &Value,
) -> Result<(), SchemaError>;

/// Converts the value in place, recording an error when it cannot.
pub type Coercion = fn(&mut ValidationContext, &mut Value);

/// What `additionalProperties: false` does with offending keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdditionalPropertiesMode {
    /// One `forbidden-property` error per key
    #[default]
    Reject,
    /// Remove the keys from the data silently
    Strip,
}

const STANDARD_EVALUATORS: &[(&str, Evaluator)] = &[
    ("properties", object::properties),
    ("patternProperties", object::pattern_properties),
    ("additionalProperties", object::additional_properties),
    ("dependencies", object::dependencies),
    ("items", array::items),
    ("additionalItems", array::additional_items),
    ("uniqueItems", array::unique_items),
    ("minimum", primitive::minimum),
    ("maximum", primitive::maximum),
    ("minLength", primitive::min_length),
    ("maxLength", primitive::max_length),
    ("minItems", primitive::min_length),
    ("maxItems", primitive::max_length),
    ("pattern", primitive::pattern),
    ("enum", primitive::enumeration),
    ("divisibleBy", primitive::divisible_by),
    ("blank", primitive::blank),
    ("title", primitive::metadata_text),
    ("description", primitive::metadata_text),
    ("extends", types::extends),
    ("disallow", types::disallow),
    ("format", format::format),
];

#[derive(Clone)]
pub struct Vocabulary {
    types: AHashMap<String, TypeChecker>,
    evaluators: AHashMap<String, Evaluator>,
    coercions: AHashMap<String, Coercion>,
    additional_properties: AdditionalPropertiesMode,
}

impl Vocabulary {
    /// No types and no keywords. Every schema keyword is ignored.
    pub fn empty() -> Self {
        Self {
            types: AHashMap::new(),
            evaluators: AHashMap::new(),
            coercions: AHashMap::new(),
            additional_properties: AdditionalPropertiesMode::Reject,
        }
    }

    /// Core types and keywords, no coercion.
    pub fn standard() -> Self {
        let mut vocabulary = Self::empty();
        for (name, checker) in types::STANDARD_TYPES {
            vocabulary.register_type(*name, *checker);
        }
        for (keyword, evaluator) in STANDARD_EVALUATORS {
            vocabulary.register_evaluator(*keyword, *evaluator);
        }
        vocabulary
    }

    /// Standard plus `datetime`, `minProperties`, `maxProperties` and
    /// `requireEither`.
    pub fn extended() -> Self {
        let mut vocabulary = Self::standard();
        for (name, checker) in extended::EXTENDED_TYPES {
            vocabulary.register_type(*name, *checker);
        }
        for (keyword, evaluator) in extended::EXTENDED_EVALUATORS {
            vocabulary.register_evaluator(*keyword, *evaluator);
        }
        vocabulary
    }

    pub fn coercing() -> Self {
        Self::standard().with_coercions()
    }

    pub fn extended_coercing() -> Self {
        Self::extended().with_coercions()
    }

    /// Adds the built-in coercions and switches to
    /// [`AdditionalPropertiesMode::Strip`].
    pub fn with_coercions(mut self) -> Self {
        for (name, coercion) in coerce::COERCIONS {
            self.register_coercion(*name, *coercion);
        }
        self.additional_properties = AdditionalPropertiesMode::Strip;
        self
    }

    pub fn with_additional_properties(mut self, mode: AdditionalPropertiesMode) -> Self {
        self.additional_properties = mode;
        self
    }

    pub fn register_type(&mut self, name: impl Into<String>, checker: TypeChecker) -> &mut Self {
        self.types.insert(name.into(), checker);
        self
    }

    pub fn register_evaluator(
        &mut self,
        keyword: impl Into<String>,
        evaluator: Evaluator,
    ) -> &mut Self {
        self.evaluators.insert(keyword.into(), evaluator);
        self
    }

    pub fn register_coercion(&mut self, name: impl Into<String>, coercion: Coercion) -> &mut Self {
        self.coercions.insert(name.into(), coercion);
        self
    }

    pub fn type_checker(&self, name: &str) -> Option<TypeChecker> {
        self.types.get(name).copied()
    }

    pub fn evaluator(&self, keyword: &str) -> Option<Evaluator> {
        self.evaluators.get(keyword).copied()
    }

    pub fn coercion(&self, name: &str) -> Option<Coercion> {
        self.coercions.get(name).copied()
    }

    /// Whether type mismatches are repaired before being reported.
    pub fn coerces(&self) -> bool {
        !self.coercions.is_empty()
    }

    pub fn additional_properties(&self) -> AdditionalPropertiesMode {
        self.additional_properties
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.types.keys().collect();
        let mut evaluators: Vec<_> = self.evaluators.keys().collect();
        let mut coercions: Vec<_> = self.coercions.keys().collect();
        types.sort();
        evaluators.sort();
        coercions.sort();
        f.debug_struct("Vocabulary")
            .field("types", &types)
            .field("evaluators", &evaluators)
            .field("coercions", &coercions)
            .field("additional_properties", &self.additional_properties)
            .finish()
    }
}
