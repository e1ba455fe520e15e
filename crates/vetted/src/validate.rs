//! Schema validation
//!
//! # Architecture
//!
//! Validation is a depth-first walk over the schema tree:
//! - `Walker`: resolves `required`, then `type`, then dispatches every other
//!   keyword of the node to the evaluator registered for it
//! - Evaluators: plain functions looked up in the [`Vocabulary`]; the ones
//!   holding nested schemas (`properties`, `items`, ...) recurse into the walker
//! - `ValidationContext`: errors, speculative scopes and the field path
//!
//! # Error Handling
//!
//! Two categories of errors:
//! - `ErrorRecord`: data violations accumulated in `ValidationContext` (non-fatal)
//! - `SchemaError`: a malformed schema, returned immediately
//!
//! # Speculative Scopes
//!
//! Union matching, `disallow`, `requireEither` and coercion need to know
//! whether a check would fail without reporting its errors. They run the check
//! inside [`Walker::speculate`], which captures everything recorded meanwhile.

pub(crate) mod array;
mod context;
mod error;
pub(crate) mod object;
pub(crate) mod primitive;
pub(crate) mod types;

pub use context::ValidationContext;
pub use error::{Error, ErrorCode, ErrorRecord, SchemaError, ValidationError};

use tracing::{debug, trace};
use vetted_value::{FieldKey, Map, Value};

use crate::coerce;
use crate::format::{FormatValidator, FormatValidators};
use crate::options::ValidatorOptions;
use crate::schema::SchemaNode;
use crate::vocabulary::Vocabulary;

/// Name of the field of the synthetic object wrapping the validated value.
pub const ROOT_FIELD: &str = "_data";

/// Renamed keywords and what replaced them.
const LEGACY_KEYWORDS: [(&str, &str); 2] = [("optional", "required"), ("requires", "dependencies")];

// =============================================================================
// Public API
// =============================================================================

/// Validate `data` against `schema`, returning the data with defaults
/// injected and, for coercing vocabularies, values converted.
///
/// # Example
///
/// ```
/// use vetted::{FormatValidators, ValidatorOptions, Value, Vocabulary, validate};
///
/// let schema = Value::from_iter([("type".to_string(), Value::from("integer"))]);
/// let data = validate(
///     Value::from(3),
///     &schema,
///     &Vocabulary::standard(),
///     &FormatValidators::default(),
///     &ValidatorOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(data, Value::from(3));
/// ```
pub fn validate(
    data: Value,
    schema: &Value,
    vocabulary: &Vocabulary,
    formats: &FormatValidators,
    options: &ValidatorOptions,
) -> Result<Value, Error> {
    let mut data = data;
    validate_in_place(&mut data, schema, vocabulary, formats, options)?;
    Ok(data)
}

/// Like [`validate`], but edits `data` where it is.
///
/// Injected defaults and coerced values stay in `data` even when the call
/// fails.
pub fn validate_in_place(
    data: &mut Value,
    schema: &Value,
    vocabulary: &Vocabulary,
    formats: &FormatValidators,
    options: &ValidatorOptions,
) -> Result<(), Error> {
    let root_key = FieldKey::from(ROOT_FIELD);
    let mut root = Value::Object(Map::from_iter([(
        ROOT_FIELD.to_string(),
        std::mem::take(data),
    )]));

    debug!(coerces = vocabulary.coerces(), "validation started");
    let mut walker = Walker::new(vocabulary, formats, options);
    let walked = walker.walk(&mut root, &root_key, schema);
    *data = root.remove_field(&root_key).unwrap_or_default();

    if let Err(e) = walked {
        debug!(error = %e, "schema rejected");
        return Err(e.into());
    }
    let outcome = walker.finish();
    debug!(
        errors = outcome.as_ref().map_or_else(|e| e.errors.len(), |_| 0),
        "validation finished"
    );
    outcome.map_err(Error::from)
}

/// A vocabulary, format validators and options bundled for repeated use.
///
/// Each call builds its own [`ValidationContext`], so one `Validator` can be
/// shared between threads.
#[derive(Debug, Clone)]
pub struct Validator {
    vocabulary: Vocabulary,
    formats: FormatValidators,
    options: ValidatorOptions,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::with_vocabulary(Vocabulary::standard())
    }

    pub fn extended() -> Self {
        Self::with_vocabulary(Vocabulary::extended())
    }

    pub fn coercing() -> Self {
        Self::with_vocabulary(Vocabulary::coercing())
    }

    pub fn extended_coercing() -> Self {
        Self::with_vocabulary(Vocabulary::extended_coercing())
    }

    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            formats: FormatValidators::default(),
            options: ValidatorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_format_validators(mut self, formats: FormatValidators) -> Self {
        self.formats = formats;
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vocabulary_mut(&mut self) -> &mut Vocabulary {
        &mut self.vocabulary
    }

    pub fn format_validators_mut(&mut self) -> &mut FormatValidators {
        &mut self.formats
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    pub fn validate(&self, data: Value, schema: &Value) -> Result<Value, Error> {
        validate(data, schema, &self.vocabulary, &self.formats, &self.options)
    }

    pub fn validate_in_place(&self, data: &mut Value, schema: &Value) -> Result<(), Error> {
        validate_in_place(data, schema, &self.vocabulary, &self.formats, &self.options)
    }
}

// =============================================================================
// Walker
// =============================================================================

/// Recursive driver of one validation call.
///
/// Evaluators receive the walker so they can record errors through
/// [`Walker::ctx`], recurse with [`Walker::walk`] and probe with
/// [`Walker::speculate`].
pub struct Walker<'v> {
    pub ctx: ValidationContext,
    vocabulary: &'v Vocabulary,
    formats: &'v FormatValidators,
    options: &'v ValidatorOptions,
    /// Open `probe` calls; coercion is off while non-zero
    probing: usize,
}

impl<'v> Walker<'v> {
    pub fn new(
        vocabulary: &'v Vocabulary,
        formats: &'v FormatValidators,
        options: &'v ValidatorOptions,
    ) -> Self {
        Self {
            ctx: ValidationContext::new(),
            vocabulary,
            formats,
            options,
            probing: 0,
        }
    }

    pub fn vocabulary(&self) -> &'v Vocabulary {
        self.vocabulary
    }

    pub fn options(&self) -> &'v ValidatorOptions {
        self.options
    }

    pub fn format_validator(&self, name: &str) -> Option<FormatValidator> {
        self.formats.get(name)
    }

    /// Validate `container[field]` against `schema`, one path segment deeper.
    pub fn walk(
        &mut self,
        container: &mut Value,
        field: &FieldKey,
        schema: &Value,
    ) -> Result<(), SchemaError> {
        self.ctx.push_path(field.clone());
        let result = self.apply_schema(container, field, schema);
        self.ctx.pop_path();
        result
    }

    /// Validate `container[field]` against `schema` at the current path.
    ///
    /// Used for nested schemas given as a `type`, which describe the field
    /// being checked rather than a child of it.
    pub fn apply_schema(
        &mut self,
        container: &mut Value,
        field: &FieldKey,
        schema: &Value,
    ) -> Result<(), SchemaError> {
        match schema {
            Value::Null => Ok(()),
            Value::Object(node) => self.apply_node(container, field, node),
            other => Err(SchemaError::InvalidSchemaNode { kind: other.kind() }),
        }
    }

    fn apply_node(
        &mut self,
        container: &mut Value,
        field: &FieldKey,
        node: &Map,
    ) -> Result<(), SchemaError> {
        if let Some(default) = node.get("default")
            && matches!(container, Value::Object(_))
            && !container.has_field(field)
        {
            container.set_field(field, default.clone());
        }
        if let Some(items) = node.get("items") {
            array::pad_positional_items(container, field, items);
        }

        for (keyword, replacement) in LEGACY_KEYWORDS {
            if node.contains_key(keyword) {
                return Err(SchemaError::LegacyKeyword {
                    keyword,
                    replacement,
                });
            }
        }

        let schema = SchemaNode::working_copy(node, self.options.blank_by_default);

        if !self.options.ignore_required {
            let required = node
                .get("required")
                .map_or(self.options.required_by_default, Value::is_truthy);
            self.check_required(container, field, required);
        }

        if let Some(type_spec) = node.get("type") {
            self.check_type(container, field, type_spec)?;
        }

        let vocabulary = self.vocabulary;
        for (keyword, constraint) in schema.iter() {
            if let Some(evaluator) = vocabulary.evaluator(keyword) {
                evaluator(self, container, field, &schema, constraint)?;
            }
        }
        Ok(())
    }

    /// Emit `missing-required` when `required` and the field is absent.
    pub fn check_required(&mut self, container: &Value, field: &FieldKey, required: bool) {
        if required && !container.has_field(field) {
            self.ctx.error(ErrorCode::MissingRequired, None, None);
        }
    }

    /// Type check, repairing mismatches first when the vocabulary coerces.
    pub fn check_type(
        &mut self,
        container: &mut Value,
        field: &FieldKey,
        type_spec: &Value,
    ) -> Result<(), SchemaError> {
        if self.probing == 0 && self.vocabulary.coerces() {
            coerce::coerce_type(self, container, field, type_spec)
        } else {
            self.resolve_type(container, field, type_spec)
        }
    }

    /// Run `f` in a speculative scope, returning its result and the errors it
    /// recorded. Those errors are not part of the report unless the caller
    /// passes them back to [`ValidationContext::extend`].
    pub fn speculate<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> (R, Vec<ErrorRecord>) {
        self.ctx.push_scope();
        trace!(depth = self.ctx.scope_depth(), "speculative scope opened");
        let result = f(self);
        let errors = self.ctx.pop_scope();
        (result, errors)
    }

    /// [`speculate`](Self::speculate) with coercion switched off, so the
    /// probed value is looked at as it is.
    pub fn probe<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> (R, Vec<ErrorRecord>) {
        self.probing += 1;
        let outcome = self.speculate(f);
        self.probing -= 1;
        outcome
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        self.ctx.finish()
    }
}
