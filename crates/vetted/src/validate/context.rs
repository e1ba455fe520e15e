//! Validation context
//!
//! `ValidationContext` manages per-call state:
//! - Accumulated error records
//! - A LIFO stack of saved error lists for speculative scopes
//! - The field path used to attribute errors

use vetted_value::{FieldKey, FieldPath, Value};

use super::error::{ErrorCode, ErrorRecord, ValidationError};

/// Mutable state owned by exactly one validation call.
///
/// The first path segment is the synthetic root field wrapping the validated
/// value; it is never part of a reported [`FieldPath`].
#[derive(Debug, Default)]
pub struct ValidationContext {
    /// Errors of the innermost open scope
    errors: Vec<ErrorRecord>,
    /// Error lists saved by `push_scope`, restored by `pop_scope`
    error_stack: Vec<Vec<ErrorRecord>>,
    field_path: Vec<FieldKey>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Error recording
    // -------------------------------------------------------------------------

    /// Record an error at the current path.
    pub fn error(&mut self, code: ErrorCode, detail: Option<Value>, supplement: Option<Value>) {
        let record = ErrorRecord {
            code,
            path: self.current_path(),
            detail,
            supplement,
        };
        self.errors.push(record);
    }

    /// Record an already-built error as is.
    pub fn record(&mut self, record: ErrorRecord) {
        self.errors.push(record);
    }

    /// Append errors collected elsewhere, typically a closed speculative scope.
    pub fn extend(&mut self, records: impl IntoIterator<Item = ErrorRecord>) {
        self.errors.extend(records);
    }

    /// Errors of the innermost open scope.
    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    // -------------------------------------------------------------------------
    // Speculative scopes
    // -------------------------------------------------------------------------

    /// Open a scope: errors recorded from now on are captured separately.
    pub fn push_scope(&mut self) {
        let saved = std::mem::take(&mut self.errors);
        self.error_stack.push(saved);
    }

    /// Close the innermost scope, returning what it captured.
    ///
    /// The enclosing scope's errors are restored untouched.
    pub fn pop_scope(&mut self) -> Vec<ErrorRecord> {
        debug_assert!(!self.error_stack.is_empty(), "unbalanced pop_scope");
        let saved = self.error_stack.pop().unwrap_or_default();
        std::mem::replace(&mut self.errors, saved)
    }

    pub fn scope_depth(&self) -> usize {
        self.error_stack.len()
    }

    // -------------------------------------------------------------------------
    // Path management
    // -------------------------------------------------------------------------

    pub fn push_path(&mut self, key: FieldKey) {
        self.field_path.push(key);
    }

    pub fn pop_path(&mut self) {
        self.field_path.pop();
    }

    /// Path of the value being checked, without the synthetic root.
    pub fn current_path(&self) -> FieldPath {
        FieldPath::from_segments(self.field_path.get(1..).unwrap_or_default())
    }

    /// Consume and produce the call result.
    pub fn finish(self) -> Result<(), ValidationError> {
        debug_assert!(self.error_stack.is_empty(), "unbalanced push_scope");
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}
