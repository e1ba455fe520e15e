//! Shared argument definitions.

use vetted::{Validator, ValidatorOptions};

/// Flags selecting the vocabulary and the validation policies.
///
/// Embedded in the top-level command using `#[command(flatten)]`.
#[derive(clap::Args, Clone, Debug, Default)]
pub struct ValidationArgs {
    /// Convert mismatched values to the declared type and strip undeclared
    /// properties instead of rejecting them
    #[arg(long)]
    pub coerce: bool,

    /// Enable the `datetime` type and the minProperties, maxProperties and
    /// requireEither keywords
    #[arg(long)]
    pub extended: bool,

    /// Treat fields without an explicit `required` as optional
    #[arg(long)]
    pub optional_by_default: bool,

    /// Accept empty strings unless a schema says `blank: false`
    #[arg(long)]
    pub blank_by_default: bool,

    /// Skip every `required` check
    #[arg(long)]
    pub ignore_required: bool,
}

impl ValidationArgs {
    pub fn to_options(&self) -> ValidatorOptions {
        ValidatorOptions::new()
            .required_by_default(!self.optional_by_default)
            .blank_by_default(self.blank_by_default)
            .ignore_required(self.ignore_required)
    }

    /// Build the validator these flags describe.
    pub fn to_validator(&self) -> Validator {
        let validator = match (self.extended, self.coerce) {
            (false, false) => Validator::new(),
            (true, false) => Validator::extended(),
            (false, true) => Validator::coercing(),
            (true, true) => Validator::extended_coercing(),
        };
        validator.with_options(self.to_options())
    }
}
