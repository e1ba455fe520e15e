/// Per-call policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Fields without an explicit `required` are required.
    pub required_by_default: bool,
    /// Strings without an explicit `blank` may be empty.
    pub blank_by_default: bool,
    /// Skip the `required` check entirely. Defaults are still injected.
    pub ignore_required: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            required_by_default: true,
            blank_by_default: false,
            ignore_required: false,
        }
    }
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required_by_default(mut self, value: bool) -> Self {
        self.required_by_default = value;
        self
    }

    pub fn blank_by_default(mut self, value: bool) -> Self {
        self.blank_by_default = value;
        self
    }

    pub fn ignore_required(mut self, value: bool) -> Self {
        self.ignore_required = value;
        self
    }
}
