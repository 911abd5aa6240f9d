use crate::fmt::FormatOptions;

/// The default maximum number of steps a reduction may take.
pub const DEFAULT_MAX_STEPS: usize = 100;

/// Options controlling a reduction run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReduceOptions {
    /// The maximum number of decide, compute and rewrite steps before the run is aborted with a
    /// step budget error.
    pub max_steps: usize,

    /// The expression used when the input is empty or missing. If [`None`], such input ends the
    /// run with an empty expression error.
    pub default_expression: Option<String>,

    /// Whether to reject expressions containing characters outside the permitted set before
    /// reducing them. When disabled, such characters are silently skipped.
    pub strict: bool,

    /// How computed values are formatted before being written into the expression.
    pub format: FormatOptions,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            default_expression: Some("0".to_string()),
            strict: false,
            format: FormatOptions::default(),
        }
    }
}

impl ReduceOptions {
    /// Wraps the given [`ReduceOptions`] into a builder for further customization.
    pub fn into_builder(self) -> ReduceOptionsBuilder {
        ReduceOptionsBuilder(self)
    }
}

/// Helper struct to build a [`ReduceOptions`] struct.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReduceOptionsBuilder(ReduceOptions);

impl ReduceOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the step budget. See [`ReduceOptions::max_steps`] for more information.
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.0.max_steps = max_steps;
        self
    }

    /// Sets the expression used for empty input. See [`ReduceOptions::default_expression`] for
    /// more information.
    pub fn default_expression(mut self, expression: Option<impl Into<String>>) -> Self {
        self.0.default_expression = expression.map(Into::into);
        self
    }

    /// Sets strict validation. See [`ReduceOptions::strict`] for more information.
    pub fn strict(mut self, strict: bool) -> Self {
        self.0.strict = strict;
        self
    }

    /// Sets the number formatting options.
    pub fn format(mut self, format: FormatOptions) -> Self {
        self.0.format = format;
        self
    }

    /// Builds the [`ReduceOptions`] struct.
    pub fn build(self) -> ReduceOptions {
        self.0
    }
}
