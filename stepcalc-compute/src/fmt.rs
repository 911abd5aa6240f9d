//! Canonical text form of computed values.
//!
//! The formatted text is written back into the expression, so it must always be readable by the
//! tokenizer's number grammar: integers are written without a decimal point, and non-integers use
//! the shortest decimal (or `e` scientific) form that parses back to the same value.

/// Formatting options for numbers.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FormatOptions {
    /// How to format a non-integer number. Integers are always written as plain integers.
    pub number: NumberFormat,

    /// The number of significant digits to round non-integers to. If [`None`], the shortest
    /// representation that round-trips exactly is used.
    ///
    /// This option **does not** affect integers.
    pub precision: Option<usize>,
}

impl FormatOptions {
    /// Wraps the given [`FormatOptions`] into a builder for further customization.
    pub fn into_builder(self) -> FormatOptionsBuilder {
        FormatOptionsBuilder(self)
    }
}

/// The different ways to format a non-integer number.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum NumberFormat {
    /// Chooses between decimal and scientific notation based on the magnitude of the number.
    ///
    /// Numbers whose magnitude is at most `1e-6` or at least `1e+12` are represented in
    /// scientific notation, while all other numbers are formatted in decimal notation.
    ///
    /// This is the default option.
    #[default]
    Auto,

    /// Formats the number as a decimal, regardless of its magnitude.
    Decimal,

    /// Formats the number in `e` scientific notation, such as `1.5e-7`.
    Scientific,
}

/// Helper struct to build a [`FormatOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FormatOptionsBuilder(FormatOptions);

impl FormatOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number format. See [`NumberFormat`] for more information.
    pub fn number(mut self, number: NumberFormat) -> Self {
        self.0.number = number;
        self
    }

    /// Sets the number of significant digits. See [`FormatOptions::precision`] for more
    /// information.
    pub fn precision(mut self, precision: Option<usize>) -> Self {
        self.0.precision = precision;
        self
    }

    /// Builds the [`FormatOptions`] struct.
    pub fn build(self) -> FormatOptions {
        self.0
    }
}

/// Returns true if the given number is small or large enough that it should be formatted in
/// scientific notation.
pub fn should_use_scientific(n: f64) -> bool {
    let abs = n.abs();
    abs <= 1e-6 || abs >= 1e+12
}

/// Returns true if the number is finite and equal to its truncation.
pub fn is_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0
}

/// Rounds a number to the given number of significant digits.
fn round_significant(n: f64, digits: usize) -> f64 {
    format!("{:.*e}", digits.max(1) - 1, n)
        .parse()
        .unwrap_or(n)
}

/// Formats an integral number without a decimal point.
fn fmt_integer(n: f64) -> String {
    if n == 0.0 {
        // avoid `-0`
        return "0".to_string();
    }

    // `Display` for `f64` writes integral values without a fractional part, and never switches
    // to exponent notation
    format!("{}", n)
}

/// Formats a non-finite number. The result is not readable by the tokenizer.
fn fmt_non_finite(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_sign_negative() {
        "-inf".to_string()
    } else {
        "inf".to_string()
    }
}

/// Formats a number using the default options. This is the form written into expressions.
pub fn format(n: f64) -> String {
    format_with(n, FormatOptions::default())
}

/// Formats a number using the given formatting options.
pub fn format_with(n: f64, options: FormatOptions) -> String {
    let n = match options.precision {
        Some(digits) if !is_integer(n) && n.is_finite() => round_significant(n, digits),
        _ => n,
    };

    if !n.is_finite() {
        return fmt_non_finite(n);
    }
    if is_integer(n) {
        return fmt_integer(n);
    }

    let scientific = match options.number {
        NumberFormat::Auto => should_use_scientific(n),
        NumberFormat::Decimal => false,
        NumberFormat::Scientific => true,
    };

    // both forms are the shortest digits that round-trip, with no trailing zeros
    if scientific {
        format!("{:e}", n)
    } else {
        format!("{}", n)
    }
}
