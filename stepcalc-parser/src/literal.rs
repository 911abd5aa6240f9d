//! The number grammar: an optional sign, digits with an optional fractional part (at least one
//! digit on either side of the dot), and an optional exponent.

use crate::tokenizer::tokenize;

/// Returns true if the expression is exactly one number literal, ignoring surrounding
/// whitespace.
///
/// `7`, `-3.5`, `+.5` and `2e10` are single numbers; `(7)`, `1+2` and `--3` are not.
pub fn is_single_number(expr: &str) -> bool {
    let trimmed = expr.trim();
    match &*tokenize(trimmed) {
        [token] => token.is_number() && token.span == (0..trimmed.len()),
        _ => false,
    }
}

/// Parses a number literal into its value. Returns [`None`] if the text is not exactly one
/// number literal.
pub fn parse_number(text: &str) -> Option<f64> {
    if !is_single_number(text) {
        return None;
    }

    text.trim().parse().ok()
}
