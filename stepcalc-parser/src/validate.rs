use crate::error::{kind::{EmptyExpression, InvalidCharacter}, Error};

/// Returns true if the character may appear in an expression.
fn is_allowed(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_whitespace()
        || matches!(c, '+' | '-' | '*' | '/' | '.' | 'e' | 'E' | '(' | ')')
}

/// Performs a permissive check of the characters of an expression.
///
/// This is not a grammar check: `1++` and `)(` pass. It only rejects blank expressions and
/// characters that can never be part of an arithmetic expression.
pub fn validate_expression(expr: &str) -> Result<(), Error> {
    if expr.trim().is_empty() {
        return Err(Error::new(vec![0..expr.len()], EmptyExpression));
    }

    match expr.char_indices().find(|(_, c)| !is_allowed(*c)) {
        Some((i, found)) => Err(Error::new(vec![i..i + found.len_utf8()], InvalidCharacter { found })),
        None => Ok(()),
    }
}
