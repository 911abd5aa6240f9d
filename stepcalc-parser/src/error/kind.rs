use ariadne::Fmt;
use stepcalc_attrs::ErrorKind;
use stepcalc_error::{ErrorKind, EXPR};

/// There was no expression to work on.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is empty",
    labels = ["add an expression here"],
    help = format!("try something like {}", "1+2*3".fg(EXPR)),
)]
pub struct EmptyExpression;

/// A character outside the permitted set was found while validating an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expression contains invalid character `{}`", found),
    labels = ["this character"],
    help = format!(
        "only digits, {}, `.`, `e`, parentheses and whitespace are allowed",
        "+ - * /".fg(EXPR),
    ),
)]
pub struct InvalidCharacter {
    /// The offending character.
    pub found: char,
}

/// Substituting a value into the expression failed because the span does not describe a valid
/// region of the expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expression update failed: {}", reason),
    labels = ["while rewriting this region"],
)]
pub struct RewriteFailure {
    /// Why the span could not be used.
    pub reason: String,
}
