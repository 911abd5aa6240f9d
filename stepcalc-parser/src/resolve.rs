//! Selection of the single next binary operation to perform.
//!
//! Two rules are available. [`select_next`] is purely syntactic: it ignores parentheses and
//! picks the highest-precedence operator, leftmost first. [`select_next_nested`] also takes the
//! parenthesis depth of each operator into account, so that the innermost group is reduced
//! before anything outside of it.

use crate::{
    op::BinOpKind,
    tokenizer::Token,
};
use log::trace;
use std::{fmt::{self, Display, Formatter}, ops::Range};

/// The next binary operation to perform on an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingOperation {
    /// The operator to apply.
    pub op: BinOpKind,

    /// The literal text of the left operand.
    pub lhs: String,

    /// The literal text of the right operand.
    pub rhs: String,

    /// The region of the expression covering `lhs op rhs`. When [`None`], the result of the
    /// operation replaces the whole expression.
    pub span: Option<Range<usize>>,

    /// The name of the tool that computes the operation.
    pub tool: String,
}

impl PendingOperation {
    /// Creates a pending operation that is computed by the operator's own tool.
    pub fn new(op: BinOpKind, lhs: impl Into<String>, rhs: impl Into<String>, span: Option<Range<usize>>) -> Self {
        Self {
            op,
            lhs: lhs.into(),
            rhs: rhs.into(),
            span,
            tool: op.tool_name().to_string(),
        }
    }

    /// Builds the pending operation for the operator at `index` in `tokens`, covering the span
    /// `span`.
    fn from_tokens(tokens: &[Token], index: usize, span: Range<usize>) -> Option<Self> {
        let op = tokens.get(index)?.as_operator()?;
        let lhs = tokens.get(index.checked_sub(1)?)?;
        let rhs = tokens.get(index + 1)?;
        Some(Self::new(op, lhs.lexeme, rhs.lexeme, Some(span)))
    }
}

impl Display for PendingOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}

/// Returns the operator tokens with their indices.
fn operators<'a>(tokens: &'a [Token<'a>]) -> impl Iterator<Item = (usize, &'a Token<'a>)> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.as_operator().is_some())
}

/// Returns true if the operator at `index` has a number on both sides.
fn has_operands(tokens: &[Token], index: usize) -> bool {
    index > 0
        && tokens[index - 1].is_number()
        && tokens.get(index + 1).is_some_and(Token::is_number)
}

/// Returns the index of the operator with the greatest key. Ties go to the leftmost operator,
/// which makes operators of equal precedence left-associative.
fn leftmost_max<'a, K: Ord>(
    candidates: impl Iterator<Item = (usize, &'a Token<'a>)>,
    key: impl Fn(&Token) -> K,
) -> Option<usize> {
    candidates
        .fold(None, |best: Option<(usize, K)>, (i, token)| {
            let k = key(token);
            let keep = matches!(&best, Some((_, best_key)) if *best_key >= k);
            if keep { best } else { Some((i, k)) }
        })
        .map(|(i, _)| i)
}

/// Selects the next operation under standard precedence and left-associativity, ignoring
/// parentheses.
///
/// Returns [`None`] if there are fewer than three tokens, if there is no operator, or if the
/// selected operator is missing a number on either side. This means the tokens cannot be reduced
/// by this rule, not necessarily that they are a single number.
pub fn select_next(tokens: &[Token]) -> Option<PendingOperation> {
    if tokens.len() < 3 {
        return None;
    }

    let index = leftmost_max(operators(tokens), |token| {
        token.as_operator().map(|op| op.precedence())
    })?;
    if !has_operands(tokens, index) {
        return None;
    }
    let span = tokens[index - 1].span.start..tokens[index + 1].span.end;
    let pending = PendingOperation::from_tokens(tokens, index, span)?;
    trace!("selected `{}` at {:?}", pending, pending.span);
    Some(pending)
}

/// Moves `start` to the left over `levels` opening parentheses, skipping whitespace between them.
/// The result is never moved past whitespace that is not followed by a consumed parenthesis.
fn widen_start(input: &str, start: usize, mut levels: usize) -> usize {
    let bytes = input.as_bytes();
    let (mut cursor, mut committed) = (start, start);
    while levels > 0 && cursor > 0 {
        match bytes[cursor - 1] {
            b'(' => {
                levels -= 1;
                committed = cursor - 1;
            },
            b if b.is_ascii_whitespace() => (),
            _ => break,
        }
        cursor -= 1;
    }
    committed
}

/// Moves `end` to the right over `levels` closing parentheses, skipping whitespace between them.
/// The result is never moved past whitespace that is not preceded by a consumed parenthesis.
fn widen_end(input: &str, end: usize, mut levels: usize) -> usize {
    let bytes = input.as_bytes();
    let (mut cursor, mut committed) = (end, end);
    while levels > 0 && cursor < bytes.len() {
        match bytes[cursor] {
            b')' => {
                levels -= 1;
                committed = cursor + 1;
            },
            b if b.is_ascii_whitespace() => (),
            _ => break,
        }
        cursor += 1;
    }
    committed
}

/// Selects the next operation, resolving the most deeply parenthesized operators first, then by
/// precedence, then leftmost.
///
/// `tokens` must come from tokenizing `input`. If an operand is nested more deeply than its
/// operator (as in `(2)+3`, where the group has already been reduced to a single number), the
/// span is widened over the parentheses enclosing that operand, so that rewriting the span
/// removes them.
pub fn select_next_nested(input: &str, tokens: &[Token]) -> Option<PendingOperation> {
    if tokens.len() < 3 {
        return None;
    }

    let index = leftmost_max(operators(tokens), |token| {
        (token.depth, token.as_operator().map(|op| op.precedence()))
    })?;
    if !has_operands(tokens, index) {
        return None;
    }
    let (lhs, op, rhs) = (&tokens[index - 1], &tokens[index], &tokens[index + 1]);
    let start = widen_start(input, lhs.span.start, lhs.depth.saturating_sub(op.depth));
    let end = widen_end(input, rhs.span.end, rhs.depth.saturating_sub(op.depth));
    let pending = PendingOperation::from_tokens(tokens, index, start..end)?;
    trace!("selected `{}` at {:?} (depth {})", pending, pending.span, op.depth);
    Some(pending)
}
