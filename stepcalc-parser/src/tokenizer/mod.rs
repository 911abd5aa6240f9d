pub mod token;

use logos::{Lexer, Logos};
use std::ops::Range;
pub use token::{RawToken, Token, TokenKind};

/// Returns an iterator over the raw lexemes of the input, without any sign handling.
pub fn lex(input: &str) -> Lexer<RawToken> {
    RawToken::lexer(input)
}

/// Splits an expression into numbers and operators, in left-to-right order.
///
/// Whitespace, parentheses and unrecognized characters are skipped; they never produce tokens
/// and are never part of a token's span. Parentheses only affect the [`Token::depth`] of the
/// tokens that follow them.
///
/// `+`, `-`, `*` and `/` are operators only when the most recently emitted token is a number.
/// Otherwise a `+` or `-` becomes the sign of the number literal that immediately follows it (an
/// exponent such as the `-` in `3e-5` is already part of the literal). A sign with no literal
/// directly after it, and a `*` or `/` in operand position, is skipped.
///
/// The tokenizer never fails; malformed input simply produces a token sequence that cannot be
/// reduced.
pub fn tokenize(input: &str) -> Box<[Token]> {
    let mut lexer = lex(input);
    let mut tokens: Vec<Token> = Vec::new();
    let mut depth = 0usize;
    let mut sign: Option<Range<usize>> = None;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let pending_sign = sign.take();
        let Ok(raw) = result else {
            continue;
        };

        match raw {
            RawToken::Number => {
                let start = pending_sign
                    .filter(|sign| sign.end == span.start)
                    .map_or(span.start, |sign| sign.start);
                tokens.push(Token {
                    span: start..span.end,
                    kind: TokenKind::Number,
                    lexeme: &input[start..span.end],
                    depth,
                });
            },
            RawToken::Add | RawToken::Sub | RawToken::Mul | RawToken::Div => {
                let after_number = tokens.last().is_some_and(Token::is_number);
                match raw.as_operator() {
                    Some(op) if after_number => tokens.push(Token {
                        span: span.clone(),
                        kind: TokenKind::Operator(op),
                        lexeme: lexer.slice(),
                        depth,
                    }),
                    _ if matches!(raw, RawToken::Add | RawToken::Sub) => sign = Some(span),
                    _ => (),
                }
            },
            RawToken::OpenParen => depth += 1,
            RawToken::CloseParen => depth = depth.saturating_sub(1),
            RawToken::Whitespace | RawToken::Symbol => (),
        }
    }

    tokens.into_boxed_slice()
}

/// Returns the number of operator tokens in the expression.
pub fn count_operators(input: &str) -> usize {
    tokenize(input)
        .iter()
        .filter(|token| token.as_operator().is_some())
        .count()
}

#[cfg(test)]
mod tests {
    use crate::op::BinOpKind;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the expected `(kind, lexeme, span)`
    /// triples.
    fn compare_tokens<const N: usize>(input: &str, expected: [(TokenKind, &str, Range<usize>); N]) {
        let tokens = tokenize(input);
        let actual = tokens
            .iter()
            .map(|token| (token.kind, token.lexeme, token.span.clone()))
            .collect::<Vec<_>>();
        assert_eq!(actual, expected.to_vec());
    }

    const NUM: TokenKind = TokenKind::Number;

    fn op(kind: BinOpKind) -> TokenKind {
        TokenKind::Operator(kind)
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1+2*3",
            [
                (NUM, "1", 0..1),
                (op(BinOpKind::Add), "+", 1..2),
                (NUM, "2", 2..3),
                (op(BinOpKind::Mul), "*", 3..4),
                (NUM, "3", 4..5),
            ],
        );
    }

    #[test]
    fn whitespace_is_not_part_of_spans() {
        compare_tokens(
            "  12 /  4 ",
            [
                (NUM, "12", 2..4),
                (op(BinOpKind::Div), "/", 5..6),
                (NUM, "4", 8..9),
            ],
        );
    }

    #[test]
    fn leading_sign() {
        compare_tokens(
            "-3.5+2",
            [
                (NUM, "-3.5", 0..4),
                (op(BinOpKind::Add), "+", 4..5),
                (NUM, "2", 5..6),
            ],
        );
    }

    #[test]
    fn sign_after_operator() {
        compare_tokens(
            "2*-3",
            [
                (NUM, "2", 0..1),
                (op(BinOpKind::Mul), "*", 1..2),
                (NUM, "-3", 2..4),
            ],
        );
    }

    #[test]
    fn exponent_is_part_of_literal() {
        compare_tokens(
            "3e-5-1E+2",
            [
                (NUM, "3e-5", 0..4),
                (op(BinOpKind::Sub), "-", 4..5),
                (NUM, "1E+2", 5..9),
            ],
        );
    }

    #[test]
    fn dangling_exponent_marker_is_skipped() {
        compare_tokens(
            "2e*3",
            [
                (NUM, "2", 0..1),
                (op(BinOpKind::Mul), "*", 2..3),
                (NUM, "3", 3..4),
            ],
        );
    }

    #[test]
    fn fractional_forms() {
        compare_tokens(
            ".5*5.",
            [
                (NUM, ".5", 0..2),
                (op(BinOpKind::Mul), "*", 2..3),
                (NUM, "5.", 3..5),
            ],
        );
    }

    #[test]
    fn parentheses_are_skipped() {
        compare_tokens(
            "(3-1)*4",
            [
                (NUM, "3", 1..2),
                (op(BinOpKind::Sub), "-", 2..3),
                (NUM, "1", 3..4),
                (op(BinOpKind::Mul), "*", 5..6),
                (NUM, "4", 6..7),
            ],
        );
    }

    #[test]
    fn sign_inside_parentheses() {
        compare_tokens(
            "1-(-2)",
            [
                (NUM, "1", 0..1),
                (op(BinOpKind::Sub), "-", 1..2),
                (NUM, "-2", 3..5),
            ],
        );
    }

    #[test]
    fn detached_sign_is_skipped() {
        compare_tokens("- 3", [(NUM, "3", 2..3)]);
    }

    #[test]
    fn unknown_characters_are_skipped() {
        compare_tokens(
            "1 + x2 $",
            [
                (NUM, "1", 0..1),
                (op(BinOpKind::Add), "+", 2..3),
                (NUM, "2", 5..6),
            ],
        );
    }

    #[test]
    fn operator_in_operand_position_is_skipped() {
        compare_tokens("*4", [(NUM, "4", 1..2)]);
    }

    #[test]
    fn depth_tracks_parentheses() {
        let tokens = tokenize("1+(2*(3-4))-5)");
        let depths = tokens.iter().map(|token| token.depth).collect::<Vec<_>>();
        assert_eq!(depths, vec![0, 0, 1, 1, 2, 2, 2, 0, 0]);
    }

    #[test]
    fn spans_never_overlap() {
        let tokens = tokenize("1.5e3 * -2 + (4 - -6) / .25");
        for pair in tokens.windows(2) {
            assert!(pair[1].span.start >= pair[0].span.end);
        }
    }

    #[test]
    fn counts_operators() {
        assert_eq!(count_operators("1+2*3+(3-1)*4/2"), 6);
        assert_eq!(count_operators("-7"), 0);
    }
}
