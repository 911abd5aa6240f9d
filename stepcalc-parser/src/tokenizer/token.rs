use crate::op::BinOpKind;
use logos::Logos;
use std::ops::Range;

/// The raw lexemes recognized in an expression, before signs are attached to numbers.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum RawToken {
    #[regex(r"\s+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl RawToken {
    /// Returns the binary operation this lexeme would denote in operator position.
    pub fn as_operator(self) -> Option<BinOpKind> {
        match self {
            Self::Add => Some(BinOpKind::Add),
            Self::Sub => Some(BinOpKind::Sub),
            Self::Mul => Some(BinOpKind::Mul),
            Self::Div => Some(BinOpKind::Div),
            _ => None,
        }
    }
}

/// The kind of a [`Token`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A number literal, including its sign if it has one.
    Number,

    /// A binary operator.
    Operator(BinOpKind),
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,

    /// The number of unclosed parentheses before this token.
    pub depth: usize,
}

impl Token<'_> {
    /// Returns true if the token is a number literal.
    pub fn is_number(&self) -> bool {
        self.kind == TokenKind::Number
    }

    /// Returns the binary operation of the token, if it is an operator.
    pub fn as_operator(&self) -> Option<BinOpKind> {
        match self.kind {
            TokenKind::Operator(op) => Some(op),
            TokenKind::Number => None,
        }
    }
}
