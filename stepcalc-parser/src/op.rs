//! Binary operators, their precedence, and the names of the tools that compute them.

use std::fmt::{self, Display, Formatter};

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The binary operation is left-associative.
    ///
    /// This means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary operation is right-associative.
    ///
    /// This means `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of a binary operation. Operations with higher precedence are resolved first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Precedence {
    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term = 1,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor = 2,
}

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOpKind {
    /// All binary operations, in the order their tools are usually listed.
    pub const ALL: [BinOpKind; 4] = [Self::Add, Self::Sub, Self::Mul, Self::Div];

    /// Returns the binary operation written with the given symbol.
    ///
    /// Both the ASCII symbols and the typographic `×`, `÷` and `−` are accepted.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "+" => Some(Self::Add),
            "-" | "−" => Some(Self::Sub),
            "*" | "×" => Some(Self::Mul),
            "/" | "÷" => Some(Self::Div),
            _ => None,
        }
    }

    /// Returns the ASCII symbol of the binary operation.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    /// Returns the canonical name of the tool that computes this operation.
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        }
    }

    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div => Associativity::Left,
        }
    }
}

impl Display for BinOpKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
