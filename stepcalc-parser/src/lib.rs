//! Lexical and textual machinery for reducing an arithmetic expression one operation at a time.
//!
//! The pieces are small and pure:
//!
//! - [`tokenizer`] splits an expression into numbers and operators with source spans,
//! - [`resolve`] picks the single next binary operation to perform,
//! - [`rewrite`] substitutes a computed value back into the expression text,
//! - [`literal`] recognizes and parses the number grammar shared by all of the above,
//! - [`validate`] performs an optional, permissive character check.

pub mod error;
pub mod literal;
pub mod op;
pub mod resolve;
pub mod rewrite;
pub mod tokenizer;
pub mod validate;

pub use literal::{is_single_number, parse_number};
pub use op::{Associativity, BinOpKind, Precedence};
pub use resolve::{select_next, select_next_nested, PendingOperation};
pub use rewrite::rewrite;
pub use tokenizer::{tokenize, Token, TokenKind};
pub use validate::validate_expression;
