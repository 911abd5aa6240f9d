pub mod kind;

pub use stepcalc_error::Error;
pub use stepcalc_parser::error::kind::{EmptyExpression, InvalidCharacter, RewriteFailure};
