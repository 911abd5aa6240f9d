//! The computation tools, one per binary operator.
//!
//! Each tool is a unit `struct` implementing [`Tool`], and is registered under its canonical name
//! in [`all`]. Pending operations are routed to tools by that name.

use levenshtein::levenshtein;
use std::{collections::HashMap, fmt::Debug};

/// A named binary computation over two numbers.
pub trait Tool: Debug + Send + Sync {
    /// The canonical name of the tool, such as `add`.
    fn name(&self) -> &'static str;

    /// Applies the tool to the operands, returning an error message if the computation is not
    /// defined for them.
    fn eval(&self, lhs: f64, rhs: f64) -> Result<f64, String>;
}

/// Build a tool that cannot fail.
macro_rules! build_tool {
    ($($name:literal $upname:ident $op:tt; $doc:literal),* $(,)?) => {
        $(
            #[doc = $doc]
            #[derive(Debug)]
            pub struct $upname;

            impl Tool for $upname {
                fn name(&self) -> &'static str {
                    $name
                }

                fn eval(&self, lhs: f64, rhs: f64) -> Result<f64, String> {
                    Ok(lhs $op rhs)
                }
            }
        )*
    };
}

build_tool! {
    "add" Add +; "Returns `lhs + rhs`.",
    "sub" Sub -; "Returns `lhs - rhs`.",
    "mul" Mul *; "Returns `lhs * rhs`.",
}

/// Returns `lhs / rhs`, or an error if `rhs` is zero.
#[derive(Debug)]
pub struct Div;

impl Tool for Div {
    fn name(&self) -> &'static str {
        "div"
    }

    fn eval(&self, lhs: f64, rhs: f64) -> Result<f64, String> {
        if rhs == 0.0 {
            return Err("division by zero".to_string());
        }
        Ok(lhs / rhs)
    }
}

/// Returns all tools, keyed by name.
pub fn all() -> HashMap<&'static str, Box<dyn Tool>> {
    let tools: [Box<dyn Tool>; 4] = [Box::new(Add), Box::new(Sub), Box::new(Mul), Box::new(Div)];
    tools.into_iter().map(|tool| (tool.name(), tool)).collect()
}

/// Returns the names of all tools with a name similar to the given name.
pub fn similar<'a>(names: impl IntoIterator<Item = &'a str>, name: &str) -> Vec<String> {
    let mut similar = names
        .into_iter()
        .filter(|n| levenshtein(n, name) < 2)
        .map(str::to_string)
        .collect::<Vec<_>>();
    similar.sort();
    similar
}
