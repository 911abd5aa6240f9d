//! The two external steps of a reduction, deciding and computing, behind a single interface.
//!
//! A [`Reducer`] only talks to its collaborator through [`Collaborator::decide`] and
//! [`Collaborator::compute`], so the same loop works whether those steps are served by the
//! built-in precedence rules ([`Deterministic`]) or by an outside service whose responses are
//! decoded from JSON ([`Scripted`] replays such responses).
//!
//! [`Reducer`]: crate::reduce::Reducer

mod deterministic;
mod scripted;

use std::fmt::{self, Display, Formatter};
use stepcalc_parser::PendingOperation;

pub use deterministic::{Deterministic, Resolution};
pub use scripted::Scripted;

/// A failed computation.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputeError {
    /// The tool ran and reported an error, such as division by zero.
    Tool(String),

    /// No tool with the given name exists.
    UnknownTool {
        /// The requested tool name.
        name: String,

        /// The names of existing tools that are similar to the requested name.
        suggestions: Vec<String>,
    },

    /// The response did not contain a usable numeric value.
    Malformed(String),
}

impl Display for ComputeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tool(message) | Self::Malformed(message) => write!(f, "{}", message),
            Self::UnknownTool { name, .. } => write!(f, "unknown tool `{}`", name),
        }
    }
}

/// Serves the decision and computation steps of a reduction.
pub trait Collaborator {
    /// Decides the next operation to perform on `expression`, or explains why none can be found.
    fn decide(&mut self, expression: &str) -> Result<PendingOperation, String>;

    /// Computes the operation routed to the tool named `tool`.
    fn compute(&mut self, tool: &str, lhs: f64, rhs: f64) -> Result<f64, ComputeError>;
}

impl<C: Collaborator + ?Sized> Collaborator for &mut C {
    fn decide(&mut self, expression: &str) -> Result<PendingOperation, String> {
        (**self).decide(expression)
    }

    fn compute(&mut self, tool: &str, lhs: f64, rhs: f64) -> Result<f64, ComputeError> {
        (**self).compute(tool, lhs, rhs)
    }
}

impl<C: Collaborator + ?Sized> Collaborator for Box<C> {
    fn decide(&mut self, expression: &str) -> Result<PendingOperation, String> {
        (**self).decide(expression)
    }

    fn compute(&mut self, tool: &str, lhs: f64, rhs: f64) -> Result<f64, ComputeError> {
        (**self).compute(tool, lhs, rhs)
    }
}
