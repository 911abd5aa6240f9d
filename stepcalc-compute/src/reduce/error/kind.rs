use ariadne::Fmt;
use stepcalc_attrs::ErrorKind;
use stepcalc_error::{ErrorKind, EXPR};

/// The decision step could not produce a well-formed operation for an expression that is not yet
/// a single number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("could not decide the next operation: {}", reason),
    labels = ["in this expression"],
    help = "only `+`, `-`, `*` and `/` between two numbers can be reduced",
)]
pub struct DecisionFailure {
    /// Why no operation could be decided.
    pub reason: String,
}

/// The computation step reported an error, or did not return a usable number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("computation failed: {}", reason),
    labels = ["while computing this operation"],
)]
pub struct ComputationFailure {
    /// The error reported by the tool, passed through unchanged.
    pub reason: String,
}

/// The decided operation was routed to a tool that does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` tool does not exist", name),
    labels = ["this operation"],
    help = if suggestions.is_empty() {
        format!("the available tools are {}", "add, sub, mul, div".fg(EXPR))
    } else if suggestions.len() == 1 {
        format!("did you mean the `{}` tool?", (&*suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these tools? {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UnknownTool {
    /// The requested tool name.
    pub name: String,

    /// The names of existing tools that are similar to the requested name.
    pub suggestions: Vec<String>,
}

/// The reduction did not finish within the configured number of steps.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("reduction did not finish within {} steps", max_steps),
    labels = ["this expression was still not reduced"],
    help = "each step should remove exactly one operator from the expression",
)]
pub struct StepBudgetExceeded {
    /// The step budget that was exceeded.
    pub max_steps: usize,
}
