use crate::tools::{self, Tool};
use std::collections::HashMap;
use stepcalc_parser::{select_next, select_next_nested, tokenize, PendingOperation};
use super::{Collaborator, ComputeError};

/// Which rule the [`Deterministic`] collaborator uses to pick the next operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Innermost parenthesized group first, then by precedence, then leftmost. See
    /// [`select_next_nested`].
    ///
    /// This is the default option.
    #[default]
    Nested,

    /// Precedence then leftmost, ignoring parentheses. See [`select_next`].
    Flat,
}

/// A collaborator that decides with the precedence rules of the parser and computes with the
/// built-in [`tools`].
#[derive(Debug)]
pub struct Deterministic {
    /// The rule used to pick the next operation.
    resolution: Resolution,

    /// The tools available for computation, keyed by name.
    tools: HashMap<&'static str, Box<dyn Tool>>,
}

impl Deterministic {
    /// Creates a deterministic collaborator using the given resolution rule.
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            tools: tools::all(),
        }
    }

    /// Returns the resolution rule of this collaborator.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }
}

impl Default for Deterministic {
    fn default() -> Self {
        Self::new(Resolution::default())
    }
}

impl Collaborator for Deterministic {
    fn decide(&mut self, expression: &str) -> Result<PendingOperation, String> {
        let tokens = tokenize(expression);
        let pending = match self.resolution {
            Resolution::Nested => select_next_nested(expression, &tokens),
            Resolution::Flat => select_next(&tokens),
        };
        pending.ok_or_else(|| format!("no reducible operation in `{}`", expression))
    }

    fn compute(&mut self, tool: &str, lhs: f64, rhs: f64) -> Result<f64, ComputeError> {
        match self.tools.get(tool) {
            Some(found) => found.eval(lhs, rhs).map_err(ComputeError::Tool),
            None => Err(ComputeError::UnknownTool {
                name: tool.to_string(),
                suggestions: tools::similar(self.tools.keys().copied(), tool),
            }),
        }
    }
}
