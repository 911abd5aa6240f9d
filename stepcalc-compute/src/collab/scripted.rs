use crate::wire::{decode_decision, decode_tool_result};
use std::collections::VecDeque;
use stepcalc_parser::PendingOperation;
use super::{Collaborator, ComputeError};

/// A collaborator that replays recorded JSON responses in order.
///
/// Each call to [`Collaborator::decide`] consumes the next decision response, and each call to
/// [`Collaborator::compute`] consumes the next tool result. The responses are decoded with the
/// [`wire`](crate::wire) module, exactly as a live service's responses would be.
#[derive(Debug, Default, Clone)]
pub struct Scripted {
    decisions: VecDeque<String>,
    results: VecDeque<String>,
}

impl Scripted {
    /// Creates a collaborator that replays the given responses.
    pub fn new<D, R>(decisions: D, results: R) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            decisions: decisions.into_iter().map(Into::into).collect(),
            results: results.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if every recorded response has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.decisions.is_empty() && self.results.is_empty()
    }
}

impl Collaborator for Scripted {
    fn decide(&mut self, _: &str) -> Result<PendingOperation, String> {
        let text = self.decisions
            .pop_front()
            .ok_or_else(|| "no decision responses left".to_string())?;
        decode_decision(&text)
    }

    fn compute(&mut self, _: &str, _: f64, _: f64) -> Result<f64, ComputeError> {
        let text = self.results
            .pop_front()
            .ok_or_else(|| ComputeError::Malformed("no tool results left".to_string()))?;
        decode_tool_result(&text)
    }
}
