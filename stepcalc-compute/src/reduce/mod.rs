//! The reduction loop.
//!
//! A run is a small state machine over a [`ReductionState`]:
//!
//! ```text
//! Start -> AwaitDecision -> AwaitCompute -> Rewrite -> AwaitDecision -> ... -> Done
//! ```
//!
//! [`Reducer::step`] advances the state by exactly one transition, which is useful when the caller
//! wants to interleave its own work between steps. [`Reducer::run`] drives the machine to a
//! terminal [`Phase::Done`] and returns the finished [`Reduction`].
//!
//! Every failure ends the run immediately. The history recorded up to that point is kept, and the
//! error describes which step failed and why.

pub mod error;
mod options;

pub use options::{ReduceOptions, ReduceOptionsBuilder, DEFAULT_MAX_STEPS};

use crate::{
    collab::{Collaborator, ComputeError, Deterministic},
    fmt::{format, format_with},
    step_collector::StepCollector,
};
use error::{
    kind::{ComputationFailure, DecisionFailure, StepBudgetExceeded, UnknownTool},
    EmptyExpression,
    Error,
};
use log::{debug, info, warn};
use serde::Serialize;
use std::{io, ops::Range};
use stepcalc_parser::{is_single_number, parse_number, rewrite, validate_expression, PendingOperation};

/// The input of a reduction run.
#[derive(Debug, Clone, PartialEq)]
pub enum Seed {
    /// No input was given. The configured default expression is used instead.
    Missing,

    /// A single expression to reduce.
    Expression(String),

    /// The history of an earlier run. Reduction resumes from its last snapshot.
    History(Vec<String>),
}

impl Seed {
    /// Returns the initial history described by this seed. Empty input gives an empty history.
    fn into_history(self) -> Vec<String> {
        match self {
            Self::Missing => Vec::new(),
            Self::Expression(expr) if expr.trim().is_empty() => Vec::new(),
            Self::Expression(expr) => vec![expr],
            Self::History(history) => history,
        }
    }
}

impl From<&str> for Seed {
    fn from(expr: &str) -> Self {
        Self::Expression(expr.to_string())
    }
}

impl From<String> for Seed {
    fn from(expr: String) -> Self {
        Self::Expression(expr)
    }
}

impl From<Vec<String>> for Seed {
    fn from(history: Vec<String>) -> Self {
        Self::History(history)
    }
}

impl<T: Into<Seed>> From<Option<T>> for Seed {
    fn from(seed: Option<T>) -> Self {
        seed.map_or(Self::Missing, Into::into)
    }
}

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The expression was reduced to a single number.
    Success,

    /// The run stopped with an error.
    Error,
}

/// The current phase of a reduction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The input has not been normalized yet.
    Start,

    /// The next operation must be decided for the latest snapshot.
    AwaitDecision,

    /// The decided operation must be computed.
    AwaitCompute,

    /// The computed value must be written into the latest snapshot.
    Rewrite,

    /// The run is finished. No further transitions happen.
    Done(Outcome),
}

/// The evolving record of a single reduction run.
#[derive(Debug)]
pub struct ReductionState {
    /// Every expression snapshot, oldest first.
    history: Vec<String>,

    /// The operation decided for the latest snapshot, if any.
    pending: Option<PendingOperation>,

    /// The computed value of the pending operation, if any.
    value: Option<f64>,

    /// The error that ended the run.
    error: Option<Error>,

    /// The current phase of the run.
    phase: Phase,

    /// The number of completed rewrite steps.
    steps: usize,

    /// The input, consumed when the run starts.
    seed: Option<Seed>,
}

impl ReductionState {
    /// Creates the state of a run that has not started yet.
    fn new(seed: Seed) -> Self {
        Self {
            history: Vec::new(),
            pending: None,
            value: None,
            error: None,
            phase: Phase::Start,
            steps: 0,
            seed: Some(seed),
        }
    }

    /// Returns every expression snapshot recorded so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Returns the operation decided for the latest snapshot, if any.
    pub fn pending(&self) -> Option<&PendingOperation> {
        self.pending.as_ref()
    }

    /// Returns the error that ended the run, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Returns the current phase of the run.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the number of completed rewrite steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the latest snapshot, or an empty string if the run has not started.
    pub fn current(&self) -> &str {
        self.history.last().map_or("", String::as_str)
    }

    /// Returns true if the run is finished.
    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done(_))
    }

    /// Records the error that ends the run.
    fn fail(&mut self, error: Error) -> Phase {
        warn!("reduction of `{}` failed: {}", self.current(), error.message());
        self.error = Some(error);
        self.pending = None;
        self.value = None;
        Phase::Done(Outcome::Error)
    }

    /// Returns the region of the latest snapshot that an error about the pending operation should
    /// highlight.
    fn highlight(&self) -> Range<usize> {
        let len = self.current().len();
        match self.pending.as_ref().and_then(|pending| pending.span.as_ref()) {
            Some(span) => span.start.min(span.end).min(len)..span.end.max(span.start).min(len),
            None => 0..len,
        }
    }

    /// Consumes the state, returning the outcome of the run.
    fn into_reduction(self) -> Reduction {
        let result = match (self.phase, &self.error) {
            (Phase::Done(Outcome::Success), None) => self.history.last().cloned(),
            _ => None,
        };
        Reduction {
            history: self.history,
            result,
            error: self.error,
            steps: self.steps,
        }
    }
}

/// Parses both operands of a pending operation.
fn operands(pending: &PendingOperation) -> Result<(f64, f64), String> {
    let parse = |text: &str| parse_number(text).ok_or_else(|| format!("`{}` is not a number", text));
    Ok((parse(&pending.lhs)?, parse(&pending.rhs)?))
}

/// Drives reduction runs with a given [`Collaborator`].
#[derive(Debug)]
pub struct Reducer<C = Deterministic> {
    /// The options applied to every run.
    options: ReduceOptions,

    /// The collaborator that decides and computes each step.
    collaborator: C,
}

impl Reducer<Deterministic> {
    /// Creates a reducer with the given options, using the [`Deterministic`] collaborator.
    pub fn with_options(options: ReduceOptions) -> Self {
        Self::new(options, Deterministic::default())
    }
}

impl Default for Reducer<Deterministic> {
    fn default() -> Self {
        Self::with_options(ReduceOptions::default())
    }
}

impl<C: Collaborator> Reducer<C> {
    /// Creates a reducer with the given options and collaborator.
    pub fn new(options: ReduceOptions, collaborator: C) -> Self {
        Self { options, collaborator }
    }

    /// Returns the options of this reducer.
    pub fn options(&self) -> &ReduceOptions {
        &self.options
    }

    /// Returns a mutable reference to the collaborator of this reducer.
    pub fn collaborator_mut(&mut self) -> &mut C {
        &mut self.collaborator
    }

    /// Creates the state of a new run, which can be advanced with [`Reducer::step`].
    pub fn start(&self, seed: impl Into<Seed>) -> ReductionState {
        ReductionState::new(seed.into())
    }

    /// Advances the run by one transition, returning the new phase. Finished runs are left
    /// untouched.
    pub fn step(
        &mut self,
        state: &mut ReductionState,
        collector: &mut impl StepCollector<String>,
    ) -> Phase {
        let next = match state.phase {
            Phase::Start => self.begin(state, collector),
            Phase::AwaitDecision => self.decide(state),
            Phase::AwaitCompute => self.compute(state),
            Phase::Rewrite => self.apply(state, collector),
            done @ Phase::Done(_) => done,
        };
        state.phase = next;
        next
    }

    /// Reduces the given input to completion.
    pub fn run(&mut self, seed: impl Into<Seed>) -> Reduction {
        self.run_with(seed, &mut ())
    }

    /// Reduces the given input to completion, pushing every snapshot to `collector` as it is
    /// recorded.
    pub fn run_with(
        &mut self,
        seed: impl Into<Seed>,
        collector: &mut impl StepCollector<String>,
    ) -> Reduction {
        let mut state = self.start(seed);
        while !state.is_done() {
            self.step(&mut state, collector);
        }

        let reduction = state.into_reduction();
        match &reduction.result {
            Some(result) => info!("reduced to `{}` in {} steps", result, reduction.steps),
            None => info!("reduction stopped after {} steps", reduction.steps),
        }
        reduction
    }

    /// Normalizes the input into the initial history.
    fn begin(&mut self, state: &mut ReductionState, collector: &mut impl StepCollector<String>) -> Phase {
        let mut history = state.seed
            .take()
            .unwrap_or(Seed::Missing)
            .into_history();

        if history.is_empty() {
            match &self.options.default_expression {
                Some(default) => history.push(default.clone()),
                None => return state.fail(Error::new(vec![0..0], EmptyExpression)),
            }
        }

        for snapshot in &history {
            collector.push(snapshot.clone());
        }
        state.history = history;
        info!("reducing `{}`", state.current());

        if self.options.strict {
            if let Err(err) = validate_expression(state.current()) {
                return state.fail(err);
            }
        }

        Phase::AwaitDecision
    }

    /// Decides the next operation, or finishes the run if the latest snapshot is a single number.
    fn decide(&mut self, state: &mut ReductionState) -> Phase {
        let current = state.current().to_string();
        let whole = 0..current.len();

        if is_single_number(&current) {
            return Phase::Done(Outcome::Success);
        }

        if state.steps >= self.options.max_steps {
            let max_steps = self.options.max_steps;
            return state.fail(Error::new(vec![whole], StepBudgetExceeded { max_steps }));
        }

        let pending = match self.collaborator.decide(&current) {
            Ok(pending) => pending,
            Err(reason) => return state.fail(Error::new(vec![whole], DecisionFailure { reason })),
        };

        if let Err(reason) = operands(&pending) {
            return state.fail(Error::new(vec![whole], DecisionFailure { reason }));
        }

        debug!("step {}: `{}` in `{}`", state.steps + 1, pending, current);
        state.pending = Some(pending);
        Phase::AwaitCompute
    }

    /// Computes the pending operation.
    fn compute(&mut self, state: &mut ReductionState) -> Phase {
        let highlight = state.highlight();
        let Some(pending) = state.pending.clone() else {
            let reason = "no operation was decided".to_string();
            return state.fail(Error::new(vec![highlight], DecisionFailure { reason }));
        };
        let (lhs, rhs) = match operands(&pending) {
            Ok(operands) => operands,
            Err(reason) => return state.fail(Error::new(vec![highlight], DecisionFailure { reason })),
        };

        match self.collaborator.compute(&pending.tool, lhs, rhs) {
            Ok(value) if value.is_finite() => {
                debug!("step {}: `{}` = {}", state.steps + 1, pending, value);
                state.value = Some(value);
                Phase::Rewrite
            },
            Ok(value) => {
                let reason = format!("`{}` is not a finite number", format(value));
                state.fail(Error::new(vec![highlight], ComputationFailure { reason }))
            },
            Err(ComputeError::Tool(reason) | ComputeError::Malformed(reason)) => {
                state.fail(Error::new(vec![highlight], ComputationFailure { reason }))
            },
            Err(ComputeError::UnknownTool { name, suggestions }) => {
                state.fail(Error::new(vec![highlight], UnknownTool { name, suggestions }))
            },
        }
    }

    /// Writes the computed value into the latest snapshot, recording the result as a new snapshot.
    fn apply(&mut self, state: &mut ReductionState, collector: &mut impl StepCollector<String>) -> Phase {
        let highlight = state.highlight();
        let (Some(pending), Some(value)) = (state.pending.take(), state.value.take()) else {
            let reason = "no value was computed".to_string();
            return state.fail(Error::new(vec![highlight], ComputationFailure { reason }));
        };

        let formatted = format_with(value, self.options.format);
        let next = match pending.span {
            Some(span) => match rewrite(state.current(), span, &formatted) {
                Ok(next) => next,
                Err(err) => return state.fail(err),
            },
            None => formatted,
        };

        debug!("step {}: `{}` -> `{}`", state.steps + 1, state.current(), next);
        collector.push(next.clone());
        state.history.push(next);
        state.steps += 1;
        Phase::AwaitDecision
    }
}

/// The outcome of a finished reduction run.
#[derive(Debug)]
pub struct Reduction {
    /// Every expression snapshot, oldest first. The last snapshot is the result on success, or the
    /// expression that could not be reduced further on error.
    pub history: Vec<String>,

    /// The final number, present only if the run succeeded.
    pub result: Option<String>,

    /// The error that ended the run, if any.
    pub error: Option<Error>,

    /// The number of completed rewrite steps.
    pub steps: usize,
}

impl Reduction {
    /// Returns true if the run reduced the expression to a single number.
    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    /// Returns the human-readable cause of the error, if the run failed.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(Error::message)
    }

    /// Returns the snapshot that the error's spans point into.
    pub fn failed_expression(&self) -> Option<&str> {
        self.error.as_ref()?;
        Some(self.history.last().map_or("", String::as_str))
    }

    /// Writes the report of the error to the given writer, if the run failed.
    pub fn write_report<W: io::Write>(&self, src_id: &str, writer: W) -> io::Result<()> {
        match (&self.error, self.failed_expression()) {
            (Some(error), Some(input)) => error.write_report(src_id, input, writer),
            _ => Ok(()),
        }
    }

    /// Returns a serializable summary of the run.
    pub fn summary(&self) -> Summary {
        Summary {
            expression: self.history.first().cloned(),
            result: self.result.clone(),
            history: self.history.clone(),
            error: self.error_message(),
            steps: self.steps,
        }
    }
}

/// A plain summary of a [`Reduction`], suitable for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// The first snapshot of the run.
    pub expression: Option<String>,

    /// The final number, present only if the run succeeded.
    pub result: Option<String>,

    /// Every expression snapshot, oldest first.
    pub history: Vec<String>,

    /// The human-readable cause of the error, if the run failed.
    pub error: Option<String>,

    /// The number of completed rewrite steps.
    pub steps: usize,
}
