//! Reduces an arithmetic expression to a single number through a sequence of observable,
//! single-operation steps.
//!
//! Each step asks a [`Collaborator`] which operation comes next, asks it again to compute that
//! operation, and substitutes the formatted result back into the expression text. Every
//! intermediate expression is recorded, so a finished [`Reduction`] always carries the full
//! history leading to its result or its error.
//!
//! # Example
//!
//! ```
//! use stepcalc_compute::reduce::Reducer;
//!
//! let reduction = Reducer::default().run("1+2*3");
//! assert_eq!(reduction.history, ["1+2*3", "1+6", "7"]);
//! assert_eq!(reduction.result.as_deref(), Some("7"));
//! ```
//!
//! [`Collaborator`]: collab::Collaborator
//! [`Reduction`]: reduce::Reduction

pub mod collab;
pub mod fmt;
pub mod reduce;
pub mod step_collector;
pub mod tools;
pub mod wire;

pub use collab::{Collaborator, ComputeError, Deterministic, Resolution, Scripted};
pub use reduce::{Reducer, Reduction, ReduceOptions, ReduceOptionsBuilder, Seed, Summary};
