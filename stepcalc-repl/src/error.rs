use rustyline::error::ReadlineError;
use std::{fmt::{self, Display, Formatter}, io};

/// Utility enum to package errors that stop the program outside of a reduction.
///
/// Errors that end a reduction are part of its [`Reduction`](stepcalc_compute::Reduction) and are
/// reported separately.
#[derive(Debug)]
pub enum Error {
    /// The input could not be read, or the output could not be written.
    Io(io::Error),

    /// The interactive line editor failed.
    Readline(ReadlineError),

    /// A summary could not be serialized.
    Json(serde_json::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{}", err),
            Self::Readline(err) => write!(f, "{}", err),
            Self::Json(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ReadlineError> for Error {
    fn from(err: ReadlineError) -> Self {
        Self::Readline(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
