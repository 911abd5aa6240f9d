pub mod kind;

pub use stepcalc_error::Error;
