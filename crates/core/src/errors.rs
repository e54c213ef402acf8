//! Core error types for the dashboard computation engine.
//!
//! Malformed input data never produces an error in this crate: parse
//! failures degrade to `None`, referential gaps surface as visible states
//! (unpriced holdings, `UNKNOWN` buckets) and configuration inconsistencies
//! are attached to results as warnings. The variants here cover the only
//! fatal cases: violated preconditions on the recurrence math and failures
//! reported by an external row store implementation.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the computation engine.
#[derive(Error, Debug)]
pub enum Error {
    /// An indicator was configured with a period of zero. This is a
    /// programmer error, not a data error.
    #[error("Invalid indicator period: {0}")]
    InvalidPeriod(usize),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Propagated from an external row store implementation.
    #[error("Row store error: {0}")]
    Store(String),
}

/// Validation errors for input parsing helpers.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
