//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`InsufficientData`] thrown when there are too few expenses to fit a trend.
//! - [`InvalidDate`] thrown when a transaction date cannot be parsed.
//! - [`InvalidAmount`] thrown when an amount is not a finite number.
//! - [`Numerical`] thrown when the extrapolated value is not finite.
//!
//!  [`InsufficientData`]: EngineError::InsufficientData
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`Numerical`]: EngineError::Numerical
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq)]
pub enum EngineError {
    #[error("Insufficient data for prediction")]
    InsufficientData { required: usize, actual: usize },
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Numerical error: {0}")]
    Numerical(String),
}
