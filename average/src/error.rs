use thiserror::Error;

/// Errors raised by the estimators. Every one of them is reported before any
/// state is touched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AverageError {
    #[error("input must be a number or a numeric array, got {0}")]
    InvalidType(String),
    #[error("shape of input {found:?} must match shape of running average {expected:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    #[error("smoothing factor beta must be in (0, 1], got {0}")]
    InvalidBeta(f64),
    #[error("decay exponent eta must be finite, got {0}")]
    InvalidEta(f64),
}

pub type Result<T, E = AverageError> = std::result::Result<T, E>;
