//! Error types for elegir operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for elegir operations.
///
/// Distinguishes unrecoverable setup mistakes (`InvalidConfiguration`,
/// `DimensionMismatch`) from the one recoverable runtime condition
/// (`DegenerateEvidence`) and detected floating-point breakdowns
/// (`NumericalInstability`). No operation in this crate retries; every
/// computation is deterministic, so a failed call fails identically when
/// repeated with the same state.
///
/// # Examples
///
/// ```
/// use elegir::error::ElegirError;
///
/// let err = ElegirError::DimensionMismatch {
///     expected: "3 basis functions".to_string(),
///     actual: "row of width 2".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum ElegirError {
    /// Bad constructor arguments: non-positive or non-finite observation
    /// noise, an empty hypothesis collection, or an invalid prior mass.
    /// Fatal; raised at construction and never recovered internally.
    InvalidConfiguration {
        /// What was wrong with the configuration
        message: String,
    },

    /// Shapes don't match: a hypothesis produced a design row whose width
    /// differs from its declared dimension, or operands are incompatible.
    /// Fatal per call; the engine state is left untouched.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Every hypothesis's evidence was zero or non-finite, so the posterior
    /// probabilities could not be normalized. Recoverable: the caller may
    /// keep the previous distribution or substitute a uniform one.
    DegenerateEvidence {
        /// The normalization sum that failed (zero, infinite, or NaN)
        sum: f64,
    },

    /// A floating-point breakdown was detected (singular precision matrix,
    /// failed Cholesky factorization, non-finite determinant) instead of
    /// letting NaN propagate silently.
    NumericalInstability {
        /// Operation that detected the fault
        context: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for ElegirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElegirError::InvalidConfiguration { message } => {
                write!(f, "Invalid configuration: {message}")
            }
            ElegirError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            ElegirError::DegenerateEvidence { sum } => {
                write!(
                    f,
                    "Degenerate evidence: normalization sum = {sum}, probabilities undefined"
                )
            }
            ElegirError::NumericalInstability { context } => {
                write!(f, "Numerical instability detected in {context}")
            }
            ElegirError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ElegirError {}

impl From<&str> for ElegirError {
    fn from(msg: &str) -> Self {
        ElegirError::Other(msg.to_string())
    }
}

impl From<String> for ElegirError {
    fn from(msg: String) -> Self {
        ElegirError::Other(msg)
    }
}

impl ElegirError {
    /// Create an invalid configuration error
    #[must_use]
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a numerical instability error naming the failed operation
    #[must_use]
    pub fn numerical(context: impl Into<String>) -> Self {
        Self::NumericalInstability {
            context: context.into(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, ElegirError>;
