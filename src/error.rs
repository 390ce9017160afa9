//! Error types for textbayes operations.
//!
//! Provides rich error context for library consumers.

use thiserror::Error;

/// Main error type for classifier operations.
///
/// Precondition violations (bad hyperparameters, zero-length documents,
/// empty label sets) fail at the call boundary. Values are never clamped.
///
/// # Examples
///
/// ```
/// use textbayes::error::BayesError;
///
/// let err = BayesError::invalid_alpha(-1.0);
/// assert!(err.to_string().contains("alpha"));
/// ```
#[derive(Debug, Error)]
pub enum BayesError {
    /// Invalid hyperparameter value provided.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A probability value outside its valid domain.
    #[error("Invalid probability {value}: {reason}")]
    InvalidProbability {
        /// Offending value
        value: f64,
        /// Violated constraint
        reason: &'static str,
    },

    /// Empirical probability requested for a document of length zero.
    #[error("Cannot compute an unsmoothed probability for a zero-length document")]
    ZeroLength,

    /// Equal-distribution prior requested with no known labels.
    #[error("Cannot compute a prior over zero labels")]
    NoLabels,

    /// Label is not known to the corpus or prior.
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// A conditional probability collapsed to zero, so its logarithm is undefined.
    ///
    /// Happens with `alpha = 0` and an observation never seen for the label.
    #[error("Degenerate probability: P({observation}|{label}) is zero, log is undefined (use alpha > 0)")]
    DegenerateProbability {
        /// Observation display form
        observation: String,
        /// Label name
        label: String,
    },

    /// Configuration could not be parsed or failed validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with string message.
    #[error("{0}")]
    Other(String),
}

impl From<String> for BayesError {
    fn from(msg: String) -> Self {
        BayesError::Other(msg)
    }
}

impl From<serde_json::Error> for BayesError {
    fn from(err: serde_json::Error) -> Self {
        BayesError::Config(err.to_string())
    }
}

impl BayesError {
    /// Create the error for a negative or non-finite smoothing strength.
    #[must_use]
    pub fn invalid_alpha(alpha: f64) -> Self {
        Self::InvalidHyperparameter {
            param: "alpha".to_string(),
            value: format!("{alpha}"),
            constraint: "a finite value >= 0".to_string(),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }

    /// Create a degenerate-probability error for an observation/label pair.
    #[must_use]
    pub fn degenerate(observation: impl std::fmt::Display, label: impl std::fmt::Display) -> Self {
        Self::DegenerateProbability {
            observation: observation.to_string(),
            label: label.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, BayesError>;
