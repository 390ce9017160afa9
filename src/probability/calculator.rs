//! Probability estimation from raw frequency/length counts.

use crate::error::{BayesError, Result};
use std::fmt::Debug;

/// Converts a frequency/length pair into a probability estimate.
///
/// Implementations are stateless strategies selected at classifier
/// construction time.
pub trait ProbabilityCalculator: Debug + Send + Sync {
    /// Plain empirical estimate `frequency / length`.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::ZeroLength`] if `length` is zero.
    fn probability(&self, frequency: f64, length: f64) -> Result<f64>;

    /// Smoothed estimate against a vocabulary of `vocabulary_size` distinct observations.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::InvalidHyperparameter`] if `alpha` is negative
    /// or non-finite.
    fn smoothed_probability(
        &self,
        frequency: f64,
        length: f64,
        alpha: f64,
        vocabulary_size: usize,
    ) -> Result<f64>;
}

/// Checks a Laplace smoothing strength.
///
/// # Errors
///
/// Returns [`BayesError::InvalidHyperparameter`] unless `alpha` is finite and `>= 0`.
pub fn validate_alpha(alpha: f64) -> Result<()> {
    if !alpha.is_finite() || alpha < 0.0 {
        return Err(BayesError::invalid_alpha(alpha));
    }
    Ok(())
}

/// Additive (Laplace/Lidstone) smoothing.
///
/// ```text
/// P = (frequency + α) / (α · |V| + length)
/// ```
///
/// With `α = 0` this reduces to the empirical estimate and yields zero for
/// unseen observations; the logarithm of such a value is undefined and the
/// classifier reports it as [`BayesError::DegenerateProbability`].
///
/// # Examples
///
/// ```
/// use textbayes::probability::{LaplaceSmoothing, ProbabilityCalculator};
///
/// let p = LaplaceSmoothing
///     .smoothed_probability(0.0, 10.0, 1.0, 5)
///     .expect("valid alpha");
/// assert!((p - 1.0 / 15.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LaplaceSmoothing;

impl ProbabilityCalculator for LaplaceSmoothing {
    fn probability(&self, frequency: f64, length: f64) -> Result<f64> {
        if length == 0.0 {
            return Err(BayesError::ZeroLength);
        }
        Ok(frequency / length)
    }

    fn smoothed_probability(
        &self,
        frequency: f64,
        length: f64,
        alpha: f64,
        vocabulary_size: usize,
    ) -> Result<f64> {
        validate_alpha(alpha)?;
        let denominator = alpha * vocabulary_size as f64 + length;
        if denominator == 0.0 {
            return Err(BayesError::ZeroLength);
        }
        Ok((frequency + alpha) / denominator)
    }
}

/// Empirical estimate that ignores the smoothing strength.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsmoothed;

impl ProbabilityCalculator for Unsmoothed {
    fn probability(&self, frequency: f64, length: f64) -> Result<f64> {
        LaplaceSmoothing.probability(frequency, length)
    }

    fn smoothed_probability(
        &self,
        frequency: f64,
        length: f64,
        alpha: f64,
        _vocabulary_size: usize,
    ) -> Result<f64> {
        validate_alpha(alpha)?;
        self.probability(frequency, length)
    }
}
