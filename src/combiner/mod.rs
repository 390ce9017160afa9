//! Evidence combiners.
//!
//! An [`EvidenceCombiner`] is a stateful, per-label accumulator: reset
//! before use, fed one probability per observation, queried once at the
//! end. All strategies compute the same odds combination
//!
//! ```text
//!          Π pᵢ
//! P = ─────────────────────
//!     Π pᵢ + Π (1 - pᵢ)
//! ```
//!
//! with different numerics:
//!
//! | Strategy | State | Final score | Notes |
//! |---|---|---|---|
//! | [`NaiveCombiner`] | `Π pᵢ`, `Π (1-pᵢ)` | `t₁ / (t₁ + t₂)` | underflows to `0` on long inputs |
//! | [`LogCombiner`] | `Σ ln pᵢ`, `Σ ln(1-pᵢ)` | `1 / (1 + e^(t₂ - t₁))` | |
//! | [`EtaCombiner`] | `η = Σ ln(1-pᵢ) - ln pᵢ` | `1 / (1 + e^η)` | default |
//!
//! # References
//!
//! - Graham (2002): "A Plan for Spam"
//! - Robinson (2003): "A Statistical Approach to the Spam Problem"

use crate::probability::{LogProbability, Probability};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Aggregates per-observation probabilities into one score.
pub trait EvidenceCombiner: Debug + Send {
    /// Return to the identity state.
    fn reset(&mut self);

    /// Fold in a plain-domain probability.
    fn combine(&mut self, p: Probability);

    /// Fold in a log-domain probability without a round trip through `exp`.
    fn combine_log(&mut self, p: LogProbability);

    /// Combined probability. An untouched combiner yields `0.5`.
    fn calculate(&self) -> f64;

    /// Natural logarithm of the combined probability.
    fn calculate_log(&self) -> f64;
}

/// Creates fresh combiners, one per label per classification.
pub trait CombinerFactory: Debug + Send + Sync {
    /// A new combiner in its identity state.
    fn create(&self) -> Box<dyn EvidenceCombiner>;

    /// `count` independent combiners.
    fn create_many(&self, count: usize) -> Vec<Box<dyn EvidenceCombiner>> {
        (0..count).map(|_| self.create()).collect()
    }
}

/// Built-in combiner strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinerKind {
    /// [`NaiveCombiner`]
    Naive,
    /// [`LogCombiner`]
    Log,
    /// [`EtaCombiner`]
    #[default]
    Eta,
}

impl CombinerFactory for CombinerKind {
    fn create(&self) -> Box<dyn EvidenceCombiner> {
        match self {
            Self::Naive => Box::new(NaiveCombiner::new()),
            Self::Log => Box::new(LogCombiner::new()),
            Self::Eta => Box::new(EtaCombiner::new()),
        }
    }
}

/// `ln(1 + e^x)` without overflow.
fn softplus(x: f64) -> f64 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

/// Multiplicative combination in the plain domain.
///
/// Once both products underflow, [`calculate`](EvidenceCombiner::calculate)
/// is `0` and [`calculate_log`](EvidenceCombiner::calculate_log) is `-inf`.
///
/// # Examples
///
/// ```
/// use textbayes::combiner::{EvidenceCombiner, NaiveCombiner};
/// use textbayes::probability::Probability;
///
/// let mut combiner = NaiveCombiner::new();
/// combiner.combine(Probability::new(0.9)?);
/// combiner.combine(Probability::new(0.8)?);
/// // 0.72 / (0.72 + 0.02)
/// assert!((combiner.calculate() - 0.72 / 0.74).abs() < 1e-12);
/// # Ok::<(), textbayes::error::BayesError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NaiveCombiner {
    term1: f64,
    term2: f64,
}

impl NaiveCombiner {
    /// A combiner in its identity state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            term1: 1.0,
            term2: 1.0,
        }
    }
}

impl Default for NaiveCombiner {
    fn default() -> Self {
        Self::new()
    }
}

impl EvidenceCombiner for NaiveCombiner {
    fn reset(&mut self) {
        self.term1 = 1.0;
        self.term2 = 1.0;
    }

    fn combine(&mut self, p: Probability) {
        self.term1 *= p.value();
        self.term2 *= p.complement().value();
    }

    fn combine_log(&mut self, p: LogProbability) {
        self.combine(p.to_plain());
    }

    // Both products underflowed: the odds are lost, report zero.
    fn calculate(&self) -> f64 {
        let total = self.term1 + self.term2;
        if total == 0.0 {
            return 0.0;
        }
        self.term1 / total
    }

    fn calculate_log(&self) -> f64 {
        let total = self.term1 + self.term2;
        if total == 0.0 {
            return f64::NEG_INFINITY;
        }
        self.term1.ln() - total.ln()
    }
}

/// Additive combination in the log domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCombiner {
    term1: f64,
    term2: f64,
}

impl LogCombiner {
    /// A combiner in its identity state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EvidenceCombiner for LogCombiner {
    fn reset(&mut self) {
        self.term1 = 0.0;
        self.term2 = 0.0;
    }

    fn combine(&mut self, p: Probability) {
        self.term1 += p.value().ln();
        self.term2 += (-p.value()).ln_1p();
    }

    fn combine_log(&mut self, p: LogProbability) {
        self.term1 += p.value();
        self.term2 += p.ln_complement();
    }

    // a / (a + b) = 1 / (1 + exp(ln b - ln a))
    fn calculate(&self) -> f64 {
        1.0 / (1.0 + (self.term2 - self.term1).exp())
    }

    fn calculate_log(&self) -> f64 {
        -softplus(self.term2 - self.term1)
    }
}

/// Running sum of negative log-odds.
///
/// Equivalent to [`LogCombiner`] with a single accumulator; the final
/// score is the logistic function of `-η`.
///
/// # Examples
///
/// ```
/// use textbayes::combiner::{EtaCombiner, EvidenceCombiner};
/// use textbayes::probability::Probability;
///
/// let mut combiner = EtaCombiner::new();
/// combiner.combine(Probability::new(0.5)?);
/// assert!((combiner.calculate() - 0.5).abs() < 1e-12);
/// # Ok::<(), textbayes::error::BayesError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EtaCombiner {
    eta: f64,
}

impl EtaCombiner {
    /// A combiner in its identity state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated `η`.
    #[must_use]
    pub fn eta(&self) -> f64 {
        self.eta
    }
}

impl EvidenceCombiner for EtaCombiner {
    fn reset(&mut self) {
        self.eta = 0.0;
    }

    fn combine(&mut self, p: Probability) {
        self.eta += (-p.value()).ln_1p() - p.value().ln();
    }

    fn combine_log(&mut self, p: LogProbability) {
        self.eta += p.ln_complement() - p.value();
    }

    fn calculate(&self) -> f64 {
        1.0 / (1.0 + self.eta.exp())
    }

    fn calculate_log(&self) -> f64 {
        -softplus(self.eta)
    }
}

#[cfg(test)]
mod tests;

#[cfg(test)]
mod tests_combiner_contract;
