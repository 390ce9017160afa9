//! Probability values, provenance tagging and estimation.
//!
//! [`Probability`] and [`LogProbability`] are validated scalars: a plain
//! probability is finite and in `[0, 1]`; a log-probability is finite and
//! `<= 0`. Construction outside those domains fails with
//! [`BayesError::InvalidProbability`].
//!
//! [`Qualified`] attaches a [`Provenance`] tag to a value (`P(o|l)`,
//! `P(l|o)`, `P(o,l)`, `P(o)`, `P(l)`). Combining two qualified values
//! checks that the tags line up; a mismatch is a programming error and
//! panics. Tags borrow their observation and label.
//!
//! # Example
//!
//! ```
//! use textbayes::label::Label;
//! use textbayes::observation::Observation;
//! use textbayes::probability::{LogProbability, Qualified};
//!
//! let o = Observation::token("goal");
//! let l = Label::new("sports");
//!
//! let likelihood = Qualified::given_label(LogProbability::new(-1.0)?, &o, &l);
//! let prior = Qualified::label_marginal(LogProbability::new(-0.5)?, &l);
//! let joint = likelihood.joint_with(&prior);
//! assert!((joint.value().value() + 1.5).abs() < 1e-12);
//! # Ok::<(), textbayes::error::BayesError>(())
//! ```

pub mod calculator;

use crate::error::{BayesError, Result};
use crate::label::Label;
use crate::observation::Observation;
use std::fmt;

pub use calculator::{validate_alpha, LaplaceSmoothing, ProbabilityCalculator, Unsmoothed};

/// A plain-domain probability in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Probability(f64);

impl Probability {
    /// Probability zero.
    pub const ZERO: Self = Self(0.0);
    /// Probability one.
    pub const ONE: Self = Self(1.0);

    /// Validate and wrap `value`.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::InvalidProbability`] if `value` is non-finite or
    /// outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(BayesError::InvalidProbability {
                value,
                reason: "probability must be finite",
            });
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(BayesError::InvalidProbability {
                value,
                reason: "probability must lie in [0, 1]",
            });
        }
        Ok(Self(value))
    }

    /// The raw value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// `1 - p`.
    #[must_use]
    pub fn complement(self) -> Self {
        Self(1.0 - self.0)
    }

    /// Natural logarithm of this probability.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::InvalidProbability`] for zero, whose logarithm
    /// is not finite.
    pub fn to_log(self) -> Result<LogProbability> {
        if self.0 <= 0.0 {
            return Err(BayesError::InvalidProbability {
                value: self.0,
                reason: "logarithm of zero probability is undefined",
            });
        }
        Ok(LogProbability(self.0.ln().min(0.0)))
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A log-domain probability: finite and `<= 0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct LogProbability(f64);

impl LogProbability {
    /// `ln(1)`.
    pub const CERTAIN: Self = Self(0.0);

    /// Validate and wrap `value`.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::InvalidProbability`] if `value` is NaN,
    /// infinite or positive.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(BayesError::InvalidProbability {
                value,
                reason: "log-probability must be finite",
            });
        }
        if value > 0.0 {
            return Err(BayesError::InvalidProbability {
                value,
                reason: "log-probability must be <= 0",
            });
        }
        Ok(Self(value))
    }

    // Differences of log-probabilities can land a few ulps above zero.
    fn saturating(value: f64) -> Self {
        debug_assert!(value.is_finite(), "log-probability arithmetic produced {value}");
        Self(value.min(0.0))
    }

    /// The raw value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Back to the plain domain.
    #[must_use]
    pub fn to_plain(self) -> Probability {
        Probability(self.0.exp())
    }

    /// `ln(1 - p)` without leaving the log domain. `-inf` when `p = 1`.
    #[must_use]
    pub fn ln_complement(self) -> f64 {
        (-self.0.exp_m1()).ln()
    }
}

impl fmt::Display for LogProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The thing a probability is about: an observation or a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject<'a> {
    /// An observation `o`.
    Observation(&'a Observation),
    /// A label `l`.
    Label(&'a Label),
}

impl fmt::Display for Subject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Observation(o) => write!(f, "{o}"),
            Self::Label(l) => write!(f, "{l}"),
        }
    }
}

/// Where a probability value came from.
///
/// Tags borrow the observation and label they name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance<'a> {
    /// `P(x)`
    Marginal(Subject<'a>),
    /// `P(event|given)`
    Conditional {
        /// The event whose probability is measured.
        event: Subject<'a>,
        /// The conditioning subject.
        given: Subject<'a>,
    },
    /// `P(o,l)`
    Joint {
        /// The observation.
        observation: &'a Observation,
        /// The label.
        label: &'a Label,
    },
}

impl fmt::Display for Provenance<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marginal(s) => write!(f, "P({s})"),
            Self::Conditional { event, given } => write!(f, "P({event}|{given})"),
            Self::Joint { observation, label } => write!(f, "P({observation},{label})"),
        }
    }
}

/// A probability value annotated with its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Qualified<'a, P> {
    value: P,
    provenance: Provenance<'a>,
}

impl<'a, P: Copy> Qualified<'a, P> {
    /// Tag `value` with `provenance`.
    #[must_use]
    pub fn new(value: P, provenance: Provenance<'a>) -> Self {
        Self { value, provenance }
    }

    /// `P(o|l)`
    #[must_use]
    pub fn given_label(value: P, observation: &'a Observation, label: &'a Label) -> Self {
        Self::new(
            value,
            Provenance::Conditional {
                event: Subject::Observation(observation),
                given: Subject::Label(label),
            },
        )
    }

    /// `P(l|o)`
    #[must_use]
    pub fn given_observation(value: P, label: &'a Label, observation: &'a Observation) -> Self {
        Self::new(
            value,
            Provenance::Conditional {
                event: Subject::Label(label),
                given: Subject::Observation(observation),
            },
        )
    }

    /// `P(l)`
    #[must_use]
    pub fn label_marginal(value: P, label: &'a Label) -> Self {
        Self::new(value, Provenance::Marginal(Subject::Label(label)))
    }

    /// `P(o)`
    #[must_use]
    pub fn observation_marginal(value: P, observation: &'a Observation) -> Self {
        Self::new(value, Provenance::Marginal(Subject::Observation(observation)))
    }

    /// The wrapped value.
    #[must_use]
    pub fn value(&self) -> P {
        self.value
    }

    /// The provenance tag.
    #[must_use]
    pub fn provenance(&self) -> &Provenance<'a> {
        &self.provenance
    }

    // P(o|l) ⊗ P(l) → P(o,l)
    fn joint_provenance(&self, prior: &Provenance<'a>) -> Provenance<'a> {
        match (self.provenance, *prior) {
            (
                Provenance::Conditional {
                    event: Subject::Observation(observation),
                    given: Subject::Label(label),
                },
                Provenance::Marginal(Subject::Label(prior_label)),
            ) if label == prior_label => Provenance::Joint { observation, label },
            (lhs, rhs) => panic!("cannot form a joint probability from {lhs} and {rhs}"),
        }
    }

    // P(o,l) ⊘ P(o) → P(l|o)
    fn posterior_provenance(&self, evidence: &Provenance<'a>) -> Provenance<'a> {
        match (self.provenance, *evidence) {
            (
                Provenance::Joint { observation, label },
                Provenance::Marginal(Subject::Observation(evidence_observation)),
            ) if observation == evidence_observation => Provenance::Conditional {
                event: Subject::Label(label),
                given: Subject::Observation(observation),
            },
            (lhs, rhs) => panic!("cannot form a posterior probability from {lhs} and {rhs}"),
        }
    }
}

impl<'a> Qualified<'a, Probability> {
    /// `P(o|l) · P(l) = P(o,l)`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not `P(o|l)` or `prior` is not `P(l)` for the same label.
    #[must_use]
    pub fn joint_with(&self, prior: &Self) -> Self {
        let provenance = self.joint_provenance(&prior.provenance);
        Self::new(Probability(self.value.0 * prior.value.0), provenance)
    }

    /// `P(o,l) / P(o) = P(l|o)`.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::InvalidProbability`] if the evidence is zero.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not `P(o,l)` or `evidence` is not `P(o)` for the same observation.
    pub fn posterior_from(&self, evidence: &Self) -> Result<Self> {
        let provenance = self.posterior_provenance(&evidence.provenance);
        if evidence.value.0 <= 0.0 {
            return Err(BayesError::InvalidProbability {
                value: evidence.value.0,
                reason: "cannot condition on an observation of zero probability",
            });
        }
        let value = (self.value.0 / evidence.value.0).min(1.0);
        Ok(Self::new(Probability(value), provenance))
    }

    /// Same provenance, log domain.
    ///
    /// # Errors
    ///
    /// Returns an error if the probability is zero.
    pub fn to_log(&self) -> Result<Qualified<'a, LogProbability>> {
        Ok(Qualified::new(self.value.to_log()?, self.provenance))
    }
}

impl<'a> Qualified<'a, LogProbability> {
    /// `log P(o|l) + log P(l) = log P(o,l)`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not `P(o|l)` or `prior` is not `P(l)` for the same label.
    #[must_use]
    pub fn joint_with(&self, prior: &Self) -> Self {
        let provenance = self.joint_provenance(&prior.provenance);
        Self::new(
            LogProbability::saturating(self.value.0 + prior.value.0),
            provenance,
        )
    }

    /// `log P(o,l) - log P(o) = log P(l|o)`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not `P(o,l)` or `evidence` is not `P(o)` for the same observation.
    #[must_use]
    pub fn posterior_from(&self, evidence: &Self) -> Self {
        let provenance = self.posterior_provenance(&evidence.provenance);
        Self::new(
            LogProbability::saturating(self.value.0 - evidence.value.0),
            provenance,
        )
    }

    /// Same provenance, plain domain.
    #[must_use]
    pub fn to_plain(&self) -> Qualified<'a, Probability> {
        Qualified::new(self.value.to_plain(), self.provenance)
    }
}

/// `ln(Σ exp(x_i))`, shifted by the maximum to avoid overflow and underflow.
///
/// Returns `-inf` for an empty input or when every term is `-inf`.
#[must_use]
pub fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = values.iter().map(|&x| (x - max).exp()).sum();
    max + sum.ln()
}

#[cfg(test)]
mod tests;
