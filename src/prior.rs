//! Label prior probabilities.
//!
//! A [`PriorResolver`] supplies `P(l)` and `log P(l)` for a label.
//!
//! - [`EqualDistribution`]: `P(l) = 1 / N`.
//! - [`VocabularyDistribution`]: `P(l) = |V(l)| / |V|`, weighting a label
//!   by how much of the global vocabulary its corpus contributes.
//! - [`FixedDistribution`]: caller-supplied priors.

use crate::corpus::CorpusRegistry;
use crate::error::{BayesError, Result};
use crate::label::Label;
use crate::probability::{LogProbability, Probability, Qualified};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Supplies a label's a-priori probability.
pub trait PriorResolver: Debug + Send + Sync {
    /// `P(l)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the prior is undefined for `label`.
    fn prior<'a>(&self, label: &'a Label) -> Result<Qualified<'a, Probability>>;

    /// `log P(l)`.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::InvalidProbability`] when the prior is zero,
    /// since its logarithm is not finite.
    fn log_prior<'a>(&self, label: &'a Label) -> Result<Qualified<'a, LogProbability>> {
        self.prior(label)?.to_log()
    }
}

/// Built-in prior strategies, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorStrategy {
    /// [`EqualDistribution`]
    #[default]
    Equal,
    /// [`VocabularyDistribution`]
    Vocabulary,
}

impl PriorStrategy {
    /// Build the resolver for `corpora`.
    #[must_use]
    pub fn resolver(self, corpora: &CorpusRegistry) -> Arc<dyn PriorResolver> {
        match self {
            Self::Equal => Arc::new(EqualDistribution::new(corpora.len())),
            Self::Vocabulary => Arc::new(VocabularyDistribution::from_corpora(corpora)),
        }
    }
}

/// Uniform prior `1 / N` over `N` labels.
///
/// # Examples
///
/// ```
/// use textbayes::label::Label;
/// use textbayes::prior::{EqualDistribution, PriorResolver};
///
/// let prior = EqualDistribution::new(4);
/// let label = Label::new("any");
/// let p = prior.prior(&label).expect("labels exist");
/// assert!((p.value().value() - 0.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EqualDistribution {
    label_count: usize,
}

impl EqualDistribution {
    /// Uniform prior over `label_count` labels.
    #[must_use]
    pub fn new(label_count: usize) -> Self {
        Self { label_count }
    }

    /// Number of labels the distribution spreads over.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.label_count
    }
}

impl PriorResolver for EqualDistribution {
    fn prior<'a>(&self, label: &'a Label) -> Result<Qualified<'a, Probability>> {
        if self.label_count == 0 {
            return Err(BayesError::NoLabels);
        }
        let p = Probability::new(1.0 / self.label_count as f64)?;
        Ok(Qualified::label_marginal(p, label))
    }
}

/// Prior proportional to each label's distinct vocabulary.
///
/// Because vocabularies overlap, the priors need not sum to one.
#[derive(Debug, Clone)]
pub struct VocabularyDistribution {
    set_sizes: HashMap<Label, usize>,
    vocabulary_size: usize,
}

impl VocabularyDistribution {
    /// Snapshot vocabulary sizes from `corpora`.
    #[must_use]
    pub fn from_corpora(corpora: &CorpusRegistry) -> Self {
        Self {
            set_sizes: corpora
                .iter()
                .map(|c| (c.label().clone(), c.set_vocabulary_size()))
                .collect(),
            vocabulary_size: corpora.vocabulary_size(),
        }
    }
}

impl PriorResolver for VocabularyDistribution {
    fn prior<'a>(&self, label: &'a Label) -> Result<Qualified<'a, Probability>> {
        let set_size = self
            .set_sizes
            .get(label)
            .ok_or_else(|| BayesError::UnknownLabel(label.to_string()))?;
        if self.vocabulary_size == 0 {
            return Err(BayesError::empty_input("vocabulary"));
        }
        let p = Probability::new(*set_size as f64 / self.vocabulary_size as f64)?;
        Ok(Qualified::label_marginal(p, label))
    }
}

/// Caller-supplied priors.
#[derive(Debug, Clone, Default)]
pub struct FixedDistribution {
    priors: HashMap<Label, Probability>,
}

impl FixedDistribution {
    /// Create an empty distribution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prior of `label`.
    ///
    /// # Errors
    ///
    /// Returns an error if `p` is not a valid probability.
    pub fn with_prior(mut self, label: Label, p: f64) -> Result<Self> {
        self.priors.insert(label, Probability::new(p)?);
        Ok(self)
    }
}

impl PriorResolver for FixedDistribution {
    fn prior<'a>(&self, label: &'a Label) -> Result<Qualified<'a, Probability>> {
        self.priors
            .get(label)
            .map(|p| Qualified::label_marginal(*p, label))
            .ok_or_else(|| BayesError::UnknownLabel(label.to_string()))
    }
}
