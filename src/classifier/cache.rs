//! Precomputed conditional log-probabilities.
//!
//! `log P(o|l)` is the mean of the per-document smoothed probabilities of
//! `o` across the documents of `l`'s corpus:
//!
//! ```text
//! log P(o|l) = ln(Σ_d P(o|l,d)) - ln(|D(l)|)
//! ```
//!
//! Counts are not pooled across documents before smoothing; pooling changes
//! classification outcomes.

use crate::corpus::{CorpusRegistry, TrainingCorpus};
use crate::error::Result;
use crate::label::Label;
use crate::observation::Observation;
use crate::probability::ProbabilityCalculator;
use std::collections::HashMap;

/// `log P(o|l)` for one corpus, without any cache.
///
/// A corpus with no documents yields `-inf`, as does an observation whose
/// smoothed probability is zero in every document (`alpha = 0`).
///
/// # Errors
///
/// Propagates calculator errors (invalid `alpha`, zero denominator).
pub fn conditional_log_probability(
    corpus: &TrainingCorpus,
    observation: &Observation,
    calculator: &dyn ProbabilityCalculator,
    alpha: f64,
    vocabulary_size: usize,
) -> Result<f64> {
    if corpus.document_count() == 0 {
        return Ok(f64::NEG_INFINITY);
    }
    let mut sum = 0.0;
    for document in corpus {
        sum += calculator.smoothed_probability(
            document.frequency(observation) as f64,
            document.len() as f64,
            alpha,
            vocabulary_size,
        )?;
    }
    Ok(sum.ln() - (corpus.document_count() as f64).ln())
}

/// Label → observation → `log P(o|l)` over the training vocabulary.
#[derive(Debug, Clone, Default)]
pub struct ConditionalCache {
    entries: HashMap<Label, HashMap<Observation, f64>>,
}

impl ConditionalCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Precompute every (label, vocabulary observation) pair.
    ///
    /// # Errors
    ///
    /// Propagates calculator errors.
    pub fn build(
        corpora: &CorpusRegistry,
        calculator: &dyn ProbabilityCalculator,
        alpha: f64,
    ) -> Result<Self> {
        let vocabulary = corpora.distinct_observations();
        let vocabulary_size = vocabulary.len();
        let mut entries = HashMap::with_capacity(corpora.len());

        for corpus in corpora {
            let mut row = HashMap::with_capacity(vocabulary_size);
            for &observation in &vocabulary {
                let value = conditional_log_probability(
                    corpus,
                    observation,
                    calculator,
                    alpha,
                    vocabulary_size,
                )?;
                row.insert(observation.clone(), value);
            }
            entries.insert(corpus.label().clone(), row);
        }

        Ok(Self { entries })
    }

    /// The cached `log P(o|l)`, `None` on a miss.
    #[must_use]
    pub fn get(&self, label: &Label, observation: &Observation) -> Option<f64> {
        self.entries.get(label)?.get(observation).copied()
    }

    /// Total number of cached pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// Whether the cache holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
