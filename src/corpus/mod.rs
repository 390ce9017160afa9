//! Training corpora: documents grouped by label.
//!
//! - [`Document`]: an immutable observation sequence with precomputed
//!   per-observation frequencies and its length.
//! - [`TrainingCorpus`]: the documents contributed for one label.
//! - [`CorpusRegistry`]: all corpora, doubling as the global dictionary
//!   (distinct-observation vocabulary and global counts).
//!
//! Corpora are built once during training and read-only afterwards.
//!
//! # Example
//!
//! ```
//! use textbayes::corpus::CorpusRegistry;
//! use textbayes::label::Label;
//! use textbayes::observation::BoundaryMode;
//!
//! let mut corpora = CorpusRegistry::new();
//! corpora
//!     .add(Label::new("left"))
//!     .add_text("left", BoundaryMode::NoBoundaries)
//!     .add_text("center", BoundaryMode::NoBoundaries);
//! corpora
//!     .add(Label::new("right"))
//!     .add_text("right center", BoundaryMode::NoBoundaries);
//!
//! assert_eq!(corpora.len(), 2);
//! assert_eq!(corpora.vocabulary_size(), 3);
//! ```

use crate::error::Result;
use crate::label::Label;
use crate::observation::{BoundaryMode, CaseSensitivity, Observation, ObservationSequence};
use crate::probability::{LaplaceSmoothing, ProbabilityCalculator};
use std::collections::{HashMap, HashSet};

/// A training document: an observation sequence plus frequency statistics.
#[derive(Debug, Clone, Default)]
pub struct Document {
    sequence: ObservationSequence,
    frequencies: HashMap<Observation, usize>,
}

impl Document {
    /// Build a document, counting observation frequencies once.
    #[must_use]
    pub fn new(sequence: ObservationSequence) -> Self {
        let mut frequencies = HashMap::new();
        for observation in &sequence {
            *frequencies.entry(observation.clone()).or_insert(0) += 1;
        }
        Self {
            sequence,
            frequencies,
        }
    }

    /// Occurrence count of `observation` in this document.
    #[must_use]
    pub fn frequency(&self, observation: &Observation) -> usize {
        self.frequencies.get(observation).copied().unwrap_or(0)
    }

    /// Total observation count (not distinct).
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Whether the document has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Whether `observation` occurs in the document.
    #[must_use]
    pub fn contains(&self, observation: &Observation) -> bool {
        self.frequencies.contains_key(observation)
    }

    /// The distinct observations of this document.
    pub fn distinct(&self) -> impl Iterator<Item = &Observation> {
        self.frequencies.keys()
    }

    /// The underlying sequence.
    #[must_use]
    pub fn sequence(&self) -> &ObservationSequence {
        &self.sequence
    }

    /// Empirical probability `frequency / length`.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::ZeroLength`](crate::error::BayesError::ZeroLength)
    /// for an empty document.
    pub fn probability(&self, observation: &Observation) -> Result<f64> {
        LaplaceSmoothing.probability(self.frequency(observation) as f64, self.len() as f64)
    }

    /// Laplace-smoothed probability against a vocabulary of `vocabulary_size`.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` is negative or non-finite.
    pub fn smoothed_probability(
        &self,
        observation: &Observation,
        alpha: f64,
        vocabulary_size: usize,
    ) -> Result<f64> {
        LaplaceSmoothing.smoothed_probability(
            self.frequency(observation) as f64,
            self.len() as f64,
            alpha,
            vocabulary_size,
        )
    }
}

/// The documents contributed for one label.
#[derive(Debug, Clone)]
pub struct TrainingCorpus {
    label: Label,
    documents: Vec<Document>,
    total_length: usize,
    vocabulary: HashMap<Observation, usize>,
}

impl TrainingCorpus {
    /// Create an empty corpus owned by `label`.
    #[must_use]
    pub fn new(label: Label) -> Self {
        Self {
            label,
            documents: Vec::new(),
            total_length: 0,
            vocabulary: HashMap::new(),
        }
    }

    /// The owning label.
    #[must_use]
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Add a document built from `sequence`.
    pub fn add_sequence(&mut self, sequence: ObservationSequence) -> &mut Self {
        let document = Document::new(sequence);
        for (observation, count) in &document.frequencies {
            *self.vocabulary.entry(observation.clone()).or_insert(0) += count;
        }
        self.total_length += document.len();
        self.documents.push(document);
        self
    }

    /// Add a document from whitespace-split `text`.
    pub fn add_text(&mut self, text: &str, mode: BoundaryMode) -> &mut Self {
        self.add_sequence(ObservationSequence::from_text(text, mode))
    }

    /// Number of documents.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Summed length of all documents.
    #[must_use]
    pub fn total_document_length(&self) -> usize {
        self.total_length
    }

    /// Number of distinct observations in this corpus.
    #[must_use]
    pub fn set_vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Occurrences of `observation` across all documents of the corpus.
    #[must_use]
    pub fn frequency(&self, observation: &Observation) -> usize {
        self.vocabulary.get(observation).copied().unwrap_or(0)
    }

    /// Distinct observations of this corpus.
    pub fn observations(&self) -> impl Iterator<Item = &Observation> {
        self.vocabulary.keys()
    }

    /// Iterate the documents.
    pub fn documents(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Whether every document compares its tokens under `case`.
    #[must_use]
    pub fn is_keyed(&self, case: CaseSensitivity) -> bool {
        self.documents.iter().all(|d| d.sequence.is_keyed(case))
    }

    /// Rebuild the corpus with every token compared under `case`.
    ///
    /// Tokens keep their original text, so a corpus built case-insensitively
    /// splits back into distinct observations under `Sensitive`.
    #[must_use]
    pub fn rekeyed(&self, case: CaseSensitivity) -> Self {
        let mut corpus = Self::new(self.label.clone());
        for document in &self.documents {
            corpus.add_sequence(document.sequence.keyed(case).into_owned());
        }
        corpus
    }
}

impl<'a> IntoIterator for &'a TrainingCorpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

/// Indexed collection of training corpora, one per label.
///
/// Also serves as the global dictionary: the union of all corpora.
#[derive(Debug, Clone, Default)]
pub struct CorpusRegistry {
    corpora: Vec<TrainingCorpus>,
}

impl CorpusRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the corpus for `label`, creating an empty one if needed.
    pub fn add(&mut self, label: Label) -> &mut TrainingCorpus {
        let index = match self.position(&label) {
            Some(index) => index,
            None => {
                self.corpora.push(TrainingCorpus::new(label));
                self.corpora.len() - 1
            }
        };
        &mut self.corpora[index]
    }

    /// Insert a prebuilt corpus.
    ///
    /// # Errors
    ///
    /// Returns an error if a corpus for the same label is already registered.
    pub fn insert(&mut self, corpus: TrainingCorpus) -> Result<()> {
        if self.position(corpus.label()).is_some() {
            return Err(format!("corpus for label '{}' already registered", corpus.label()).into());
        }
        self.corpora.push(corpus);
        Ok(())
    }

    fn position(&self, label: &Label) -> Option<usize> {
        self.corpora.iter().position(|c| c.label() == label)
    }

    /// The corpus for `label`.
    #[must_use]
    pub fn get(&self, label: &Label) -> Option<&TrainingCorpus> {
        self.position(label).map(|index| &self.corpora[index])
    }

    /// Number of corpora (known labels).
    #[must_use]
    pub fn len(&self) -> usize {
        self.corpora.len()
    }

    /// Whether no corpora are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.corpora.is_empty()
    }

    /// Iterate corpora in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, TrainingCorpus> {
        self.corpora.iter()
    }

    /// Labels in registration order.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.corpora.iter().map(TrainingCorpus::label)
    }

    /// Distinct observations across all corpora.
    #[must_use]
    pub fn distinct_observations(&self) -> HashSet<&Observation> {
        self.corpora
            .iter()
            .flat_map(TrainingCorpus::observations)
            .collect()
    }

    /// Global occurrence count of every distinct observation.
    #[must_use]
    pub fn vocabulary(&self) -> HashMap<&Observation, usize> {
        let mut counts = HashMap::new();
        for corpus in &self.corpora {
            for (observation, count) in &corpus.vocabulary {
                *counts.entry(observation).or_insert(0) += count;
            }
        }
        counts
    }

    /// Count of distinct observations across all corpora.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.distinct_observations().len()
    }

    /// Global occurrence count of `observation`.
    #[must_use]
    pub fn frequency(&self, observation: &Observation) -> usize {
        self.corpora.iter().map(|c| c.frequency(observation)).sum()
    }

    /// Whether any corpus contains `observation`.
    #[must_use]
    pub fn contains(&self, observation: &Observation) -> bool {
        self.corpora.iter().any(|c| c.frequency(observation) > 0)
    }

    /// Whether every corpus compares its tokens under `case`.
    #[must_use]
    pub fn is_keyed(&self, case: CaseSensitivity) -> bool {
        self.corpora.iter().all(|c| c.is_keyed(case))
    }

    /// Rebuild every corpus with tokens compared under `case`.
    #[must_use]
    pub fn rekeyed(&self, case: CaseSensitivity) -> Self {
        Self {
            corpora: self.corpora.iter().map(|c| c.rekeyed(case)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CorpusRegistry {
    type Item = &'a TrainingCorpus;
    type IntoIter = std::slice::Iter<'a, TrainingCorpus>;

    fn into_iter(self) -> Self::IntoIter {
        self.corpora.iter()
    }
}

#[cfg(test)]
mod tests;
