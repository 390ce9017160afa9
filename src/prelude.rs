//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use textbayes::prelude::*;
//! ```

pub use crate::classifier::{Classifier, NaiveBayesClassifier, ScoringConvention};
pub use crate::combiner::{
    CombinerFactory, CombinerKind, EtaCombiner, EvidenceCombiner, LogCombiner, NaiveCombiner,
};
pub use crate::config::ClassifierConfig;
pub use crate::corpus::{CorpusRegistry, Document, TrainingCorpus};
pub use crate::error::BayesError;
pub use crate::label::{Label, LabelRegistry};
pub use crate::observation::{
    BoundaryMode, CaseSensitivity, Observation, ObservationSequence, Tokenizer, WhitespaceTokenizer,
};
pub use crate::prior::{EqualDistribution, FixedDistribution, PriorResolver, PriorStrategy};
pub use crate::probability::{LogProbability, Probability};
pub use crate::score::{LabeledScore, Score, ScoreCollection, Target, TargetScoreCollection};
