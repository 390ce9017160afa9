//! Naive Bayes text classification.
//!
//! For each observation `o` of the input and every label `c`:
//!
//! ```text
//! log P(o,c) = log P(o|c) + log P(c)
//! log P(o)   = ln Σ_c exp(log P(o,c))
//! log P(c|o) = log P(o,c) - log P(o)
//! ```
//!
//! and `log P(c|o)` is fed to `c`'s evidence combiner. Under
//! [`ScoringConvention::Minimize`] each combiner instead accumulates the
//! posteriors of every other label, and the resulting log-evidence against
//! `c` is ranked lowest-first.
//!
//! # Example
//!
//! ```
//! use textbayes::prelude::*;
//!
//! let mut corpora = CorpusRegistry::new();
//! corpora
//!     .add(Label::new("left"))
//!     .add_text("left", BoundaryMode::NoBoundaries)
//!     .add_text("center", BoundaryMode::NoBoundaries);
//! corpora
//!     .add(Label::new("right"))
//!     .add_text("right", BoundaryMode::NoBoundaries)
//!     .add_text("center", BoundaryMode::NoBoundaries);
//!
//! let classifier = NaiveBayesClassifier::new().trained_with(corpora)?;
//! let scores = classifier.classify(&ObservationSequence::from_text("left", BoundaryMode::NoBoundaries))?;
//! assert_eq!(scores.best().expect("two labels").label().name(), "left");
//! # Ok::<(), textbayes::error::BayesError>(())
//! ```

mod cache;

pub use cache::{conditional_log_probability, ConditionalCache};
pub use crate::config::ScoringConvention;

use crate::combiner::{CombinerFactory, EvidenceCombiner};
use crate::config::ClassifierConfig;
use crate::corpus::CorpusRegistry;
use crate::error::{BayesError, Result};
use crate::label::Label;
use crate::observation::{ObservationSequence, WhitespaceTokenizer};
use crate::prior::PriorResolver;
use crate::probability::{
    log_sum_exp, LaplaceSmoothing, LogProbability, ProbabilityCalculator, Qualified,
};
use crate::score::{LabeledScore, Target, TargetScoreCollection};
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Train-then-classify contract.
pub trait Classifier {
    /// Replace the trained state with one built from `corpora`.
    ///
    /// # Errors
    ///
    /// Returns an error if probability estimation fails.
    fn learn(&self, corpora: Arc<CorpusRegistry>) -> Result<()>;

    /// Score every known label for `sequence`.
    ///
    /// # Errors
    ///
    /// Returns an error if a conditional or prior probability is degenerate.
    fn classify(&self, sequence: &ObservationSequence) -> Result<TargetScoreCollection<LabeledScore>>;
}

/// Everything `classify` reads, published as one unit by `learn`.
#[derive(Debug)]
struct TrainedModel {
    corpora: Arc<CorpusRegistry>,
    cache: Option<ConditionalCache>,
    prior: Option<Arc<dyn PriorResolver>>,
    vocabulary_size: usize,
}

impl TrainedModel {
    fn untrained() -> Self {
        Self {
            corpora: Arc::new(CorpusRegistry::new()),
            cache: None,
            prior: None,
            vocabulary_size: 0,
        }
    }
}

/// Configurable Naive Bayes classifier over discrete observations.
///
/// Training tokens and input tokens are both compared under the configured
/// [`CaseSensitivity`](crate::observation::CaseSensitivity); `learn` re-keys
/// corpora built under another mode.
///
/// `learn` builds a new model off to the side then publishes it with an
/// atomic pointer swap; a `classify` running concurrently sees either the
/// old model or the new one in full.
#[derive(Debug)]
pub struct NaiveBayesClassifier {
    config: ClassifierConfig,
    calculator: Arc<dyn ProbabilityCalculator>,
    combiners: Arc<dyn CombinerFactory>,
    prior: Option<Arc<dyn PriorResolver>>,
    model: ArcSwap<TrainedModel>,
}

impl Default for NaiveBayesClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NaiveBayesClassifier {
    /// Classifier with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        let config = ClassifierConfig::default();
        Self {
            combiners: Arc::new(config.combiner),
            config,
            calculator: Arc::new(LaplaceSmoothing),
            prior: None,
            model: ArcSwap::from_pointee(TrainedModel::untrained()),
        }
    }

    /// Classifier with `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn with_config(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            combiners: Arc::new(config.combiner),
            config,
            ..Self::new()
        })
    }

    /// Replace the probability calculator.
    #[must_use]
    pub fn with_calculator(mut self, calculator: Arc<dyn ProbabilityCalculator>) -> Self {
        self.calculator = calculator;
        self
    }

    /// Replace the combiner factory selected by the configuration.
    #[must_use]
    pub fn with_combiner_factory(mut self, combiners: Arc<dyn CombinerFactory>) -> Self {
        self.combiners = combiners;
        self
    }

    /// Use `prior` instead of the configured prior strategy. Takes effect at
    /// the next `learn`.
    #[must_use]
    pub fn with_prior_resolver(mut self, prior: Arc<dyn PriorResolver>) -> Self {
        self.prior = Some(prior);
        self
    }

    /// Learn `corpora` and return the trained classifier.
    ///
    /// # Errors
    ///
    /// Returns an error if probability estimation fails.
    pub fn trained_with(self, corpora: impl Into<Arc<CorpusRegistry>>) -> Result<Self> {
        self.learn(corpora.into())?;
        Ok(self)
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Labels of the current model, in registration order.
    #[must_use]
    pub fn labels(&self) -> Vec<Label> {
        self.model.load().corpora.labels().cloned().collect()
    }

    /// Number of cached conditional probabilities in the current model.
    #[must_use]
    pub fn cached_entries(&self) -> usize {
        self.model.load().cache.as_ref().map_or(0, ConditionalCache::len)
    }

    /// Whitespace-tokenize `text` under the configured case and boundary
    /// modes, then classify it.
    ///
    /// # Errors
    ///
    /// See [`Classifier::classify`].
    pub fn classify_text(&self, text: &str) -> Result<TargetScoreCollection<LabeledScore>> {
        let sequence = ObservationSequence::tokenize(
            text,
            &WhitespaceTokenizer,
            self.config.boundaries,
            self.config.case,
        )?;
        self.classify(&sequence)
    }

    fn results(&self) -> TargetScoreCollection<LabeledScore> {
        TargetScoreCollection::new(match self.config.scoring {
            ScoringConvention::Maximize => Target::Maximize,
            ScoringConvention::Minimize => Target::Minimize,
        })
    }
}

impl Classifier for NaiveBayesClassifier {
    fn learn(&self, corpora: Arc<CorpusRegistry>) -> Result<()> {
        if corpora.is_empty() {
            warn!("training corpora are empty; every classification will be empty");
        }

        let case = self.config.case;
        let corpora = if corpora.is_keyed(case) {
            corpora
        } else {
            debug!(?case, "re-keying training corpora to the configured case mode");
            Arc::new(corpora.rekeyed(case))
        };

        let vocabulary_size = corpora.vocabulary_size();
        let prior = match &self.prior {
            Some(prior) => Arc::clone(prior),
            None => self.config.prior.resolver(&corpora),
        };
        let cache = if self.config.use_cache {
            Some(ConditionalCache::build(
                &corpora,
                self.calculator.as_ref(),
                self.config.alpha,
            )?)
        } else {
            None
        };

        info!(
            labels = corpora.len(),
            vocabulary_size,
            cached = cache.as_ref().map_or(0, ConditionalCache::len),
            "learned training corpora"
        );

        self.model.store(Arc::new(TrainedModel {
            corpora,
            cache,
            prior: Some(prior),
            vocabulary_size,
        }));
        Ok(())
    }

    fn classify(&self, sequence: &ObservationSequence) -> Result<TargetScoreCollection<LabeledScore>> {
        let model = self.model.load_full();
        let results = self.results();

        let prior = match (&model.prior, model.corpora.is_empty()) {
            (Some(prior), false) => prior,
            _ => {
                warn!("no training corpora; was learn() called?");
                return Ok(results);
            }
        };
        if sequence.is_empty() {
            return Ok(results);
        }
        let sequence = sequence.keyed(self.config.case);

        let labels: Vec<&Label> = model.corpora.labels().collect();
        let log_priors = labels
            .iter()
            .map(|&label| prior.log_prior(label))
            .collect::<Result<Vec<_>>>()?;

        let mut combiners = self.combiners.create_many(labels.len());
        for combiner in &mut combiners {
            combiner.reset();
        }

        let mut misses = 0_usize;
        let mut joints = Vec::with_capacity(labels.len());
        let mut posteriors = Vec::with_capacity(labels.len());

        for observation in sequence.iter() {
            joints.clear();
            for (corpus, log_prior) in model.corpora.iter().zip(&log_priors) {
                let label = corpus.label();
                let cached = model
                    .cache
                    .as_ref()
                    .and_then(|cache| cache.get(label, observation));
                let value = match cached {
                    Some(value) => value,
                    None => {
                        misses += 1;
                        conditional_log_probability(
                            corpus,
                            observation,
                            self.calculator.as_ref(),
                            self.config.alpha,
                            model.vocabulary_size,
                        )?
                    }
                };
                if !value.is_finite() {
                    warn!(%observation, %label, "degenerate conditional probability");
                    return Err(BayesError::degenerate(observation, label));
                }
                // The mean of probabilities can round a few ulps above one.
                let likelihood =
                    Qualified::given_label(LogProbability::new(value.min(0.0))?, observation, label);
                joints.push(likelihood.joint_with(log_prior));
            }

            let marginal: Vec<f64> = joints.iter().map(|j| j.value().value()).collect();
            let evidence = Qualified::observation_marginal(
                LogProbability::new(log_sum_exp(&marginal).min(0.0))?,
                observation,
            );

            posteriors.clear();
            posteriors.extend(joints.iter().map(|j| j.posterior_from(&evidence).value()));
            feed(&mut combiners, &posteriors, self.config.scoring);
        }

        if misses > 0 {
            debug!(
                misses,
                "conditional probabilities computed without the cache; learn() may not have been invoked"
            );
        }

        for (label, combiner) in labels.into_iter().zip(&combiners) {
            let score = match self.config.scoring {
                ScoringConvention::Maximize => combiner.calculate(),
                ScoringConvention::Minimize => combiner.calculate_log(),
            };
            results.add(LabeledScore::new(label.clone(), score));
        }
        Ok(results)
    }
}

/// Feed one observation's posteriors to the per-label combiners.
fn feed(
    combiners: &mut [Box<dyn EvidenceCombiner>],
    posteriors: &[LogProbability],
    scoring: ScoringConvention,
) {
    let update = |(index, combiner): (usize, &mut Box<dyn EvidenceCombiner>)| match scoring {
        ScoringConvention::Maximize => combiner.combine_log(posteriors[index]),
        ScoringConvention::Minimize => {
            for (other, &posterior) in posteriors.iter().enumerate() {
                if other != index {
                    combiner.combine_log(posterior);
                }
            }
        }
    };

    #[cfg(feature = "parallel")]
    combiners.par_iter_mut().enumerate().for_each(update);

    #[cfg(not(feature = "parallel"))]
    combiners.iter_mut().enumerate().for_each(update);
}
