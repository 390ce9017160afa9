//! Classifier configuration.

use serde::{Deserialize, Serialize};

use crate::combiner::CombinerKind;
use crate::error::{BayesError, Result};
use crate::observation::{BoundaryMode, CaseSensitivity};
use crate::prior::PriorStrategy;

/// Default Laplace smoothing strength.
pub const DEFAULT_ALPHA: f64 = 0.01;

/// How per-label scores are produced and ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringConvention {
    /// Score approximates `P(label | sequence)`; highest wins.
    #[default]
    Maximize,
    /// Score is the log-evidence of every other label; lowest wins.
    Minimize,
}

/// Configuration for [`NaiveBayesClassifier`](crate::classifier::NaiveBayesClassifier).
///
/// # Examples
///
/// ```
/// use textbayes::combiner::CombinerKind;
/// use textbayes::config::{ClassifierConfig, ScoringConvention};
///
/// let config = ClassifierConfig::new()
///     .with_alpha(0.5)?
///     .with_combiner(CombinerKind::Log)
///     .with_scoring(ScoringConvention::Minimize);
/// assert!(config.validate().is_ok());
///
/// let parsed = ClassifierConfig::from_json(r#"{"alpha": 0.1, "combiner": "naive"}"#)?;
/// assert_eq!(parsed.combiner, CombinerKind::Naive);
/// # Ok::<(), textbayes::error::BayesError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Laplace smoothing strength (finite, >= 0)
    pub alpha: f64,

    /// Label prior strategy
    pub prior: PriorStrategy,

    /// Evidence combiner strategy
    pub combiner: CombinerKind,

    /// Scoring convention
    pub scoring: ScoringConvention,

    /// Precompute conditional probabilities during learn
    pub use_cache: bool,

    /// Token comparison mode for raw-text classification
    pub case: CaseSensitivity,

    /// Boundary handling for raw-text classification
    pub boundaries: BoundaryMode,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            prior: PriorStrategy::default(),
            combiner: CombinerKind::default(),
            scoring: ScoringConvention::default(),
            use_cache: true,
            case: CaseSensitivity::default(),
            boundaries: BoundaryMode::default(),
        }
    }
}

impl ClassifierConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::Config`] on malformed JSON or invalid values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::Config`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration parameters.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::InvalidHyperparameter`] if `alpha` is negative
    /// or non-finite.
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(BayesError::invalid_alpha(self.alpha));
        }
        Ok(())
    }

    /// Set smoothing strength with validation.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::InvalidHyperparameter`] if `alpha` is negative
    /// or non-finite.
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self> {
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(BayesError::invalid_alpha(alpha));
        }
        self.alpha = alpha;
        Ok(self)
    }

    /// Set the prior strategy.
    #[must_use]
    pub fn with_prior(mut self, prior: PriorStrategy) -> Self {
        self.prior = prior;
        self
    }

    /// Set the combiner strategy.
    #[must_use]
    pub fn with_combiner(mut self, combiner: CombinerKind) -> Self {
        self.combiner = combiner;
        self
    }

    /// Set the scoring convention.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConvention) -> Self {
        self.scoring = scoring;
        self
    }

    /// Enable or disable the conditional-probability cache.
    #[must_use]
    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// Set token comparison mode for raw text.
    #[must_use]
    pub fn with_case(mut self, case: CaseSensitivity) -> Self {
        self.case = case;
        self
    }

    /// Set boundary handling for raw text.
    #[must_use]
    pub fn with_boundaries(mut self, boundaries: BoundaryMode) -> Self {
        self.boundaries = boundaries;
        self
    }
}
