//! Textbayes: Naive Bayes text classification in pure Rust.
//!
//! Textbayes estimates, for an unseen observation sequence, the posterior
//! probability of each label learned from a set of labeled training corpora.
//! Arithmetic stays in the log domain; per-label evidence is aggregated by an
//! interchangeable combiner, with a log-odds formulation as the default.
//!
//! # Quick Start
//!
//! ```
//! use textbayes::prelude::*;
//!
//! let mut corpora = CorpusRegistry::new();
//! corpora
//!     .add(Label::new("sports"))
//!     .add_text("goal team match", BoundaryMode::NoBoundaries)
//!     .add_text("team score win", BoundaryMode::NoBoundaries);
//! corpora
//!     .add(Label::new("cooking"))
//!     .add_text("bake oven flour", BoundaryMode::NoBoundaries)
//!     .add_text("stir pan salt", BoundaryMode::NoBoundaries);
//!
//! let classifier = NaiveBayesClassifier::new().trained_with(corpora)?;
//! let scores = classifier.classify_text("the team scored a goal")?;
//! assert_eq!(scores.best().expect("two labels").label().name(), "sports");
//! # Ok::<(), textbayes::error::BayesError>(())
//! ```
//!
//! # Modules
//!
//! - [`observation`]: Observations, boundaries, sequences and tokenizers
//! - [`label`]: Labels and the label registry
//! - [`corpus`]: Documents, training corpora and the global dictionary
//! - [`probability`]: Validated probabilities, provenance tags and calculators
//! - [`prior`]: Label prior strategies
//! - [`combiner`]: Evidence combiners (naive, log-additive, eta)
//! - [`score`]: Thread-safe score collections with cached extremes
//! - [`classifier`]: The conditional-probability cache and classifier
//! - [`config`]: Classifier configuration

pub mod classifier;
pub mod combiner;
pub mod config;
pub mod corpus;
pub mod error;
pub mod label;
pub mod observation;
pub mod prelude;
pub mod prior;
pub mod probability;
pub mod score;

pub use classifier::{Classifier, NaiveBayesClassifier};
pub use config::ClassifierConfig;
pub use error::{BayesError, Result};
