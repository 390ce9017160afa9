use super::*;
use crate::error::BayesError;

fn seq(text: &str) -> ObservationSequence {
    ObservationSequence::from_text(text, BoundaryMode::NoBoundaries)
}

// ========== Document Tests ==========

#[test]
fn test_document_frequency_and_length() {
    let doc = Document::new(seq("the cat and the hat"));
    assert_eq!(doc.len(), 5);
    assert_eq!(doc.frequency(&Observation::token("the")), 2);
    assert_eq!(doc.frequency(&Observation::token("THE")), 2);
    assert_eq!(doc.frequency(&Observation::token("dog")), 0);
    assert_eq!(doc.distinct().count(), 4);
}

#[test]
fn test_document_probability() {
    let doc = Document::new(seq("a a b c"));
    let p = doc.probability(&Observation::token("a")).expect("non-empty");
    assert!((p - 0.5).abs() < 1e-12);
}

#[test]
fn test_document_probability_zero_length_fails() {
    let doc = Document::new(ObservationSequence::new());
    assert!(matches!(
        doc.probability(&Observation::token("a")),
        Err(BayesError::ZeroLength)
    ));
}

#[test]
fn test_document_smoothed_probability() {
    let doc = Document::new(seq("a a b c"));
    // (2 + 1) / (1 * 10 + 4)
    let p = doc
        .smoothed_probability(&Observation::token("a"), 1.0, 10)
        .expect("valid alpha");
    assert!((p - 3.0 / 14.0).abs() < 1e-12);
}

// ========== Corpus Tests ==========

#[test]
fn test_corpus_statistics() {
    let mut corpus = TrainingCorpus::new(Label::new("pets"));
    corpus.add_text("cat dog", BoundaryMode::NoBoundaries);
    corpus.add_text("dog dog bird", BoundaryMode::NoBoundaries);

    assert_eq!(corpus.document_count(), 2);
    assert_eq!(corpus.total_document_length(), 5);
    assert_eq!(corpus.set_vocabulary_size(), 3);
    assert_eq!(corpus.frequency(&Observation::token("dog")), 3);
    assert_eq!(corpus.documents().count(), 2);
}

#[test]
fn test_corpus_counts_boundaries() {
    let mut corpus = TrainingCorpus::new(Label::new("x"));
    corpus.add_text("one two", BoundaryMode::AddBoundaries);
    assert_eq!(corpus.total_document_length(), 4);
    assert_eq!(corpus.frequency(&Observation::start()), 1);
}

// ========== Registry Tests ==========

#[test]
fn test_registry_add_reuses_corpus() {
    let mut corpora = CorpusRegistry::new();
    corpora.add(Label::new("a")).add_text("x", BoundaryMode::NoBoundaries);
    corpora.add(Label::new("A")).add_text("y", BoundaryMode::NoBoundaries);

    assert_eq!(corpora.len(), 1);
    let corpus = corpora.get(&Label::new("a")).expect("registered");
    assert_eq!(corpus.document_count(), 2);
}

#[test]
fn test_registry_insert_duplicate_fails() {
    let mut corpora = CorpusRegistry::new();
    corpora
        .insert(TrainingCorpus::new(Label::new("a")))
        .expect("first insert");
    let err = corpora
        .insert(TrainingCorpus::new(Label::new("a")))
        .expect_err("duplicate label");
    assert!(matches!(err, BayesError::Other(_)));
    assert!(err.to_string().contains("'a' already registered"));
}

#[test]
fn test_registry_global_vocabulary() {
    let mut corpora = CorpusRegistry::new();
    corpora
        .add(Label::new("left"))
        .add_text("left center", BoundaryMode::NoBoundaries);
    corpora
        .add(Label::new("right"))
        .add_text("right center center", BoundaryMode::NoBoundaries);

    assert_eq!(corpora.vocabulary_size(), 3);
    assert_eq!(corpora.frequency(&Observation::token("center")), 3);
    assert!(corpora.contains(&Observation::token("left")));
    assert!(!corpora.contains(&Observation::token("up")));

    let vocabulary = corpora.vocabulary();
    assert_eq!(vocabulary.get(&Observation::token("center")), Some(&3));
    assert_eq!(
        corpora.labels().map(Label::name).collect::<Vec<_>>(),
        vec!["left", "right"]
    );
}

#[test]
fn test_empty_registry() {
    let corpora = CorpusRegistry::new();
    assert!(corpora.is_empty());
    assert_eq!(corpora.vocabulary_size(), 0);
}

#[test]
fn test_rekeyed_splits_and_merges_case() {
    let mut corpora = CorpusRegistry::new();
    corpora
        .add(Label::new("east"))
        .add_text("Boston boston", BoundaryMode::NoBoundaries);
    assert!(corpora.is_keyed(CaseSensitivity::Insensitive));
    assert_eq!(corpora.vocabulary_size(), 1);

    let sensitive = corpora.rekeyed(CaseSensitivity::Sensitive);
    assert!(sensitive.is_keyed(CaseSensitivity::Sensitive));
    assert!(!sensitive.is_keyed(CaseSensitivity::Insensitive));
    assert_eq!(sensitive.vocabulary_size(), 2);
    let east = sensitive.get(&Label::new("east")).expect("label kept");
    assert_eq!(east.document_count(), 1);
    assert_eq!(east.frequency(&Observation::token_with("Boston", CaseSensitivity::Sensitive)), 1);

    let folded = sensitive.rekeyed(CaseSensitivity::Insensitive);
    assert_eq!(folded.vocabulary_size(), 1);
    assert_eq!(folded.frequency(&Observation::token("BOSTON")), 2);
}
