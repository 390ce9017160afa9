use super::*;

fn p(v: f64) -> Probability {
    Probability::new(v).expect("valid probability")
}

fn lp(v: f64) -> LogProbability {
    p(v).to_log().expect("positive probability")
}

fn all() -> Vec<Box<dyn EvidenceCombiner>> {
    vec![
        CombinerKind::Naive.create(),
        CombinerKind::Log.create(),
        CombinerKind::Eta.create(),
    ]
}

// ========== Identity State Tests ==========

#[test]
fn test_fresh_combiners_are_neutral() {
    for combiner in all() {
        assert!((combiner.calculate() - 0.5).abs() < 1e-12, "{combiner:?}");
        assert!((combiner.calculate_log() - 0.5_f64.ln()).abs() < 1e-12, "{combiner:?}");
    }
}

#[test]
fn test_reset_restores_identity() {
    for mut combiner in all() {
        combiner.combine(p(0.9));
        combiner.combine(p(0.2));
        combiner.reset();
        assert!((combiner.calculate() - 0.5).abs() < 1e-12, "{combiner:?}");
    }
}

#[test]
fn test_naive_identity_is_multiplicative() {
    let mut combiner = NaiveCombiner::new();
    combiner.reset();
    combiner.combine(p(0.8));
    assert!((combiner.calculate() - 0.8).abs() < 1e-12);
}

#[test]
fn test_eta_identity_is_zero() {
    let mut combiner = EtaCombiner::new();
    combiner.combine(p(0.3));
    combiner.reset();
    assert_eq!(combiner.eta(), 0.0);
}

// ========== Single Observation Tests ==========

#[test]
fn test_single_observation_returns_input() {
    for mut combiner in all() {
        combiner.combine(p(0.73));
        assert!((combiner.calculate() - 0.73).abs() < 1e-12, "{combiner:?}");
    }
}

#[test]
fn test_combine_log_matches_combine() {
    for kind in [CombinerKind::Naive, CombinerKind::Log, CombinerKind::Eta] {
        let mut plain = kind.create();
        let mut log = kind.create();
        for v in [0.9, 0.4, 0.65] {
            plain.combine(p(v));
            log.combine_log(lp(v));
        }
        assert!(
            (plain.calculate() - log.calculate()).abs() < 1e-12,
            "{kind:?}"
        );
    }
}

// ========== Known Value Tests ==========

#[test]
fn test_two_observations_known_value() {
    // 0.9 * 0.8 / (0.9 * 0.8 + 0.1 * 0.2)
    let expected = 0.72 / 0.74;
    for mut combiner in all() {
        combiner.combine(p(0.9));
        combiner.combine(p(0.8));
        assert!((combiner.calculate() - expected).abs() < 1e-12, "{combiner:?}");
        assert!(
            (combiner.calculate_log() - expected.ln()).abs() < 1e-12,
            "{combiner:?}"
        );
    }
}

#[test]
fn test_opposing_evidence_cancels() {
    for mut combiner in all() {
        combiner.combine(p(0.8));
        combiner.combine(p(0.2));
        assert!((combiner.calculate() - 0.5).abs() < 1e-12, "{combiner:?}");
    }
}

// ========== Numerical Stability Tests ==========

#[test]
fn test_naive_underflows_on_long_sequences() {
    // term1 = 0.01^2000 underflows, term2 = 0.99^2000 does not.
    let mut combiner = NaiveCombiner::new();
    for _ in 0..2000 {
        combiner.combine(p(0.01));
    }
    assert_eq!(combiner.calculate(), 0.0);
    assert_eq!(combiner.calculate_log(), f64::NEG_INFINITY);
}

#[test]
fn test_naive_both_terms_underflow_to_zero() {
    let mut combiner = NaiveCombiner::new();
    for _ in 0..1100 {
        combiner.combine(p(0.5));
    }
    assert!(!combiner.calculate().is_nan());
    assert_eq!(combiner.calculate(), 0.0);
    assert_eq!(combiner.calculate_log(), f64::NEG_INFINITY);

    let mut log = LogCombiner::new();
    for _ in 0..1100 {
        log.combine(p(0.5));
    }
    assert!((log.calculate() - 0.5).abs() < 1e-12);
}

#[test]
fn test_log_and_eta_survive_long_sequences() {
    let mut log = LogCombiner::new();
    let mut eta = EtaCombiner::new();
    for i in 0..2000 {
        let v = if i % 3 == 0 { 0.02 } else { 0.015 };
        log.combine(p(v));
        eta.combine(p(v));
    }
    assert!(log.calculate().is_finite());
    assert!(eta.calculate().is_finite());
    assert!(log.calculate_log().is_finite());
    assert!(eta.calculate_log().is_finite());
    assert!(log.calculate_log() < -1000.0);
    assert!((log.calculate_log() - eta.calculate_log()).abs() < 1e-6);
}

#[test]
fn test_certain_evidence() {
    for mut combiner in all() {
        combiner.combine_log(LogProbability::CERTAIN);
        assert!((combiner.calculate() - 1.0).abs() < 1e-12, "{combiner:?}");
        assert!(combiner.calculate_log().abs() < 1e-12, "{combiner:?}");
    }
}

#[test]
fn test_kind_serde_names() {
    let json = serde_json::to_string(&CombinerKind::Eta).expect("serialize");
    assert_eq!(json, "\"eta\"");
    let kind: CombinerKind = serde_json::from_str("\"log\"").expect("deserialize");
    assert_eq!(kind, CombinerKind::Log);
}

#[test]
fn test_create_many_independent() {
    let mut combiners = CombinerKind::Eta.create_many(3);
    combiners[0].combine(p(0.9));
    assert!((combiners[1].calculate() - 0.5).abs() < 1e-12);
    assert!((combiners[0].calculate() - 0.9).abs() < 1e-12);
}
