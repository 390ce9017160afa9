use super::*;

fn o(s: &str) -> Observation {
    Observation::token(s)
}

fn l(s: &str) -> Label {
    Label::new(s)
}

fn lp(v: f64) -> LogProbability {
    LogProbability::new(v).expect("valid log-probability")
}

// ========== Scalar Domain Tests ==========

#[test]
fn test_probability_accepts_unit_interval() {
    for v in [0.0, 0.25, 1.0] {
        assert!((Probability::new(v).expect("in range").value() - v).abs() < f64::EPSILON);
    }
}

#[test]
fn test_probability_rejects_out_of_range() {
    for v in [-0.1, 1.000_001, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            Probability::new(v),
            Err(BayesError::InvalidProbability { .. })
        ));
    }
}

#[test]
fn test_log_probability_rejects_positive_and_non_finite() {
    for v in [0.5, f64::NAN, f64::NEG_INFINITY, f64::INFINITY] {
        assert!(LogProbability::new(v).is_err());
    }
    assert!(LogProbability::new(0.0).is_ok());
}

#[test]
fn test_zero_probability_has_no_log() {
    assert!(Probability::ZERO.to_log().is_err());
    assert!((Probability::ONE.to_log().expect("ln 1").value()).abs() < f64::EPSILON);
}

#[test]
fn test_log_round_trip() {
    let p = Probability::new(0.37).expect("valid");
    let back = p.to_log().expect("positive").to_plain();
    assert!((back.value() - 0.37).abs() < 1e-12);
}

#[test]
fn test_ln_complement() {
    let p = lp(0.3_f64.ln());
    assert!((p.ln_complement() - 0.7_f64.ln()).abs() < 1e-12);
    assert_eq!(LogProbability::CERTAIN.ln_complement(), f64::NEG_INFINITY);
}

#[test]
fn test_complement() {
    let p = Probability::new(0.25).expect("valid");
    assert!((p.complement().value() - 0.75).abs() < f64::EPSILON);
}

// ========== Provenance Tests ==========

#[test]
fn test_log_joint_and_posterior() {
    let (goal, sports) = (o("goal"), l("sports"));
    let likelihood = Qualified::given_label(lp(-2.0), &goal, &sports);
    let prior = Qualified::label_marginal(lp(-0.5), &sports);
    let joint = likelihood.joint_with(&prior);

    assert!((joint.value().value() + 2.5).abs() < 1e-12);
    assert_eq!(
        joint.provenance(),
        &Provenance::Joint {
            observation: &goal,
            label: &sports,
        }
    );

    let evidence = Qualified::observation_marginal(lp(-2.0), &goal);
    let posterior = joint.posterior_from(&evidence);
    assert!((posterior.value().value() + 0.5).abs() < 1e-12);
    assert_eq!(posterior.provenance().to_string(), "P(sports|goal)");
}

#[test]
fn test_tags_compare_by_value_not_address() {
    let (a, x) = (o("a"), l("x"));
    let (a_again, x_again) = (o("A"), l("x"));
    let joint = Qualified::given_label(lp(-1.0), &a, &x)
        .joint_with(&Qualified::label_marginal(lp(-1.0), &x_again));
    let posterior = joint.posterior_from(&Qualified::observation_marginal(lp(-1.0), &a_again));
    assert_eq!(posterior.provenance().to_string(), "P(x|a)");
}

#[test]
fn test_log_posterior_saturates_rounding_above_zero() {
    let (a, x) = (o("a"), l("x"));
    let joint = Qualified::given_label(lp(-1.0), &a, &x)
        .joint_with(&Qualified::label_marginal(LogProbability::CERTAIN, &x));
    let evidence = Qualified::observation_marginal(lp(-1.0 - 1e-15), &a);
    assert!(joint.posterior_from(&evidence).value().value() <= 0.0);
}

#[test]
fn test_plain_joint_and_posterior() {
    let p = |v| Probability::new(v).expect("valid");
    let (a, x) = (o("a"), l("x"));
    let joint = Qualified::given_label(p(0.2), &a, &x)
        .joint_with(&Qualified::label_marginal(p(0.5), &x));
    assert!((joint.value().value() - 0.1).abs() < 1e-12);

    let posterior = joint
        .posterior_from(&Qualified::observation_marginal(p(0.4), &a))
        .expect("non-zero evidence");
    assert!((posterior.value().value() - 0.25).abs() < 1e-12);

    let log = posterior.to_log().expect("positive");
    assert!((log.to_plain().value().value() - 0.25).abs() < 1e-12);
    assert_eq!(log.provenance(), posterior.provenance());
}

#[test]
fn test_plain_posterior_zero_evidence_fails() {
    let (a, x) = (o("a"), l("x"));
    let joint = Qualified::new(
        Probability::ZERO,
        Provenance::Joint {
            observation: &a,
            label: &x,
        },
    );
    let evidence = Qualified::observation_marginal(Probability::ZERO, &a);
    assert!(joint.posterior_from(&evidence).is_err());
}

#[test]
#[should_panic(expected = "cannot form a joint probability")]
fn test_joint_label_mismatch_panics() {
    let (a, x, y) = (o("a"), l("x"), l("y"));
    let likelihood = Qualified::given_label(lp(-1.0), &a, &x);
    let prior = Qualified::label_marginal(lp(-1.0), &y);
    let _ = likelihood.joint_with(&prior);
}

#[test]
#[should_panic(expected = "cannot form a posterior probability")]
fn test_posterior_observation_mismatch_panics() {
    let (a, b, x) = (o("a"), o("b"), l("x"));
    let joint = Qualified::given_label(lp(-1.0), &a, &x)
        .joint_with(&Qualified::label_marginal(lp(-1.0), &x));
    let evidence = Qualified::observation_marginal(lp(-0.5), &b);
    let _ = joint.posterior_from(&evidence);
}

#[test]
#[should_panic(expected = "cannot form a joint probability")]
fn test_joint_from_wrong_direction_panics() {
    // P(l|o) is not a likelihood.
    let (a, x) = (o("a"), l("x"));
    let wrong = Qualified::given_observation(lp(-1.0), &x, &a);
    let prior = Qualified::label_marginal(lp(-1.0), &x);
    let _ = wrong.joint_with(&prior);
}

// ========== log_sum_exp Tests ==========

#[test]
fn test_log_sum_exp_matches_naive() {
    let values = [-1.0, -2.0, -3.0];
    let naive = values.iter().map(|v: &f64| v.exp()).sum::<f64>().ln();
    assert!((log_sum_exp(&values) - naive).abs() < 1e-12);
}

#[test]
fn test_log_sum_exp_tiny_values() {
    let values = [-1000.0, -1000.0];
    assert!((log_sum_exp(&values) - (-1000.0 + 2.0_f64.ln())).abs() < 1e-9);
}

#[test]
fn test_log_sum_exp_empty() {
    assert_eq!(log_sum_exp(&[]), f64::NEG_INFINITY);
}

// ========== Calculator Tests ==========

#[test]
fn test_laplace_unsmoothed() {
    let p = LaplaceSmoothing.probability(3.0, 4.0).expect("non-zero length");
    assert!((p - 0.75).abs() < f64::EPSILON);
    assert!(matches!(
        LaplaceSmoothing.probability(1.0, 0.0),
        Err(BayesError::ZeroLength)
    ));
}

#[test]
fn test_laplace_alpha_zero_reduces_to_empirical() {
    let smoothed = LaplaceSmoothing
        .smoothed_probability(3.0, 4.0, 0.0, 100)
        .expect("alpha zero is valid");
    assert!((smoothed - 0.75).abs() < f64::EPSILON);

    let unseen = LaplaceSmoothing
        .smoothed_probability(0.0, 4.0, 0.0, 100)
        .expect("alpha zero is valid");
    assert_eq!(unseen, 0.0);
}

#[test]
fn test_laplace_rejects_bad_alpha() {
    for alpha in [-0.01, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            LaplaceSmoothing.smoothed_probability(1.0, 2.0, alpha, 3),
            Err(BayesError::InvalidHyperparameter { .. })
        ));
    }
}

#[test]
fn test_laplace_unseen_is_positive() {
    let p = LaplaceSmoothing
        .smoothed_probability(0.0, 2.0, 0.01, 3)
        .expect("valid");
    assert!(p > 0.0);
    assert!((p - 0.01 / 2.03).abs() < 1e-12);
}

#[test]
fn test_unsmoothed_ignores_alpha() {
    let p = Unsmoothed
        .smoothed_probability(1.0, 4.0, 5.0, 10)
        .expect("valid");
    assert!((p - 0.25).abs() < f64::EPSILON);
    assert!(Unsmoothed.smoothed_probability(1.0, 4.0, -1.0, 10).is_err());
}
