// =========================================================================
// FALSIFY-CMB: evidence combiner contract
//
// Every strategy computes Π pᵢ / (Π pᵢ + Π (1 - pᵢ)). These tests pin the
// strategies to each other and to the closed form, and check the identity
// state after reset.
//
// References:
//   - Robinson (2003) "A Statistical Approach to the Spam Problem"
// =========================================================================

use super::*;

fn closed_form(ps: &[f64]) -> f64 {
    let t1: f64 = ps.iter().product();
    let t2: f64 = ps.iter().map(|p| 1.0 - p).product();
    t1 / (t1 + t2)
}

fn feed(kind: CombinerKind, ps: &[f64]) -> Box<dyn EvidenceCombiner> {
    let mut combiner = kind.create();
    for &v in ps {
        combiner.combine(Probability::new(v).expect("valid probability"));
    }
    combiner
}

const SAMPLE: [f64; 6] = [0.91, 0.35, 0.6, 0.08, 0.77, 0.5];

/// FALSIFY-CMB-001: Every strategy matches the closed form
#[test]
fn falsify_cmb_001_matches_closed_form() {
    let expected = closed_form(&SAMPLE);
    for kind in [CombinerKind::Naive, CombinerKind::Log, CombinerKind::Eta] {
        let got = feed(kind, &SAMPLE).calculate();
        assert!(
            (got - expected).abs() < 1e-12,
            "FALSIFIED CMB-001: {kind:?} calculate = {got}, closed form = {expected}"
        );
    }
}

/// FALSIFY-CMB-002: Eta and log-additive agree
#[test]
fn falsify_cmb_002_eta_equals_log() {
    let eta = feed(CombinerKind::Eta, &SAMPLE);
    let log = feed(CombinerKind::Log, &SAMPLE);
    let diff = (eta.calculate() - log.calculate()).abs();
    assert!(diff < 1e-14, "FALSIFIED CMB-002: eta and log differ by {diff}");
    let diff_log = (eta.calculate_log() - log.calculate_log()).abs();
    assert!(
        diff_log < 1e-12,
        "FALSIFIED CMB-002: eta and log calculate_log differ by {diff_log}"
    );
}

/// FALSIFY-CMB-003: calculate_log is the log of calculate
#[test]
fn falsify_cmb_003_calculate_log_consistent() {
    for kind in [CombinerKind::Naive, CombinerKind::Log, CombinerKind::Eta] {
        let combiner = feed(kind, &SAMPLE);
        let lhs = combiner.calculate_log();
        let rhs = combiner.calculate().ln();
        assert!(
            (lhs - rhs).abs() < 1e-12,
            "FALSIFIED CMB-003: {kind:?} calculate_log = {lhs}, ln(calculate) = {rhs}"
        );
    }
}

/// FALSIFY-CMB-004: Results stay in [0, 1]
#[test]
fn falsify_cmb_004_result_in_unit_interval() {
    for kind in [CombinerKind::Naive, CombinerKind::Log, CombinerKind::Eta] {
        let got = feed(kind, &[0.999_999, 0.999_999, 0.999_999]).calculate();
        assert!(
            (0.0..=1.0).contains(&got),
            "FALSIFIED CMB-004: {kind:?} calculate = {got}, outside [0, 1]"
        );
        let got = feed(kind, &[1e-9, 1e-9]).calculate();
        assert!(
            (0.0..=1.0).contains(&got),
            "FALSIFIED CMB-004: {kind:?} calculate = {got}, outside [0, 1]"
        );
    }
}

/// FALSIFY-CMB-005: Order of observations does not matter
#[test]
fn falsify_cmb_005_order_independent() {
    let mut reversed = SAMPLE;
    reversed.reverse();
    for kind in [CombinerKind::Naive, CombinerKind::Log, CombinerKind::Eta] {
        let a = feed(kind, &SAMPLE).calculate();
        let b = feed(kind, &reversed).calculate();
        assert!(
            (a - b).abs() < 1e-12,
            "FALSIFIED CMB-005: {kind:?} forward = {a}, reversed = {b}"
        );
    }
}

/// FALSIFY-CMB-006: Reset then refeed reproduces a fresh combiner
#[test]
fn falsify_cmb_006_reset_is_fresh() {
    for kind in [CombinerKind::Naive, CombinerKind::Log, CombinerKind::Eta] {
        let mut reused = feed(kind, &[0.1, 0.2, 0.3]);
        reused.reset();
        for &v in &SAMPLE {
            reused.combine(Probability::new(v).expect("valid"));
        }
        let fresh = feed(kind, &SAMPLE);
        assert!(
            (reused.calculate() - fresh.calculate()).abs() < 1e-15,
            "FALSIFIED CMB-006: {kind:?} reused combiner kept state across reset"
        );
    }
}

/// FALSIFY-CMB-007: No strategy reports NaN, even past underflow
#[test]
fn falsify_cmb_007_never_nan() {
    let long = [0.5; 1200];
    for kind in [CombinerKind::Naive, CombinerKind::Log, CombinerKind::Eta] {
        let combiner = feed(kind, &long);
        let got = combiner.calculate();
        assert!(
            !got.is_nan() && (0.0..=1.0).contains(&got),
            "FALSIFIED CMB-007: {kind:?} calculate = {got} after 1200 observations"
        );
        assert!(
            !combiner.calculate_log().is_nan(),
            "FALSIFIED CMB-007: {kind:?} calculate_log is NaN"
        );
    }
}
