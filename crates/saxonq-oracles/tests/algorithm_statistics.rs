//! Outcome statistics of the synthesized algorithms, checked against a
//! dense statevector.

mod common;

use common::{distribution, most_frequent};
use rand::SeedableRng;
use rand::rngs::StdRng;
use saxonq_ir::Program;
use saxonq_oracles::protocol::{
    bernstein_vazirani_experiment, deutsch_jozsa_experiment, grover_program, grover_search,
    qft_period_experiment, simon_experiment,
};
use saxonq_oracles::{BitString, grover_iterations, shor_period_finding};

fn probability_of(program: &Program, accept: impl Fn(&BitString) -> bool) -> f64 {
    distribution(program)
        .into_iter()
        .filter(|(outcome, _)| accept(&outcome.parse().unwrap()))
        .map(|(_, p)| p)
        .sum()
}

#[test]
fn test_grover_finds_marked_state() {
    let marked: BitString = "01".parse().unwrap();
    let program = grover_program(3, &marked, grover_iterations(3)).unwrap();
    let p = probability_of(&program, |outcome| *outcome == marked);
    assert!(p >= 0.9, "p = {p}");
}

#[test]
fn test_grover_search_verifies_every_marked_state() {
    for value in 0..8 {
        let marked = BitString::from_value(value, 3);
        let mut verifier = |program: &Program| most_frequent(program);
        let search = grover_search(4, &marked, &mut verifier).unwrap();
        assert!(search.verified, "marked {marked}");
        assert_eq!(search.attempts, 1);
    }
}

#[test]
fn test_shor_peaks_at_multiples_of_inverse_order() {
    // 7 has order 4 modulo 15; five counting bits give peaks at s·32/4.
    let program = shor_period_finding(15, 7).unwrap();
    let p = probability_of(&program, |outcome| [0, 8, 16, 24].contains(&outcome.to_value()));
    assert!((p - 1.0).abs() < 1e-6, "p = {p}");

    // 11 has order 2.
    let program = shor_period_finding(15, 11).unwrap();
    let p = probability_of(&program, |outcome| [0, 16].contains(&outcome.to_value()));
    assert!((p - 1.0).abs() < 1e-6, "p = {p}");
}

#[test]
fn test_bernstein_vazirani_reads_secret() {
    for seed in 0..4 {
        let experiment = bernstein_vazirani_experiment(4, &mut StdRng::seed_from_u64(seed)).unwrap();
        let dist = distribution(&experiment.program);
        assert_eq!(dist.len(), 1);
        let outcome: BitString = dist.keys().next().unwrap().parse().unwrap();
        assert_eq!(outcome.measurement_order(), experiment.params["BV_code"]);
    }
}

#[test]
fn test_deutsch_jozsa_separates_classes() {
    for seed in 0..16 {
        let experiment = deutsch_jozsa_experiment(4, &mut StdRng::seed_from_u64(seed)).unwrap();
        let all_zero = probability_of(&experiment.program, BitString::is_zero);
        if experiment.summary.contains("constant") {
            assert!((all_zero - 1.0).abs() < 1e-9);
        } else {
            assert!(all_zero < 1e-9);
        }
    }
}

#[test]
fn test_simon_outcomes_orthogonal_to_secret() {
    for seed in 0..4 {
        let experiment = simon_experiment(3, &mut StdRng::seed_from_u64(seed)).unwrap();
        let code = experiment.params["Simon_code"].as_str().unwrap();
        // Reported highest bit first.
        let secret: BitString = code.chars().rev().collect::<String>().parse().unwrap();
        for outcome in distribution(&experiment.program).keys() {
            let y: BitString = outcome.parse().unwrap();
            let dot = (y.to_value() & secret.to_value()).count_ones();
            assert_eq!(dot % 2, 0, "y = {y}, secret = {secret}");
        }
    }
}

#[test]
fn test_qft_period_outcome_matches_label() {
    for seed in 0..6 {
        let experiment = qft_period_experiment(3, &mut StdRng::seed_from_u64(seed)).unwrap();
        let label = experiment.params["period"].as_str().unwrap();
        let dist = distribution(&experiment.program);
        assert!((dist[label] - 1.0).abs() < 1e-6, "{dist:?}");
    }
}
