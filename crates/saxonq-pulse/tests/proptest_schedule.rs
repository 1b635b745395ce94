//! Property-based tests for pulse scheduling.
//!
//! Events sharing a qubit never overlap, and every start time is explained
//! by the end of an earlier event on one of the same qubits.

use proptest::prelude::*;
use saxonq_ir::{ClbitId, ProcessorCatalog, Program, QubitId};
use saxonq_pulse::{DurationModel, PulseEvent, transpile};

#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    Rz(u32),
    Cx(u32, u32),
    Ccx(u32, u32, u32),
    Swap(u32, u32),
    Barrier,
    Measure(u32),
}

fn arb_gate_op(n: u32) -> impl Strategy<Value = GateOp> {
    prop_oneof![
        (0..n).prop_map(GateOp::H),
        (0..n).prop_map(GateOp::Rz),
        (0..n, 0..n).prop_map(|(c, t)| GateOp::Cx(c, t)),
        (0..n, 0..n, 0..n).prop_map(|(a, b, t)| GateOp::Ccx(a, b, t)),
        (0..n, 0..n).prop_map(|(a, b)| GateOp::Swap(a, b)),
        Just(GateOp::Barrier),
        (0..n).prop_map(GateOp::Measure),
    ]
}

fn arb_program() -> impl Strategy<Value = Program> {
    (1_u32..=4).prop_flat_map(|n| {
        prop::collection::vec(arb_gate_op(n), 0..=25).prop_map(move |ops| {
            let mut b = Program::builder(n, n);
            for op in ops {
                let _ = match op {
                    GateOp::H(q) => b.h(QubitId(q)),
                    GateOp::Rz(q) => b.rz(0.125, QubitId(q)),
                    GateOp::Cx(c, t) => b.cx(QubitId(c), QubitId(t)),
                    GateOp::Ccx(a, c, t) => b.ccx(QubitId(a), QubitId(c), QubitId(t)),
                    GateOp::Swap(a, c) => b.swap(QubitId(a), QubitId(c)),
                    GateOp::Barrier => b.barrier_all(),
                    GateOp::Measure(q) => b.measure(QubitId(q), ClbitId(q)),
                };
            }
            b.finish()
        })
    })
}

fn shares_qubit(a: &PulseEvent, b: &PulseEvent) -> bool {
    a.qubits.iter().any(|q| b.touches(*q))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn dependent_events_never_overlap(program in arb_program()) {
        let catalog = ProcessorCatalog::builtin();
        let profile = catalog.require("Tick").unwrap();
        let schedule = transpile(&program, profile).unwrap();
        prop_assert_eq!(schedule.len(), program.len());

        let mut by_index: Vec<&PulseEvent> = schedule.events().iter().collect();
        by_index.sort_by_key(|e| e.index);
        for (i, later) in by_index.iter().enumerate() {
            for earlier in &by_index[..i] {
                if shares_qubit(earlier, later) {
                    prop_assert!(earlier.end_ns() <= later.start_ns);
                }
            }
        }
    }

    #[test]
    fn start_times_have_no_unexplained_gaps(program in arb_program()) {
        let catalog = ProcessorCatalog::builtin();
        let profile = catalog.require("Trick").unwrap();
        let schedule = transpile(&program, profile).unwrap();

        let mut by_index: Vec<&PulseEvent> = schedule.events().iter().collect();
        by_index.sort_by_key(|e| e.index);
        for (i, later) in by_index.iter().enumerate() {
            let ready = by_index[..i]
                .iter()
                .filter(|earlier| shares_qubit(earlier, later))
                .map(|earlier| earlier.end_ns())
                .max()
                .unwrap_or(0);
            prop_assert_eq!(later.start_ns, ready);
        }
    }

    #[test]
    fn events_sorted_and_durations_deterministic(program in arb_program()) {
        let catalog = ProcessorCatalog::builtin();
        let profile = catalog.require("Tick").unwrap();
        let model = DurationModel::for_profile(profile).unwrap();
        let schedule = transpile(&program, profile).unwrap();

        for pair in schedule.events().windows(2) {
            prop_assert!((pair[0].start_ns, pair[0].index) < (pair[1].start_ns, pair[1].index));
        }
        for event in schedule.events() {
            let instruction = program.get(event.index).unwrap();
            prop_assert_eq!(event.calibration, model.calibrate(instruction));
        }
    }
}
