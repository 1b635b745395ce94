//! Property-based tests for program composition.
//!
//! Composition must never change its inputs, must keep length additive and
//! must keep every index inside the combined registers.

use proptest::prelude::*;
use saxonq_ir::{Angle, ClbitId, Program, QubitId};

/// Gate operations that can be applied to a builder.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    Rz(u32, i32),
    Cx(u32, u32),
    Measure(u32),
}

fn arb_program() -> impl Strategy<Value = Program> {
    (1_u32..=5).prop_flat_map(|n| {
        prop::collection::vec(arb_gate_op(n), 0..=12).prop_map(move |ops| {
            let mut b = Program::builder(n, n);
            for op in ops {
                let _ = match op {
                    GateOp::H(q) => b.h(QubitId(q)),
                    GateOp::Rz(q, k) => b.rz(Angle::pi_multiple(f64::from(k) / 8.0), QubitId(q)),
                    GateOp::Cx(c, t) if c != t => b.cx(QubitId(c), QubitId(t)),
                    GateOp::Cx(..) => continue,
                    GateOp::Measure(q) => b.measure(QubitId(q), ClbitId(q)),
                };
            }
            b.finish()
        })
    })
}

fn arb_gate_op(n: u32) -> impl Strategy<Value = GateOp> {
    prop_oneof![
        (0..n).prop_map(GateOp::H),
        (0..n, -16..16).prop_map(|(q, k)| GateOp::Rz(q, k)),
        (0..n, 0..n).prop_map(|(c, t)| GateOp::Cx(c, t)),
        (0..n).prop_map(GateOp::Measure),
    ]
}

fn in_bounds(program: &Program) -> bool {
    program.iter().all(|ins| {
        ins.qubits().all(|q| q.0 < program.num_qubits())
            && ins.clbits().iter().all(|c| c.0 < program.num_clbits())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn compose_is_additive(a in arb_program(), b in arb_program()) {
        let a_before = a.clone();
        let b_before = b.clone();
        let c = a.compose(&b).unwrap();

        prop_assert_eq!(c.len(), a.len() + b.len());
        prop_assert_eq!(c.num_qubits(), a.num_qubits() + b.num_qubits());
        prop_assert_eq!(c.num_clbits(), a.num_clbits() + b.num_clbits());
        prop_assert!(in_bounds(&c));
        prop_assert_eq!(&c.instructions()[..a.len()], a.instructions());
        prop_assert_eq!(a, a_before);
        prop_assert_eq!(b, b_before);
    }

    #[test]
    fn append_keeps_wires(a in arb_program(), b in arb_program()) {
        let c = a.append(&b);
        prop_assert_eq!(c.len(), a.len() + b.len());
        prop_assert!(in_bounds(&c));
        prop_assert_eq!(&c.instructions()[a.len()..], b.instructions());
    }

    #[test]
    fn depth_never_exceeds_length(a in arb_program()) {
        prop_assert!(a.depth() <= a.len());
        prop_assert!(a.dependency_graph().is_consistent());
    }
}
