//! Property-based tests for print/parse roundtrip.
//!
//! Tests that program → QASM → program yields an equal program, including
//! exact angle parameters.

use proptest::prelude::*;
use saxonq_ir::{Angle, ClbitId, Program, QubitId};
use saxonq_qasm::{emit, expand, parse};

/// Gate operations that can be applied to a builder.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    X(u32),
    Rz(u32, Angle),
    U(u32, Angle, Angle, Angle),
    Cx(u32, u32),
    Cp(u32, u32, Angle),
    Ccx(u32, u32, u32),
    Swap(u32, u32),
    Barrier,
    Measure(u32),
}

fn arb_angle() -> impl Strategy<Value = Angle> {
    prop_oneof![
        (-8i32..=8, 1i32..=16)
            .prop_map(|(n, d)| Angle::pi_multiple(f64::from(n) / f64::from(d))),
        (0u32..12).prop_map(Angle::pi_over_power_of_two),
        (-10.0f64..10.0).prop_map(Angle::radians),
        finite_f64().prop_map(Angle::radians),
        finite_f64().prop_map(Angle::pi_multiple),
    ]
}

/// Any finite value, including huge and subnormal magnitudes.
fn finite_f64() -> impl Strategy<Value = f64> {
    prop::num::f64::POSITIVE
        | prop::num::f64::NEGATIVE
        | prop::num::f64::NORMAL
        | prop::num::f64::SUBNORMAL
        | prop::num::f64::ZERO
}

fn arb_gate_op(n: u32) -> impl Strategy<Value = GateOp> {
    prop_oneof![
        (0..n).prop_map(GateOp::H),
        (0..n).prop_map(GateOp::X),
        (0..n, arb_angle()).prop_map(|(q, a)| GateOp::Rz(q, a)),
        (0..n, arb_angle(), arb_angle(), arb_angle()).prop_map(|(q, a, b, c)| GateOp::U(q, a, b, c)),
        (0..n, 0..n).prop_map(|(c, t)| GateOp::Cx(c, t)),
        (0..n, 0..n, arb_angle()).prop_map(|(c, t, a)| GateOp::Cp(c, t, a)),
        (0..n, 0..n, 0..n).prop_map(|(a, b, t)| GateOp::Ccx(a, b, t)),
        (0..n, 0..n).prop_map(|(a, b)| GateOp::Swap(a, b)),
        Just(GateOp::Barrier),
        (0..n).prop_map(GateOp::Measure),
    ]
}

fn arb_program() -> impl Strategy<Value = Program> {
    (1_u32..=5).prop_flat_map(|n| {
        prop::collection::vec(arb_gate_op(n), 0..=15).prop_map(move |ops| {
            let mut b = Program::builder(n, n);
            for op in ops {
                // Invalid combinations (repeated qubits) are simply skipped.
                let _ = match op {
                    GateOp::H(q) => b.h(QubitId(q)),
                    GateOp::X(q) => b.x(QubitId(q)),
                    GateOp::Rz(q, a) => b.rz(a, QubitId(q)),
                    GateOp::U(q, t, p, l) => b.apply_angles("u", &[QubitId(q)], &[], &[t, p, l]),
                    GateOp::Cx(c, t) => b.cx(QubitId(c), QubitId(t)),
                    GateOp::Cp(c, t, a) => b.cp(a, QubitId(c), QubitId(t)),
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

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn roundtrip_preserves_program(program in arb_program()) {
        let text = emit(&program);
        let parsed = parse(&text).map_err(|e| TestCaseError::fail(format!("{e}\n{text}")))?;
        prop_assert_eq!(&parsed, &program);

        // Parsed instructions carry their source line: header is four lines.
        for (i, ins) in parsed.iter().enumerate() {
            prop_assert_eq!(ins.line(), Some(i + 5));
        }
    }

    #[test]
    fn expansion_covers_every_instruction(program in arb_program()) {
        let lines = expand(&program);
        let params: usize = program.iter().map(|ins| ins.params().len()).sum();
        prop_assert_eq!(lines.len(), program.len() + params);
    }
}
