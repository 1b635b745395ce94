//! State-preparation experiments.

use rand::Rng;
use saxonq_ir::{Angle, ClbitId, Program, QubitId};
use serde_json::Value;

use super::{Experiment, ExperimentCategory, require_qubits};
use crate::bits::{BitString, qubit_index};
use crate::error::OracleResult;

/// Uniform superposition of all `n`-qubit basis states, measured.
///
/// # Errors
///
/// [`OracleError::DescriptorTooSmall`](crate::OracleError::DescriptorTooSmall)
/// for `n == 0`.
pub fn superposition(n: u32) -> OracleResult<Experiment> {
    require_qubits("superposition", 1, n)?;
    let mut b = Program::builder(n, n);
    b.h_all((0..n).map(QubitId))?.measure_all()?;
    Ok(Experiment::new(
        ExperimentCategory::Superposition,
        b.finish(),
        "You created a superposition of all possible states",
    )
    .with_param("none", Value::Null))
}

/// Carry `|1⟩` from the first to the last of `n` qubits through a chain of
/// swaps, each written as three `cx`.
///
/// # Errors
///
/// [`OracleError::DescriptorTooSmall`](crate::OracleError::DescriptorTooSmall)
/// for `n < 2`.
pub fn state_transfer(n: u32) -> OracleResult<Experiment> {
    require_qubits("state transfer", 2, n)?;
    let mut b = Program::builder(n, n);
    b.x(QubitId(0))?;
    for i in 0..n - 1 {
        let (a, c) = (QubitId(i), QubitId(i + 1));
        b.cx(a, c)?.cx(c, a)?.cx(a, c)?;
    }
    b.measure_all()?;
    Ok(Experiment::new(
        ExperimentCategory::StateTransfer,
        b.finish(),
        "You transferred the one from the first qubit into the last qubit",
    )
    .with_param("none", Value::Null))
}

/// Teleport `R_x(θ)|0⟩` from qubit 0 to qubit 2, with `θ` uniform in
/// `[0, 2π)`.
pub fn teleportation<R: Rng + ?Sized>(rng: &mut R) -> OracleResult<Experiment> {
    let turns: f64 = rng.gen_range(0.0..1.0);
    let theta = Angle::pi_multiple(2.0 * turns);

    let (q0, q1, q2) = (QubitId(0), QubitId(1), QubitId(2));
    let mut b = Program::builder(3, 1);
    b.rx(theta, q0)?
        // Bell pair between qubits 1 and 2.
        .h(q1)?
        .cx(q1, q2)?
        .cx(q0, q1)?
        .h(q0)?
        .cx(q1, q2)?
        .cz(q0, q2)?
        .measure(q2, ClbitId(0))?;

    let summary = format!(
        "You created the state R_x({:.3}π)|0> and teleported it",
        2.0 * turns
    );
    Ok(
        Experiment::new(ExperimentCategory::Teleportation, b.finish(), summary)
            .with_param("angle", theta.as_f64()),
    )
}

/// One of the four Bell states, chosen at random.
pub fn bell_state<R: Rng + ?Sized>(rng: &mut R) -> OracleResult<Experiment> {
    let code = BitString::random(2, rng);
    let mut b = Program::builder(2, 2);
    b.x_all(code.ones().map(|i| QubitId(qubit_index(i))))?
        .h(QubitId(0))?
        .cx(QubitId(0), QubitId(1))?
        .measure_all()?;

    let label = code.measurement_order();
    let summary = format!("You created the Bell state {label}");
    Ok(Experiment::new(ExperimentCategory::BellState, b.finish(), summary).with_param("BellState", label))
}

/// A GHZ state over `n` qubits with randomly flipped inputs.
///
/// # Errors
///
/// [`OracleError::DescriptorTooSmall`](crate::OracleError::DescriptorTooSmall)
/// for `n < 3`.
pub fn ghz_state<R: Rng + ?Sized>(n: u32, rng: &mut R) -> OracleResult<Experiment> {
    require_qubits("GHZ state", 3, n)?;
    let code = BitString::random(n as usize, rng);
    let mut b = Program::builder(n, n);
    for q in (0..n).filter(|&q| code.bit(q as usize)) {
        b.x(QubitId(q))?;
    }
    b.h(QubitId(0))?;
    for i in 0..n - 1 {
        b.cx(QubitId(i), QubitId(i + 1))?;
    }
    b.measure_all()?;

    let label = code.measurement_order();
    let summary = format!("You created the {label} GHZ state");
    Ok(Experiment::new(ExperimentCategory::GhzState, b.finish(), summary).with_param("GHZState", label))
}
