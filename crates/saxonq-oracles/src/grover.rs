//! Grover phase and inversion oracles.
//!
//! With `n` qubits, the search register is `0..n - 1`; qubit `n - 1` is
//! left free so the fragments compose onto the search programs the
//! experiments build.

use saxonq_ir::{Program, QubitId};
use std::f64::consts::PI;
use tracing::{debug, instrument};

use crate::bits::{BitString, qubit_index};
use crate::error::{OracleError, OracleResult};

/// Phase oracle that flips the sign of the basis state `marked` only.
///
/// `x` on every qubit whose bit in `marked` is 0, a multi-controlled Z over
/// the search register, then the same `x` layer.
///
/// # Errors
///
/// - [`OracleError::DescriptorTooSmall`] for `n < 2` or `marked` longer than
///   `n - 1`.
/// - [`OracleError::InvalidDescriptor`] for `marked` shorter than `n - 1`.
#[instrument(skip_all, fields(n, marked = %marked))]
pub fn grover_phase(n: u32, marked: &BitString) -> OracleResult<Program> {
    let search = search_register(n)?;
    if marked.len() > search.len() {
        let required = u32::try_from(marked.len()).map_or(u32::MAX, |k| k.saturating_add(1));
        return Err(OracleError::too_small("Grover phase", required, n));
    }
    if marked.len() < search.len() {
        return Err(OracleError::invalid(
            "Grover phase",
            format!(
                "marked state has {} bits, the search register has {}",
                marked.len(),
                search.len()
            ),
        ));
    }

    let flips: Vec<QubitId> = marked.zeros().map(|i| QubitId(qubit_index(i))).collect();
    let mut b = Program::builder(n, 0);
    b.x_all(flips.iter().copied())?
        .multi_controlled_z(&search)?
        .x_all(flips)?;
    debug!(gates = b.len(), "Synthesized Grover phase oracle");
    Ok(b.finish())
}

/// Reflection about the uniform superposition of the search register.
///
/// # Errors
///
/// [`OracleError::DescriptorTooSmall`] for `n < 2`.
#[instrument]
pub fn grover_inversion(n: u32) -> OracleResult<Program> {
    let search = search_register(n)?;
    let mut b = Program::builder(n, 0);
    b.h_all(search.iter().copied())?
        .x_all(search.iter().copied())?
        .multi_controlled_z(&search)?
        .x_all(search.iter().copied())?
        .h_all(search.iter().copied())?;
    debug!(gates = b.len(), "Synthesized Grover inversion oracle");
    Ok(b.finish())
}

/// Number of phase and inversion rounds for `n` qubits.
///
/// The nearest integer to `π·√(2^(n−1))/4`, preferring the lower candidate
/// on a tie, minus one.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn grover_iterations(n: u32) -> usize {
    let states = 2f64.powi(i32::try_from(n.saturating_sub(1)).unwrap_or(i32::MAX));
    let optimum = PI * states.sqrt() / 4.0;
    let low = optimum.floor();
    let high = optimum.ceil();
    let nearest = if optimum - low <= high - optimum { low } else { high };
    (nearest as usize).saturating_sub(1)
}

fn search_register(n: u32) -> OracleResult<Vec<QubitId>> {
    if n < 2 {
        return Err(OracleError::too_small("Grover", 2, n));
    }
    Ok((0..n - 1).map(QubitId).collect())
}
