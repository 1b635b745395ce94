//! Quantum Fourier transform.
//!
//! Qubit 0 carries the most significant bit of both input and output. An
//! arbitrary ordering is available to other synthesizers through
//! [`apply_qft`], which treats `qubits[0]` as the most significant.

use saxonq_ir::{Angle, Program, ProgramBuilder, QubitId};
use tracing::{debug, instrument};

use crate::error::{OracleError, OracleResult};

/// Quantum Fourier transform on `n` qubits.
///
/// `h` on qubit `i`, then a controlled phase of `π / 2^(j−i)` from every
/// later qubit `j`, and finally swaps that reverse the qubit order.
///
/// # Errors
///
/// [`OracleError::DescriptorTooSmall`] for `n == 0`.
#[instrument]
pub fn qft(n: u32) -> OracleResult<Program> {
    fourier(n, false)
}

/// Inverse of [`qft`]: the same gates reversed, with negated angles.
///
/// # Errors
///
/// [`OracleError::DescriptorTooSmall`] for `n == 0`.
#[instrument]
pub fn inverse_qft(n: u32) -> OracleResult<Program> {
    fourier(n, true)
}

fn fourier(n: u32, inverse: bool) -> OracleResult<Program> {
    if n == 0 {
        return Err(OracleError::too_small("QFT", 1, 0));
    }
    let qubits: Vec<QubitId> = (0..n).map(QubitId).collect();
    let mut b = Program::builder(n, 0);
    apply_qft(&mut b, &qubits, inverse)?;
    debug!(gates = b.len(), inverse, "Synthesized QFT");
    Ok(b.finish())
}

/// Append the (inverse) Fourier transform over `qubits` to `builder`.
pub(crate) fn apply_qft(
    builder: &mut ProgramBuilder,
    qubits: &[QubitId],
    inverse: bool,
) -> OracleResult<()> {
    let n = qubits.len();
    if inverse {
        for i in (0..n / 2).rev() {
            builder.swap(qubits[i], qubits[n - 1 - i])?;
        }
        for i in (0..n).rev() {
            for j in (i + 1..n).rev() {
                builder.cp(phase(j - i).neg(), qubits[j], qubits[i])?;
            }
            builder.h(qubits[i])?;
        }
    } else {
        for i in 0..n {
            builder.h(qubits[i])?;
            for j in i + 1..n {
                builder.cp(phase(j - i), qubits[j], qubits[i])?;
            }
        }
        for i in 0..n / 2 {
            builder.swap(qubits[i], qubits[n - 1 - i])?;
        }
    }
    Ok(())
}

fn phase(distance: usize) -> Angle {
    Angle::pi_over_power_of_two(u32::try_from(distance).unwrap_or(u32::MAX))
}
