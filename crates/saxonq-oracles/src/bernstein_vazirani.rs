//! Bernstein-Vazirani oracle.

use saxonq_ir::{Program, QubitId};
use tracing::{debug, instrument};

use crate::bits::{BitString, qubit_index, register_len};
use crate::error::OracleResult;

/// Oracle for `f(x) = secret · x (mod 2)` over `k + 1` qubits.
///
/// Qubits `0..k` are the input register and qubit `k` is the ancilla. Each
/// set bit `i` of the secret contributes one `cx(i, k)`; clear bits
/// contribute nothing.
///
/// # Errors
///
/// [`OracleError::DescriptorTooSmall`](crate::OracleError::DescriptorTooSmall)
/// for an empty secret.
#[instrument(skip_all, fields(secret = %secret))]
pub fn bernstein_vazirani(secret: &BitString) -> OracleResult<Program> {
    let k = register_len(secret, "Bernstein-Vazirani")?;
    let ancilla = QubitId(k);

    let mut b = Program::builder(k + 1, 0);
    for i in secret.ones() {
        b.cx(QubitId(qubit_index(i)), ancilla)?;
    }
    debug!(flips = b.len(), "Synthesized Bernstein-Vazirani oracle");
    Ok(b.finish())
}
