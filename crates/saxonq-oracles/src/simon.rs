//! Simon oracle.

use saxonq_ir::{Program, QubitId};
use tracing::{debug, instrument};

use crate::bits::{BitString, qubit_index, register_len};
use crate::error::OracleResult;

/// Two-to-one oracle with `f(x) = f(x ⊕ secret)` over `2k` qubits.
///
/// The input register `0..k` is first copied into the output register
/// `k..2k`. For a non-zero secret with lowest set bit `j`, the output is then
/// XORed with the secret whenever input bit `j` is set, which identifies `x`
/// with `x ⊕ secret`. The all-zero secret leaves the one-to-one copy.
///
/// # Errors
///
/// [`OracleError::DescriptorTooSmall`](crate::OracleError::DescriptorTooSmall)
/// for an empty secret.
#[instrument(skip_all, fields(secret = %secret))]
pub fn simon(secret: &BitString) -> OracleResult<Program> {
    let k = register_len(secret, "Simon")?;
    let mut b = Program::builder(2 * k, 0);

    for i in 0..k {
        b.cx(QubitId(i), QubitId(k + i))?;
    }
    if let Some(j) = secret.ones().next() {
        let j = QubitId(qubit_index(j));
        for i in secret.ones() {
            b.cx(j, QubitId(k + qubit_index(i)))?;
        }
    }

    debug!(gates = b.len(), "Synthesized Simon oracle");
    Ok(b.finish())
}
