//! Deutsch-Jozsa oracle.

use saxonq_ir::{Program, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

use crate::error::{OracleError, OracleResult};

/// Class of the Boolean function hidden in a Deutsch-Jozsa oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleType {
    /// Same output for every input.
    Constant,
    /// Output 1 for exactly half of the inputs.
    Balanced,
}

impl fmt::Display for OracleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleType::Constant => f.write_str("constant"),
            OracleType::Balanced => f.write_str("balanced"),
        }
    }
}

/// Deutsch-Jozsa oracle over `n` qubits; qubit `n - 1` is the ancilla.
///
/// - constant, value 0: no instructions;
/// - constant, value 1: `x` on the ancilla;
/// - balanced: `cx(i, n - 1)` for every input qubit, i.e. the parity
///   function. `value` does not change a balanced oracle.
///
/// # Errors
///
/// [`OracleError::DescriptorTooSmall`] for `n < 2`.
#[instrument]
pub fn deutsch_jozsa(n: u32, oracle_type: OracleType, value: bool) -> OracleResult<Program> {
    if n < 2 {
        return Err(OracleError::too_small("Deutsch-Jozsa", 2, n));
    }
    let ancilla = QubitId(n - 1);

    let mut b = Program::builder(n, 0);
    match oracle_type {
        OracleType::Constant if value => {
            b.x(ancilla)?;
        }
        OracleType::Constant => {}
        OracleType::Balanced => {
            for i in 0..n - 1 {
                b.cx(QubitId(i), ancilla)?;
            }
        }
    }
    debug!(gates = b.len(), "Synthesized Deutsch-Jozsa oracle");
    Ok(b.finish())
}

/// Summary of the hidden function as shown to users.
pub fn describe(oracle_type: OracleType, value: bool) -> String {
    match oracle_type {
        OracleType::Constant => format!("constant with value = {}", u8::from(value)),
        OracleType::Balanced => "balanced".to_string(),
    }
}
