//! Oracle descriptors and budget-checked synthesis.

use saxonq_ir::Program;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::bernstein_vazirani::bernstein_vazirani;
use crate::bits::BitString;
use crate::deutsch_jozsa::{OracleType, deutsch_jozsa};
use crate::error::{OracleError, OracleResult};
use crate::grover::{grover_inversion, grover_phase};
use crate::qft::{inverse_qft, qft};
use crate::shor::{shor_period_finding, shor_qubits};
use crate::simon::simon;

/// Everything needed to synthesize one oracle fragment or program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "oracle", rename_all = "snake_case")]
pub enum OracleDescriptor {
    /// Bernstein-Vazirani with a secret string.
    BernsteinVazirani { secret: BitString },
    /// Simon with a hidden XOR mask.
    Simon { secret: BitString },
    /// Deutsch-Jozsa over `num_qubits` qubits including the ancilla.
    DeutschJozsa {
        num_qubits: u32,
        oracle_type: OracleType,
        value: bool,
    },
    /// Grover phase oracle marking one basis state.
    GroverPhase { num_qubits: u32, marked: BitString },
    /// Grover inversion about the mean.
    GroverInversion { num_qubits: u32 },
    /// (Inverse) quantum Fourier transform.
    Qft { num_qubits: u32, inverse: bool },
    /// Full Shor period-finding program.
    Shor { modulus: u64, base: u64 },
}

impl OracleDescriptor {
    /// Short name of the oracle family.
    pub fn name(&self) -> &'static str {
        match self {
            OracleDescriptor::BernsteinVazirani { .. } => "Bernstein-Vazirani",
            OracleDescriptor::Simon { .. } => "Simon",
            OracleDescriptor::DeutschJozsa { .. } => "Deutsch-Jozsa",
            OracleDescriptor::GroverPhase { .. } => "Grover phase",
            OracleDescriptor::GroverInversion { .. } => "Grover inversion",
            OracleDescriptor::Qft { .. } => "QFT",
            OracleDescriptor::Shor { .. } => "Shor",
        }
    }

    /// Register size of the synthesized program.
    pub fn required_qubits(&self) -> u32 {
        let len = |bits: &BitString| u32::try_from(bits.len()).unwrap_or(u32::MAX);
        match self {
            OracleDescriptor::BernsteinVazirani { secret } => len(secret).saturating_add(1),
            OracleDescriptor::Simon { secret } => len(secret).saturating_mul(2),
            OracleDescriptor::DeutschJozsa { num_qubits, .. }
            | OracleDescriptor::GroverPhase { num_qubits, .. }
            | OracleDescriptor::GroverInversion { num_qubits }
            | OracleDescriptor::Qft { num_qubits, .. } => *num_qubits,
            OracleDescriptor::Shor { modulus, .. } => shor_qubits(*modulus),
        }
    }

    /// Synthesize without a size budget.
    ///
    /// # Errors
    ///
    /// Whatever the underlying synthesizer reports.
    pub fn synthesize(&self) -> OracleResult<Program> {
        match self {
            OracleDescriptor::BernsteinVazirani { secret } => bernstein_vazirani(secret),
            OracleDescriptor::Simon { secret } => simon(secret),
            OracleDescriptor::DeutschJozsa {
                num_qubits,
                oracle_type,
                value,
            } => deutsch_jozsa(*num_qubits, *oracle_type, *value),
            OracleDescriptor::GroverPhase { num_qubits, marked } => grover_phase(*num_qubits, marked),
            OracleDescriptor::GroverInversion { num_qubits } => grover_inversion(*num_qubits),
            OracleDescriptor::Qft {
                num_qubits,
                inverse: false,
            } => qft(*num_qubits),
            OracleDescriptor::Qft {
                num_qubits,
                inverse: true,
            } => inverse_qft(*num_qubits),
            OracleDescriptor::Shor { modulus, base } => shor_period_finding(*modulus, *base),
        }
    }
}

/// Synthesize `descriptor`, refusing programs larger than `budget` qubits.
///
/// # Errors
///
/// [`OracleError::DescriptorTooSmall`] when the budget is below
/// [`OracleDescriptor::required_qubits`], otherwise whatever the synthesizer
/// reports.
#[instrument(skip_all, fields(oracle = descriptor.name(), budget = ?budget))]
pub fn synthesize(descriptor: &OracleDescriptor, budget: Option<u32>) -> OracleResult<Program> {
    let required = descriptor.required_qubits();
    if let Some(available) = budget {
        if required > available {
            return Err(OracleError::too_small(descriptor.name(), required, available));
        }
    }
    let program = descriptor.synthesize()?;
    debug!(
        qubits = program.num_qubits(),
        gates = program.len(),
        "Synthesized oracle"
    );
    Ok(program)
}
