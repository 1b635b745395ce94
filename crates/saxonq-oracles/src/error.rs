//! Error types for oracle synthesis.

use saxonq_ir::{OperationError, ProgramError};
use thiserror::Error;

/// Errors that can occur while synthesizing an oracle or an experiment.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum OracleError {
    /// The register cannot represent the descriptor.
    #[error("{oracle} needs at least {required} qubits, only {available} available")]
    DescriptorTooSmall {
        oracle: &'static str,
        required: u32,
        available: u32,
    },

    /// The descriptor is well-sized but has no meaning for this oracle.
    #[error("Invalid {oracle} descriptor: {reason}")]
    InvalidDescriptor { oracle: &'static str, reason: String },

    /// A synthesized instruction was rejected by the registry.
    #[error(transparent)]
    Operation(#[from] OperationError),

    /// A synthesized instruction did not fit the fragment.
    #[error(transparent)]
    Program(#[from] ProgramError),

    /// No processor in the catalog is large enough for the experiment.
    #[error("No available processor has {required} or more qubits")]
    NoProcessor { required: u32 },
}

impl OracleError {
    pub(crate) fn too_small(oracle: &'static str, required: u32, available: u32) -> Self {
        Self::DescriptorTooSmall {
            oracle,
            required,
            available,
        }
    }

    pub(crate) fn invalid(oracle: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            oracle,
            reason: reason.into(),
        }
    }
}

/// Result type for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;
