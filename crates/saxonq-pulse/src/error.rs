//! Error types for pulse transpilation.

use saxonq_ir::ProfileError;
use thiserror::Error;

/// Errors that can occur while lowering a program to a pulse schedule.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TranspileError {
    /// The program declares more qubits than the processor offers.
    #[error("Program needs {required} qubits but processor '{processor}' has {available}")]
    InsufficientQubits {
        processor: String,
        required: u32,
        available: u32,
    },

    /// The processor profile cannot parameterize pulse durations.
    #[error("Invalid processor profile: {0}")]
    InvalidProfile(#[from] ProfileError),

    /// Serializing the schedule failed.
    #[error("Schedule serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for transpiler operations.
pub type TranspileResult<T> = Result<T, TranspileError>;
