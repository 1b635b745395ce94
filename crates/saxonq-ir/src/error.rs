//! Error types for the IR crate.

use crate::operation::Arity;
use crate::qubit::{ClbitId, QubitId};
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading an angle from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AngleError {
    /// Nothing to parse.
    #[error("empty angle expression")]
    Empty,

    /// A factor is neither a number nor π.
    #[error("invalid angle expression '{0}'")]
    Malformed(String),

    /// More than one π factor.
    #[error("angle expression '{0}' multiplies π more than once")]
    MultiplePi(String),

    /// π appears in a denominator.
    #[error("angle expression '{0}' divides by π")]
    PiDenominator(String),

    /// Division by a zero factor.
    #[error("angle expression '{0}' divides by zero")]
    DivisionByZero(String),

    /// The value is NaN or infinite.
    #[error("angle value is not finite")]
    NonFinite,
}

/// Which operand list of an instruction an arity check failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandRole {
    /// Target qubits.
    Targets,
    /// Control qubits.
    Controls,
    /// Classical destinations.
    Clbits,
}

impl std::fmt::Display for OperandRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperandRole::Targets => f.write_str("target qubit(s)"),
            OperandRole::Controls => f.write_str("control qubit(s)"),
            OperandRole::Clbits => f.write_str("classical bit(s)"),
        }
    }
}

/// A parameter that does not resolve to a finite angle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parameter {index} ('{value}') is invalid")]
pub struct InvalidParameter {
    /// Parameter position.
    pub index: usize,
    /// Parameter as supplied.
    pub value: String,
    /// What went wrong.
    #[source]
    pub source: AngleError,
}

fn mismatch_detail(got: &usize, invalid: &Option<InvalidParameter>) -> String {
    match invalid {
        Some(p) => format!("parameter {} ('{}') is not an angle", p.index, p.value),
        None => format!("got {got}"),
    }
}

/// Errors raised by the operation registry when building an instruction.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum OperationError {
    /// The operation name is not registered.
    #[error("unknown operation '{name}'")]
    UnknownOperation {
        /// Name as supplied by the caller.
        name: String,
    },

    /// Wrong number of targets, controls or classical bits.
    #[error("operation '{op}' expects {expected} {role}, got {got}")]
    ArityMismatch {
        /// Canonical operation name.
        op: &'static str,
        /// Operand list that failed.
        role: OperandRole,
        /// Declared arity.
        expected: Arity,
        /// Supplied count.
        got: usize,
    },

    /// Wrong number of parameters, or a parameter that is not a finite
    /// angle.
    #[error("operation '{op}' expects {expected} parameter(s), {}", mismatch_detail(.got, .invalid))]
    ParameterMismatch {
        /// Canonical operation name.
        op: &'static str,
        /// Declared parameter count.
        expected: usize,
        /// Supplied count.
        got: usize,
        /// The offending parameter when the count matches.
        #[source]
        invalid: Option<InvalidParameter>,
    },

    /// The same qubit is used twice by one instruction.
    #[error("operation '{op}' uses qubit {qubit} more than once")]
    DuplicateQubit {
        /// Canonical operation name.
        op: &'static str,
        /// The repeated qubit.
        qubit: QubitId,
    },
}

/// Result type for registry operations.
pub type OperationResult<T> = Result<T, OperationError>;

/// Errors raised while assembling or editing a circuit program.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ProgramError {
    /// An instruction addresses a qubit outside the quantum register.
    #[error("qubit {qubit} is outside the quantum register of size {size}{}", format_op_context(.op))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Quantum register size.
        size: u32,
        /// Operation name for context.
        op: Option<&'static str>,
    },

    /// An instruction addresses a classical bit outside the classical register.
    #[error("classical bit {clbit} is outside the classical register of size {size}{}", format_op_context(.op))]
    ClbitOutOfRange {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Classical register size.
        size: u32,
        /// Operation name for context.
        op: Option<&'static str>,
    },

    /// The program never measures, so running it would return nothing.
    #[error("circuit contains no measurement")]
    NoMeasurement,

    /// No instruction at the requested position.
    #[error("no instruction at index {index} (program has {len})")]
    InstructionOutOfRange {
        /// Requested index.
        index: usize,
        /// Program length.
        len: usize,
    },

    /// Composition would need a register larger than `u32::MAX`.
    #[error("{register} register of {left} + {right} bits does not fit in u32")]
    RegisterOverflow {
        /// `"quantum"` or `"classical"`.
        register: &'static str,
        /// First program's size.
        left: u32,
        /// Second program's size.
        right: u32,
    },

    /// The registry rejected an instruction.
    #[error(transparent)]
    Operation(#[from] OperationError),
}

#[allow(clippy::ref_option)]
fn format_op_context(op: &Option<&'static str>) -> String {
    match op {
        Some(name) => format!(" (operation: {name})"),
        None => String::new(),
    }
}

/// Result type for program operations.
pub type ProgramResult<T> = Result<T, ProgramError>;

/// Errors raised by processor profiles and catalogs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileError {
    /// A profile field holds a value the pulse model cannot use.
    #[error("processor '{processor}': invalid {field}: {reason}")]
    InvalidField {
        /// Profile name.
        processor: String,
        /// Field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// No processor with this name in the catalog.
    #[error("unknown processor '{0}'")]
    UnknownProcessor(String),

    /// Two catalog entries share a name.
    #[error("duplicate processor '{0}' in catalog")]
    DuplicateProcessor(String),

    /// Catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid JSON.
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog file is not valid YAML.
    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type for profile operations.
pub type ProfileResult<T> = Result<T, ProfileError>;
