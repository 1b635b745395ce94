//! Error types for the QASM parser.

use saxonq_ir::{OperationError, ProgramError};
use thiserror::Error;

/// Errors that can occur during parsing.
///
/// Every variant carries the 1-based source line it was raised on.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Version line, includes or register declarations are missing,
    /// repeated or out of place.
    #[error("line {line}: malformed header: {reason}")]
    MalformedHeader {
        /// Source line.
        line: usize,
        /// What is wrong with the header.
        reason: String,
    },

    /// The operation registry rejected the instruction on this line.
    #[error("line {line}: invalid instruction: {cause}")]
    InvalidInstruction {
        /// Source line.
        line: usize,
        /// Registry failure.
        #[source]
        cause: OperationError,
    },

    /// A qubit or classical index exceeds its register.
    #[error("line {line}: index {index} out of range for register '{register}' of size {size}")]
    IndexOutOfRange {
        /// Source line.
        line: usize,
        /// Register name.
        register: String,
        /// Requested index.
        index: u32,
        /// Register size.
        size: u32,
    },

    /// The line is not a well-formed statement.
    #[error("line {line}: syntax error: {message}")]
    Syntax {
        /// Source line.
        line: usize,
        /// Description.
        message: String,
    },

    /// The assembled program failed validation.
    #[error("program error: {0}")]
    Program(#[from] ProgramError),
}

impl ParseError {
    /// Source line of the error, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MalformedHeader { line, .. }
            | ParseError::InvalidInstruction { line, .. }
            | ParseError::IndexOutOfRange { line, .. }
            | ParseError::Syntax { line, .. } => Some(*line),
            ParseError::Program(_) => None,
        }
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
