//! SaxonQ circuit intermediate representation
//!
//! This crate holds the data every other SaxonQ crate passes around: the
//! operation registry, validated instructions, immutable circuit programs and
//! the processor profiles backends are described by.
//!
//! # Core Components
//!
//! - **Registry**: [`build`], [`list_operations`] and [`OperationShape`]; the
//!   only way to create an [`Instruction`]
//! - **Angles**: [`Angle`], exact multiples of π or plain radians
//! - **Programs**: [`Program`] (immutable, with [`Program::compose`] and
//!   [`Program::append`]) and [`ProgramBuilder`]
//! - **Dependencies**: [`DependencyGraph`] for depth and scheduling
//! - **Processors**: [`ProcessorProfile`] and [`ProcessorCatalog`]
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use saxonq_ir::{ClbitId, Program, QubitId};
//!
//! let mut builder = Program::builder(2, 2);
//! builder
//!     .h(QubitId(0))?
//!     .cx(QubitId(0), QubitId(1))?
//!     .measure(QubitId(0), ClbitId(0))?
//!     .measure(QubitId(1), ClbitId(1))?;
//! let bell = builder.finish();
//!
//! assert_eq!(bell.len(), 4);
//! assert_eq!(bell.depth(), 3); // H, CX, parallel measures
//! # Ok::<(), saxonq_ir::ProgramError>(())
//! ```
//!
//! # Example: Registry Validation
//!
//! ```rust
//! use saxonq_ir::{OperationError, QubitId, build};
//!
//! let rx = build("rx", &[QubitId(0)], &[], &["pi/2"]).unwrap();
//! assert_eq!(rx.params()[0].to_string(), "pi/2");
//!
//! let err = build("cx", &[QubitId(1)], &[], &[]).unwrap_err();
//! assert!(matches!(err, OperationError::ArityMismatch { .. }));
//! ```

pub mod angle;
pub mod dag;
pub mod error;
pub mod instruction;
pub mod operation;
pub mod profile;
pub mod program;
pub mod qubit;

pub use angle::Angle;
pub use dag::DependencyGraph;
pub use error::{
    AngleError, InvalidParameter, OperandRole, OperationError, OperationResult, ProfileError,
    ProfileResult,
    ProgramError, ProgramResult,
};
pub use instruction::Instruction;
pub use operation::{
    Arity, OperationKind, OperationShape, build, build_measure, build_with_angles,
    list_operations, lookup,
};
pub use profile::{ProcessorCatalog, ProcessorProfile};
pub use program::{DEFAULT_CREG, DEFAULT_QREG, Program, ProgramBuilder};
pub use qubit::{ClbitId, QubitId, Register};
