//! `OpenQASM` 2.0 Parser, Printer and Verbose Expander for SaxonQ
//!
//! This crate reads the line-oriented circuit text users write in the
//! circuit creator, prints programs back in canonical form, and explains
//! programs in plain language.
//!
//! # Supported Features
//!
//! | Feature | Example |
//! |---------|---------|
//! | Version declaration (optional) | `OPENQASM 2.0;` |
//! | Includes (ignored) | `include "qelib1.inc";` |
//! | Register declarations | `qreg q[3];`, `creg c[3];` |
//! | Gates, controls first | `h q[0];`, `cx q[0], q[1];` |
//! | Symbolic parameters | `rx(pi/4) q[0];`, `u(pi/2,0,pi) q[1];` |
//! | Measurements | `measure q[0] -> c[0];`, `measure q -> c;` |
//! | Broadcast | `h q;`, `barrier q;` |
//! | Comments | `// comment` |
//!
//! # Example: Parsing and Explaining
//!
//! ```rust
//! use saxonq_qasm::{expand, parse};
//!
//! let source = "OPENQASM 2.0;
//! include \"qelib1.inc\";
//! qreg q[2];
//! creg c[2];
//! h q[0];
//! cx q[0], q[1];
//! measure q[1] -> c[1];";
//!
//! let program = parse(source).unwrap();
//! assert_eq!(program.len(), 3);
//!
//! let lines = expand(&program);
//! assert_eq!(lines[0], "Line 5: apply Hadamard (h) on qubit q[0]");
//! ```
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use saxonq_ir::{Angle, Program, QubitId};
//! use saxonq_qasm::{emit, parse};
//!
//! let mut builder = Program::builder(2, 0);
//! builder.h(QubitId(0))?.cp(Angle::pi_over_power_of_two(1), QubitId(1), QubitId(0))?;
//! let program = builder.finish();
//!
//! assert_eq!(parse(&emit(&program)).unwrap(), program);
//! # Ok::<(), saxonq_ir::ProgramError>(())
//! ```

pub mod ast;
pub mod emitter;
pub mod error;
pub mod expand;
pub mod lexer;
mod parser;

pub use emitter::{emit, emit_instructions};
pub use error::{ParseError, ParseResult};
pub use expand::{expand, expand_with_header};
pub use parser::{parse, parse_lines};
