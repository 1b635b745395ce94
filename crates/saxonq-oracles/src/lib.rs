//! `SaxonQ` oracle synthesizers.
//!
//! Each synthesizer turns a small classical description (a secret string, a
//! marked state, a modulus) into a [`Program`](saxonq_ir::Program) fragment
//! built from registry operations only. Fragments leave room on their
//! registers for the preparation and readout layers the caller adds;
//! [`protocol`] builds those complete experiments.
//!
//! # Example
//!
//! ```
//! use saxonq_oracles::{BitString, bernstein_vazirani};
//!
//! let secret: BitString = "101".parse().unwrap();
//! let oracle = bernstein_vazirani(&secret).unwrap();
//!
//! assert_eq!(oracle.num_qubits(), 4);
//! assert_eq!(oracle.count_ops().get("cx"), Some(&2));
//! ```

mod bernstein_vazirani;
mod bits;
pub mod descriptor;
mod deutsch_jozsa;
pub mod error;
mod grover;
pub mod protocol;
mod qft;
pub mod shor;
mod simon;

#[cfg(test)]
mod classical;

pub use bernstein_vazirani::bernstein_vazirani;
pub use bits::BitString;
pub use descriptor::{OracleDescriptor, synthesize};
pub use deutsch_jozsa::{OracleType, describe, deutsch_jozsa};
pub use error::{OracleError, OracleResult};
pub use grover::{grover_inversion, grover_iterations, grover_phase};
pub use qft::{inverse_qft, qft};
pub use shor::{
    controlled_modular_multiplication, modular_exponentiation, multiplicative_order, pow_mod,
    shor_period_finding, shor_qubits,
};
pub use simon::simon;
