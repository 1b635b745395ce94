//! `SaxonQ` pulse transpiler.
//!
//! Lowers a [`Program`](saxonq_ir::Program) to a [`PulseSchedule`] for one
//! [`ProcessorProfile`](saxonq_ir::ProcessorProfile). Pulse lengths come from
//! the profile's coherence times and fidelities through a [`DurationModel`].
//! Instructions are serialized per qubit; instructions on disjoint qubits run
//! concurrently.
//!
//! # Example
//!
//! ```
//! use saxonq_ir::{Program, ProcessorCatalog, QubitId};
//! use saxonq_pulse::transpile;
//!
//! let catalog = ProcessorCatalog::builtin();
//! let profile = catalog.require("Tick").unwrap();
//!
//! let mut builder = Program::builder(2, 2);
//! builder.h(QubitId(0)).unwrap();
//! builder.cx(QubitId(0), QubitId(1)).unwrap();
//! builder.measure_all().unwrap();
//! let program = builder.finish();
//!
//! let schedule = transpile(&program, profile).unwrap();
//! assert_eq!(schedule.len(), 4);
//! assert!(schedule.total_duration_ns() > 0);
//! ```

pub mod duration;
pub mod error;
pub mod schedule;
mod transpiler;

pub use duration::{DurationModel, PulseCalibration, PulseChannel, two_qubit_equivalents};
pub use error::{TranspileError, TranspileResult};
pub use schedule::{PulseEvent, PulseSchedule};
pub use transpiler::transpile;
