//! Caller-side experiments built around the synthesizers.
//!
//! These are the circuits a job-submission workflow builds for its users:
//! state preparation demos and the textbook algorithms, each with the
//! parameters the job records and a one-line summary for the notification.
//! All randomness (secrets, marked states, angles) is drawn from the
//! [`rand::Rng`] passed in, before any oracle is synthesized.

mod algorithms;
mod search;
mod states;

pub use algorithms::{
    MAX_QFT_PERIOD_QUBITS, SHOR_INSTANCES, bernstein_vazirani_experiment, deutsch_jozsa_experiment,
    qft_period_experiment, random_marked_state, random_secret, shor_experiment, simon_experiment,
};
pub use search::{
    GroverSearch, MAX_GROVER_ATTEMPTS, Verifier, grover_experiment, grover_program, grover_search,
};
pub use states::{bell_state, ghz_state, state_transfer, superposition, teleportation};

use saxonq_ir::{ProcessorCatalog, ProcessorProfile, Program};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{OracleError, OracleResult};

/// Kind of experiment, named as job records name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExperimentCategory {
    #[serde(rename = "Superposition")]
    Superposition,
    #[serde(rename = "SWAP")]
    StateTransfer,
    #[serde(rename = "Quantum Teleportation")]
    Teleportation,
    #[serde(rename = "BellStates")]
    BellState,
    #[serde(rename = "GHZ")]
    GhzState,
    #[serde(rename = "DeutschJosza")]
    DeutschJozsa,
    #[serde(rename = "BV")]
    BernsteinVazirani,
    #[serde(rename = "Simon")]
    Simon,
    #[serde(rename = "QFT")]
    Qft,
    #[serde(rename = "Grover")]
    Grover,
    #[serde(rename = "Shor")]
    Shor,
}

impl ExperimentCategory {
    /// Category string stored with the job.
    pub fn as_str(self) -> &'static str {
        match self {
            ExperimentCategory::Superposition => "Superposition",
            ExperimentCategory::StateTransfer => "SWAP",
            ExperimentCategory::Teleportation => "Quantum Teleportation",
            ExperimentCategory::BellState => "BellStates",
            ExperimentCategory::GhzState => "GHZ",
            ExperimentCategory::DeutschJozsa => "DeutschJosza",
            ExperimentCategory::BernsteinVazirani => "BV",
            ExperimentCategory::Simon => "Simon",
            ExperimentCategory::Qft => "QFT",
            ExperimentCategory::Grover => "Grover",
            ExperimentCategory::Shor => "Shor",
        }
    }
}

impl fmt::Display for ExperimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ready-to-submit job: the program, its recorded parameters and the
/// summary shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Experiment {
    pub category: ExperimentCategory,
    pub program: Program,
    pub params: BTreeMap<String, Value>,
    pub summary: String,
}

impl Experiment {
    pub(crate) fn new(category: ExperimentCategory, program: Program, summary: impl Into<String>) -> Self {
        Self {
            category,
            program,
            params: BTreeMap::new(),
            summary: summary.into(),
        }
    }

    #[must_use]
    pub(crate) fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

/// The first processor in catalog order with at least `required` qubits.
///
/// # Errors
///
/// [`OracleError::NoProcessor`] if none is large enough.
pub fn first_fitting_processor(
    catalog: &ProcessorCatalog,
    required: u32,
) -> OracleResult<&ProcessorProfile> {
    catalog
        .first_with_at_least(required)
        .ok_or(OracleError::NoProcessor { required })
}

pub(crate) fn require_qubits(experiment: &'static str, required: u32, available: u32) -> OracleResult<()> {
    if available < required {
        return Err(OracleError::too_small(experiment, required, available));
    }
    Ok(())
}
