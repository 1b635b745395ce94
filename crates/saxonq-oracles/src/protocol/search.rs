//! Grover search with verified retries.

use rand::Rng;
use saxonq_ir::{Program, QubitId};
use tracing::{debug, info, instrument, warn};

use super::algorithms::{measure_each, random_marked_state};
use super::{Experiment, ExperimentCategory, require_qubits};
use crate::bits::BitString;
use crate::error::OracleResult;
use crate::grover::{grover_inversion, grover_iterations, grover_phase};

/// Attempts made before a search result is accepted unverified.
pub const MAX_GROVER_ATTEMPTS: usize = 3;

/// Something that can run a program and report its most frequent outcome,
/// classical bit 0 first.
///
/// Local simulators and remote backends both fit; closures implement it
/// directly.
pub trait Verifier {
    /// Most frequent measured outcome of `program`.
    fn most_frequent(&mut self, program: &Program) -> BitString;
}

impl<F> Verifier for F
where
    F: FnMut(&Program) -> BitString,
{
    fn most_frequent(&mut self, program: &Program) -> BitString {
        self(program)
    }
}

/// Outcome of [`grover_search`].
#[derive(Debug, Clone, PartialEq)]
pub struct GroverSearch {
    /// The accepted program.
    pub program: Program,
    /// Phase and inversion rounds in [`GroverSearch::program`].
    pub iterations: usize,
    /// Programs built, at most [`MAX_GROVER_ATTEMPTS`].
    pub attempts: usize,
    /// Whether the verifier reproduced the marked state.
    pub verified: bool,
}

/// Search program over `n` qubits: uniform superposition of the search
/// register, `iterations` rounds of phase and inversion, then readout of the
/// search register.
///
/// # Errors
///
/// As [`grover_phase`].
pub fn grover_program(n: u32, marked: &BitString, iterations: usize) -> OracleResult<Program> {
    require_qubits("Grover", 2, n)?;
    let phase = grover_phase(n, marked)?;
    let inversion = grover_inversion(n)?;
    let search: Vec<QubitId> = (0..n - 1).map(QubitId).collect();

    let mut b = Program::builder(n, n - 1);
    b.h_all(search.iter().copied())?;
    for _ in 0..iterations {
        b.extend(&phase)?.extend(&inversion)?;
    }
    measure_each(&mut b, &search)?;
    Ok(b.finish())
}

/// Build the search for `marked` and check it with `verifier`.
///
/// Starts from [`grover_iterations`] rounds. When the most frequent outcome
/// differs from `marked`, retries with one and then two extra rounds; the
/// last attempt is accepted whatever it yields.
///
/// # Errors
///
/// As [`grover_phase`].
#[instrument(skip_all, fields(n, marked = %marked))]
pub fn grover_search<V>(n: u32, marked: &BitString, verifier: &mut V) -> OracleResult<GroverSearch>
where
    V: Verifier + ?Sized,
{
    let base = grover_iterations(n);
    let mut attempt = 0;
    loop {
        attempt += 1;
        let iterations = base + attempt - 1;
        let program = grover_program(n, marked, iterations)?;
        let outcome = verifier.most_frequent(&program);
        let verified = outcome == *marked;
        debug!(attempt, iterations, %outcome, verified, "Grover attempt");

        if verified || attempt == MAX_GROVER_ATTEMPTS {
            if verified {
                info!(attempt, iterations, "Grover search verified");
            } else {
                warn!(
                    attempts = attempt,
                    iterations,
                    %outcome,
                    "Grover search unverified, accepting last attempt"
                );
            }
            return Ok(GroverSearch {
                program,
                iterations,
                attempts: attempt,
                verified,
            });
        }
    }
}

/// Grover search for a random marked state over `n` qubits.
///
/// # Errors
///
/// [`OracleError::DescriptorTooSmall`](crate::OracleError::DescriptorTooSmall)
/// for `n < 2`.
pub fn grover_experiment<R, V>(n: u32, rng: &mut R, verifier: &mut V) -> OracleResult<Experiment>
where
    R: Rng + ?Sized,
    V: Verifier + ?Sized,
{
    require_qubits("Grover", 2, n)?;
    let marked = random_marked_state((n - 1) as usize, rng);
    let search = grover_search(n, &marked, verifier)?;

    let state = marked.to_string();
    let summary = format!("Your state was {state}");
    Ok(Experiment::new(ExperimentCategory::Grover, search.program, summary)
        .with_param("Grover_state", state)
        .with_param("Grover_iterations", search.iterations))
}
